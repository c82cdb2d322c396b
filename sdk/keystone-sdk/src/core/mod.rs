pub mod constants;
pub mod signer;
