//! Keystone Error Types
//!
//! Validation failures surface with the codes of
//! [`keystone_state::ValidationError`]; the variants here cover the account
//! plumbing around them.

use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum KeystoneError {
    #[error("Invalid instruction")]
    InvalidInstruction = 4000,

    #[error("Invalid PDA derivation")]
    InvalidPDA,

    #[error("Invalid record account")]
    InvalidRecordAccount,

    /// The operation was signed by someone other than the expected key
    #[error("Signature validation failed")]
    SignatureValidationFailed,
}

impl From<KeystoneError> for ProgramError {
    fn from(e: KeystoneError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
