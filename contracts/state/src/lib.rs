//! Keystone State Module
//!
//! Core state structures and validation logic for the Keystone validator
//! modules: the multichain ECDSA validator and the session key manager.
//! Everything in this crate is free of account handling so it can be driven
//! by the on-chain program and by off-chain tooling alike.

pub mod account;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod merkle;
pub mod multichain;
pub mod operation;
pub mod policy;
pub mod session;
pub mod transmute;

#[cfg(test)]
pub(crate) mod testing;

use pinocchio::pubkey::Pubkey;

pub use account::{validate_user_op, ValidationContext, ValidationStatus};
pub use error::ValidationError;
pub use multichain::{MultichainSignature, OwnerRecord, OwnerSignature};
pub use operation::{AccountCall, UserOperation};
pub use policy::{PolicyRegistry, PolicySet, ScopePolicy};
pub use session::{SessionLeaf, SessionRecord, SessionSignature};
pub use transmute::{IntoBytes, Transmutable, TransmutableMut};

/// EVM-style 20 byte address used for owners, session keys, module ids and
/// call destinations.
pub type Address = [u8; 20];

/// Represents the type discriminator for the records owned by the program.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    /// Owner binding of the multichain validator
    OwnerRecord = 1,
    /// Merkle root of the session key manager
    SessionRecord = 2,
}

impl TryFrom<u8> for Discriminator {
    type Error = ValidationError;

    fn try_from(discriminator: u8) -> Result<Self, Self::Error> {
        match discriminator {
            1 => Ok(Discriminator::OwnerRecord),
            2 => Ok(Discriminator::SessionRecord),
            _ => Err(ValidationError::NotInitialized),
        }
    }
}

/// Generate PDA seeds for the owner record of a smart account
pub fn owner_seeds(account: &Pubkey) -> [&[u8]; 2] {
    [constants::OWNER_SEED, account.as_ref()]
}

/// Generate owner record PDA seeds with bump
pub fn owner_seeds_with_bump<'a>(account: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [constants::OWNER_SEED, account.as_ref(), bump]
}

/// Generate PDA seeds for the session record of a smart account
pub fn session_seeds(account: &Pubkey) -> [&[u8]; 2] {
    [constants::SESSION_SEED, account.as_ref()]
}

/// Generate session record PDA seeds with bump
pub fn session_seeds_with_bump<'a>(account: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [constants::SESSION_SEED, account.as_ref(), bump]
}
