use pinocchio::program_error::ProgramError;
use thiserror::Error;

/// Reasons a validator module rejects an operation.
///
/// Every check fails closed: the first failing gate returns one of these and
/// nothing past it runs.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum ValidationError {
    /// No owner binding or session root exists for the account
    #[error("not initialized")]
    NotInitialized = 3000,

    /// The owner binding was already recorded
    #[error("already initialized")]
    AlreadyInitialized,

    /// The recovered signer is not the expected key
    #[error("signature mismatch")]
    SignatureMismatch,

    /// The Merkle proof does not lead to the expected root
    #[error("invalid merkle proof")]
    InvalidProof,

    /// The session leaf is past its `valid_until`
    #[error("session expired")]
    SessionExpired,

    /// The session leaf is before its `valid_after`
    #[error("session not yet valid")]
    NotYetValid,

    /// The call does not fit the delegated scope
    #[error("policy violation")]
    PolicyViolation,

    /// The signature payload could not be decoded
    #[error("malformed signature")]
    MalformedSignature,

    /// The signature names a module the account does not know
    #[error("unknown validation module")]
    UnknownModule,

    /// The session leaf names a scope checker that is not registered
    #[error("unknown scope module")]
    UnknownScopeModule,

    /// The operation sender is not the validating account
    #[error("operation sender mismatch")]
    SenderMismatch,

    /// A session leaf timestamp does not fit in 48 bits
    #[error("timestamp out of range")]
    TimestampOutOfRange,
}

impl ValidationError {
    /// Stable numeric code, also used as the custom program error
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl From<ValidationError> for ProgramError {
    fn from(e: ValidationError) -> Self {
        ProgramError::Custom(e.code())
    }
}
