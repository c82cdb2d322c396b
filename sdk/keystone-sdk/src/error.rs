use keystone_state::ValidationError;
use thiserror::Error;

/// SDK-specific error types for Keystone operations
#[derive(Debug, Error)]
pub enum KeystoneSdkError {
    /// Secret key bytes are not a valid secp256k1 scalar
    #[error("Invalid secret key")]
    InvalidSecretKey,

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// A Merkle tree needs at least one leaf
    #[error("Merkle tree has no leaves")]
    EmptyTree,

    /// Requested leaf index is outside the tree
    #[error("Leaf {0} not found in tree")]
    LeafNotFound(usize),

    /// Only the smart account may change its own records
    #[error("Unauthorized caller: {0}")]
    Unauthorized(String),

    /// Validation failed locally
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, KeystoneSdkError>;
