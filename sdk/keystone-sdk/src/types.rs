use keystone_state::{OwnerRecord, SessionRecord};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::core::constants::{DEFAULT_CHAIN_ID, DEFAULT_ENTRY_POINT};

/// Identity the operation hash is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointConfig {
    /// Address of the entry point
    pub entry_point: Pubkey,

    /// Chain the operations execute on
    pub chain_id: u64,
}

impl Default for EntryPointConfig {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

/// Rejection of one operation inside a batch
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("FailedOp({index}, \"{reason}\")")]
pub struct FailedOp {
    /// Position of the operation in the batch
    pub index: usize,

    /// Short reason, prefixed with the AA error code
    pub reason: String,
}

/// Validator state of one smart account as the program stores it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountState {
    pub owner: Option<OwnerRecord>,
    pub session: Option<SessionRecord>,
}
