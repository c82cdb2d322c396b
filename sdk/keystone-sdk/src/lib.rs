//! Off-chain tooling for Keystone accounts: key handling, Merkle trees,
//! signature payloads, instruction builders and a local entry point.

pub mod advanced;
pub mod core;
pub mod entry_point;
pub mod error;
pub mod merkle;
pub mod payload;
pub mod session;
pub mod types;
pub mod utils;

pub use crate::core::signer::{KeystoneSigner, LocalSigner};
pub use crate::entry_point::EntryPoint;
pub use crate::error::{KeystoneSdkError, Result};
pub use crate::merkle::MerkleTree;
pub use crate::session::{SessionLeafBuilder, SessionTree};
pub use crate::types::{AccountState, EntryPointConfig, FailedOp};
pub use crate::utils::{
    derive_owner_pda, derive_session_pda, parse_owner_record, parse_session_record,
};

#[cfg(feature = "erc20")]
pub use keystone_policy_erc20 as erc20;

pub mod state {
    pub use keystone_state::{
        AccountCall, Address, IntoBytes, OwnerRecord, SessionRecord, UserOperation,
        ValidationError,
    };
}
