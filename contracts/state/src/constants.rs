//! Fixed identifiers and wire-format constants shared by the program and the SDK.

use crate::Address;

/// Seed prefix of the owner record PDA
pub const OWNER_SEED: &[u8] = b"keystone-owner";

/// Seed prefix of the session record PDA
pub const SESSION_SEED: &[u8] = b"keystone-session";

/// Module id of the multichain ECDSA validator
pub const MULTICHAIN_VALIDATOR_ID: Address = *b"mod:multichain-ecdsa";

/// Module id of the session key manager
pub const SESSION_KEY_MANAGER_ID: Address = *b"mod:session-key-mngr";

/// Module id of the ERC20 transfer scope checker
pub const ERC20_SCOPE_MODULE_ID: Address = *b"scope:erc20-transfer";

/// Width of the module id appended to every operation signature
pub const MODULE_ID_LEN: usize = 20;

/// Leading tag of a multichain owner signature
pub const MULTICHAIN_TAG: u8 = 0x01;

/// Length of a recoverable ECDSA signature (r || s || v)
pub const SIGNATURE_LEN: usize = 65;

/// Largest timestamp representable in a session leaf (uint48)
pub const MAX_SESSION_TIMESTAMP: u64 = (1 << 48) - 1;
