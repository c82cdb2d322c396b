//! ERC20 transfer scope for Keystone session keys.
//!
//! A session leaf governed by this checker carries
//! `[token: 20][recipient: 20][max_amount: 32 BE]` as scope data. A call is
//! in scope when it is a plain `transfer(recipient, amount)` on the token,
//! sends no native value, pays exactly the recipient and does not exceed the
//! ceiling. The ceiling applies per call; nothing is accumulated.

use keystone_state::{constants::ERC20_SCOPE_MODULE_ID, Address, ScopePolicy};

/// `transfer(address,uint256)` selector
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Decoded scope data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc20Scope {
    pub token: Address,
    pub recipient: Address,
    /// 256-bit big-endian ceiling
    pub max_amount: [u8; 32],
}

impl Erc20Scope {
    pub const LEN: usize = 20 + 20 + 32;

    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() != Self::LEN {
            return None;
        }
        let mut scope = Self {
            token: [0; 20],
            recipient: [0; 20],
            max_amount: [0; 32],
        };
        scope.token.copy_from_slice(&data[..20]);
        scope.recipient.copy_from_slice(&data[20..40]);
        scope.max_amount.copy_from_slice(&data[40..]);
        Some(scope)
    }

    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut data = [0u8; Self::LEN];
        data[..20].copy_from_slice(&self.token);
        data[20..40].copy_from_slice(&self.recipient);
        data[40..].copy_from_slice(&self.max_amount);
        data
    }
}

/// Decoded `transfer(address,uint256)` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferCall {
    pub recipient: Address,
    /// 256-bit big-endian amount
    pub amount: [u8; 32],
}

impl TransferCall {
    pub const LEN: usize = 4 + 32 + 32;

    /// Rejects anything but the exact ABI encoding, including dirty address padding.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() != Self::LEN || payload[..4] != TRANSFER_SELECTOR {
            return None;
        }
        let word = &payload[4..36];
        if word[..12].iter().any(|b| *b != 0) {
            return None;
        }
        let mut call = Self {
            recipient: [0; 20],
            amount: [0; 32],
        };
        call.recipient.copy_from_slice(&word[12..]);
        call.amount.copy_from_slice(&payload[36..]);
        Some(call)
    }
}

/// Returns true iff the call is a transfer within the scope.
pub fn check_scope(destination: &Address, value: u128, call_payload: &[u8], scope_data: &[u8]) -> bool {
    let Some(scope) = Erc20Scope::decode(scope_data) else {
        return false;
    };
    let Some(transfer) = TransferCall::decode(call_payload) else {
        return false;
    };

    // big-endian byte order compares like the integers
    *destination == scope.token
        && value == 0
        && transfer.recipient == scope.recipient
        && transfer.amount <= scope.max_amount
}

/// Scope checker registered under [`ERC20_SCOPE_MODULE_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Erc20TransferPolicy;

impl ScopePolicy for Erc20TransferPolicy {
    fn module_id(&self) -> Address {
        ERC20_SCOPE_MODULE_ID
    }

    fn check_scope(
        &self,
        destination: &Address,
        value: u128,
        call_payload: &[u8],
        scope_data: &[u8],
    ) -> bool {
        check_scope(destination, value, call_payload, scope_data)
    }
}
