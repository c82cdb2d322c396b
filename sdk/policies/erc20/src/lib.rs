//! Client-side helpers for ERC20 transfer sessions.

use keystone_erc20_policy::{Erc20Scope, TRANSFER_SELECTOR};
use keystone_state::{constants::ERC20_SCOPE_MODULE_ID, AccountCall, Address};

pub use keystone_erc20_policy::Erc20TransferPolicy;

/// Module id to put in a session leaf governed by this scope
pub const MODULE_ID: Address = ERC20_SCOPE_MODULE_ID;

/// Left pads an amount into a 256-bit big-endian word
pub fn amount_word(amount: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&amount.to_be_bytes());
    word
}

#[derive(Debug, Default, Clone)]
pub struct Erc20ScopeBuilder {
    token: Address,
    recipient: Address,
    max_amount: [u8; 32],
}

impl Erc20ScopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: Address) -> Self {
        self.token = token;
        self
    }

    pub fn recipient(mut self, recipient: Address) -> Self {
        self.recipient = recipient;
        self
    }

    /// Per-call ceiling
    pub fn max_amount(mut self, amount: u128) -> Self {
        self.max_amount = amount_word(amount);
        self
    }

    /// Build the scope data stored in the session leaf
    pub fn build_scope_data(self) -> Vec<u8> {
        Erc20Scope {
            token: self.token,
            recipient: self.recipient,
            max_amount: self.max_amount,
        }
        .encode()
        .to_vec()
    }
}

/// ABI encoding of `transfer(recipient, amount)`
pub fn encode_transfer(recipient: &Address, amount: u128) -> Vec<u8> {
    let mut payload = Vec::with_capacity(4 + 32 + 32);
    payload.extend_from_slice(&TRANSFER_SELECTOR);
    payload.extend_from_slice(&[0u8; 12]);
    payload.extend_from_slice(recipient);
    payload.extend_from_slice(&amount_word(amount));
    payload
}

/// Account call data transferring `amount` of `token` to `recipient`
pub fn transfer_call_data(token: &Address, recipient: &Address, amount: u128) -> Vec<u8> {
    let call = AccountCall {
        destination: *token,
        value: 0,
        data: encode_transfer(recipient, amount),
    };
    borsh::to_vec(&call).unwrap_or_default()
}
