//! Account-abstraction operations and their hash.

use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio::pubkey::Pubkey;

use crate::{
    crypto::{hashv, keccak256},
    error::ValidationError,
    Address,
};

/// A signed request submitted to the entry point on behalf of an account.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserOperation {
    pub sender: Pubkey,
    pub nonce: u64,
    pub init_code: Vec<u8>,
    pub call_data: Vec<u8>,
    pub call_gas_limit: u64,
    pub verification_gas_limit: u64,
    pub pre_verification_gas: u64,
    pub max_fee_per_gas: u64,
    pub max_priority_fee_per_gas: u64,
    pub paymaster_and_data: Vec<u8>,
    pub signature: Vec<u8>,
}

/// The account's execute call carried in `call_data`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountCall {
    pub destination: Address,
    pub value: u128,
    pub data: Vec<u8>,
}

/// Left pads `value` into a 32 byte big-endian word.
pub fn u256_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

impl UserOperation {
    /// Hash of every field except the signature.
    pub fn pack_hash(&self) -> [u8; 32] {
        hashv(&[
            self.sender.as_ref(),
            &u256_word(self.nonce),
            &keccak256(&self.init_code),
            &keccak256(&self.call_data),
            &u256_word(self.call_gas_limit),
            &u256_word(self.verification_gas_limit),
            &u256_word(self.pre_verification_gas),
            &u256_word(self.max_fee_per_gas),
            &u256_word(self.max_priority_fee_per_gas),
            &keccak256(&self.paymaster_and_data),
        ])
    }

    /// Operation hash bound to the entry point and the executing chain.
    pub fn hash(&self, entry_point: &Pubkey, chain_id: u64) -> [u8; 32] {
        hashv(&[
            &self.pack_hash(),
            entry_point.as_ref(),
            &u256_word(chain_id),
        ])
    }

    /// Decodes `call_data` as the account's execute call.
    pub fn account_call(&self) -> Result<AccountCall, ValidationError> {
        AccountCall::try_from_slice(&self.call_data).map_err(|_| ValidationError::PolicyViolation)
    }
}

impl AccountCall {
    pub fn encode(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }
}
