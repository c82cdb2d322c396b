#![allow(dead_code)]

use keystone_sdk::{
    payload::single_chain_signature, EntryPoint, EntryPointConfig, KeystoneSigner, LocalSigner,
};
use keystone_state::{AccountCall, Address, UserOperation};
use solana_sdk::pubkey::Pubkey;

pub const OWNER_KEY: [u8; 32] = [0x11; 32];
pub const SESSION_KEY: [u8; 32] = [0x22; 32];
pub const STRANGER_KEY: [u8; 32] = [0x33; 32];

/// Timestamp the tests run at
pub const NOW: u64 = 1_700_000_000;

pub fn signer(secret: &[u8; 32]) -> LocalSigner {
    LocalSigner::from_bytes(secret).unwrap()
}

pub struct TestContext {
    pub entry_point: EntryPoint,
    pub account: Pubkey,
    pub owner: LocalSigner,
}

impl TestContext {
    /// Entry point on `chain_id` with one account bound to the owner key.
    pub fn new(chain_id: u64) -> Self {
        let mut entry_point = EntryPoint::new(EntryPointConfig {
            chain_id,
            ..Default::default()
        });
        let account = Pubkey::new_from_array([0xac; 32]);
        let owner = signer(&OWNER_KEY);
        entry_point
            .init_owner(&account, &account, owner.address())
            .unwrap();
        Self {
            entry_point,
            account,
            owner,
        }
    }

    pub fn operation(&self, nonce: u64, call_data: Vec<u8>) -> UserOperation {
        UserOperation {
            sender: self.account.to_bytes(),
            nonce,
            call_data,
            call_gas_limit: 200_000,
            verification_gas_limit: 300_000,
            pre_verification_gas: 50_000,
            max_fee_per_gas: 30,
            max_priority_fee_per_gas: 2,
            ..Default::default()
        }
    }

    /// Operation with a plain call and a single-chain signature by `key`.
    pub fn signed_operation(&self, nonce: u64, key: &dyn KeystoneSigner) -> UserOperation {
        let mut operation = self.operation(nonce, call_data(&[0xde; 20], 1, vec![]));
        let hash = self.entry_point.operation_hash(&operation);
        operation.signature = single_chain_signature(key, &hash).unwrap();
        operation
    }

    pub fn nonce(&self) -> u64 {
        self.entry_point.get_nonce(&self.account)
    }

    pub fn handle_op(&mut self, operation: UserOperation) -> Result<(), String> {
        self.entry_point
            .handle_ops(&[operation], NOW)
            .remove(0)
            .map_err(|failure| failure.reason)
    }
}

pub fn call_data(destination: &Address, value: u128, data: Vec<u8>) -> Vec<u8> {
    borsh::to_vec(&AccountCall {
        destination: *destination,
        value,
        data,
    })
    .unwrap()
}
