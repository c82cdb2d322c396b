//! Host-side account fixtures.
//!
//! Accounts are serialized the way the loader hands them to the program and
//! read back with `pinocchio::entrypoint::deserialize`, so the instruction
//! processor runs against real `AccountInfo`s.

#![allow(dead_code)]

use core::mem::MaybeUninit;

use keystone_program::{instruction::KeystoneInstruction, processor::process_instruction};
use pinocchio::{
    account_info::{AccountInfo, MAX_PERMITTED_DATA_INCREASE},
    entrypoint::{deserialize, NON_DUP_MARKER},
    pubkey::Pubkey,
    ProgramResult,
};

pub const SMART_ACCOUNT: Pubkey = [0xac; 32];
pub const PAYER: Pubkey = [0xba; 32];
pub const SYSTEM_PROGRAM: Pubkey = [0; 32];

const MAX_ACCOUNTS: usize = 8;

/// One account as the loader would serialize it.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
    pub data: Vec<u8>,
}

impl TestAccount {
    pub fn new(key: Pubkey) -> Self {
        Self {
            key,
            owner: SYSTEM_PROGRAM,
            is_signer: false,
            is_writable: false,
            data: vec![],
        }
    }

    pub fn signer(mut self) -> Self {
        self.is_signer = true;
        self
    }

    pub fn writable(mut self) -> Self {
        self.is_writable = true;
        self
    }

    pub fn owned_by(mut self, owner: Pubkey) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_data(mut self, data: &[u8]) -> Self {
        self.data = data.to_vec();
        self
    }
}

/// Serialized program input. Keeps the buffer alive for its `AccountInfo`s.
pub struct AccountSet {
    _buffer: Vec<u64>,
    infos: Vec<AccountInfo>,
}

impl AccountSet {
    pub fn new(accounts: &[TestAccount]) -> Self {
        let mut bytes = (accounts.len() as u64).to_le_bytes().to_vec();
        for account in accounts {
            bytes.push(NON_DUP_MARKER);
            bytes.push(account.is_signer as u8);
            bytes.push(account.is_writable as u8);
            // executable, then the resize delta
            bytes.extend_from_slice(&[0; 5]);
            bytes.extend_from_slice(&account.key);
            bytes.extend_from_slice(&account.owner);
            bytes.extend_from_slice(&1_000_000_000u64.to_le_bytes());
            bytes.extend_from_slice(&(account.data.len() as u64).to_le_bytes());
            bytes.extend_from_slice(&account.data);
            bytes.resize(bytes.len() + MAX_PERMITTED_DATA_INCREASE, 0);
            bytes.resize(bytes.len().next_multiple_of(8), 0);
            // rent epoch
            bytes.extend_from_slice(&0u64.to_le_bytes());
        }
        // no instruction data, then the program id
        bytes.extend_from_slice(&0u64.to_le_bytes());
        bytes.extend_from_slice(&keystone_program::ID);
        bytes.resize(bytes.len().next_multiple_of(8), 0);

        let mut buffer: Vec<u64> = bytes
            .chunks_exact(8)
            .map(|chunk| u64::from_ne_bytes(chunk.try_into().unwrap()))
            .collect();

        const UNINIT: MaybeUninit<AccountInfo> = MaybeUninit::<AccountInfo>::uninit();
        let mut slots = [UNINIT; MAX_ACCOUNTS];
        let (_, count, _) =
            unsafe { deserialize::<MAX_ACCOUNTS>(buffer.as_mut_ptr() as *mut u8, &mut slots) };
        let infos = slots[..count]
            .iter()
            .map(|slot| unsafe { slot.assume_init_read() })
            .collect();

        Self {
            _buffer: buffer,
            infos,
        }
    }

    pub fn infos(&self) -> &[AccountInfo] {
        &self.infos
    }

    /// Current data of the account at `index`.
    pub fn data(&self, index: usize) -> Vec<u8> {
        self.infos[index].try_borrow_data().unwrap().to_vec()
    }

    pub fn process(&self, instruction: &KeystoneInstruction) -> ProgramResult {
        let data = borsh::to_vec(instruction).unwrap();
        process_instruction(&keystone_program::ID, &self.infos, &data)
    }
}

/// Canonical address and bump for `seeds`.
pub fn canonical_pda(seeds: &[&[u8]]) -> (Pubkey, u8) {
    keystone_assertions::find_self_address(seeds).unwrap()
}

/// A valid program address for `seeds` with a bump below the canonical one.
pub fn non_canonical_pda(seeds: &[&[u8]]) -> (Pubkey, u8) {
    let program_id = solana_pubkey::Pubkey::new_from_array(keystone_program::ID);
    let (_, canonical) = canonical_pda(seeds);
    (0..canonical)
        .rev()
        .find_map(|bump| {
            let bump_seed = [bump];
            let mut with_bump = seeds.to_vec();
            with_bump.push(&bump_seed);
            solana_pubkey::Pubkey::create_program_address(&with_bump, &program_id)
                .ok()
                .map(|pda| (pda.to_bytes(), bump))
        })
        .unwrap()
}

/// The four accounts of `InitOwner` / `SetSessionRoot`.
pub fn record_accounts(smart_account: TestAccount, record: TestAccount) -> AccountSet {
    AccountSet::new(&[
        smart_account,
        record,
        TestAccount::new(PAYER).signer().writable(),
        TestAccount::new(SYSTEM_PROGRAM),
    ])
}
