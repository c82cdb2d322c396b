pub mod init_owner;
pub mod set_session_root;
pub mod validate_operation;

pub use init_owner::*;
pub use set_session_root::*;
pub use validate_operation::*;

use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::CreateAccount;

/// Accounts shared by the two record-writing instructions.
pub struct RecordAccounts<'a> {
    pub smart_account: &'a AccountInfo,
    pub record: &'a AccountInfo,
    pub payer: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
}

impl<'a> RecordAccounts<'a> {
    pub fn parse(accounts: &'a [AccountInfo]) -> Result<Self, ProgramError> {
        let mut account_info_iter = accounts.iter();
        let smart_account = account_info_iter
            .next()
            .ok_or(ProgramError::NotEnoughAccountKeys)?;
        let record = account_info_iter
            .next()
            .ok_or(ProgramError::NotEnoughAccountKeys)?;
        let payer = account_info_iter
            .next()
            .ok_or(ProgramError::NotEnoughAccountKeys)?;
        let system_program = account_info_iter
            .next()
            .ok_or(ProgramError::NotEnoughAccountKeys)?;
        Ok(Self {
            smart_account,
            record,
            payer,
            system_program,
        })
    }
}

/// Creates a program-owned record PDA of `space` bytes, funded by `payer`.
pub fn create_record(
    program_id: &Pubkey,
    payer: &AccountInfo,
    record: &AccountInfo,
    seeds: &[&[u8]; 3],
    space: usize,
) -> ProgramResult {
    let lamports = Rent::get()?.minimum_balance(space);

    let seed_list = [
        Seed::from(seeds[0]),
        Seed::from(seeds[1]),
        Seed::from(seeds[2]),
    ];
    let signer = Signer::from(&seed_list);

    CreateAccount {
        from: payer,
        to: record,
        lamports,
        space: space as u64,
        owner: program_id,
    }
    .invoke_signed(&[signer])
}
