//! InitOwner instruction handler

use keystone_assertions::{
    check_canonical_bump, check_signer, check_system_program, check_writable,
    check_writable_signer, find_self_pda,
};
use keystone_state::{
    owner_seeds, owner_seeds_with_bump, Address, OwnerRecord, TransmutableMut, ValidationError,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{create_record, RecordAccounts};
use crate::error::KeystoneError;

pub fn process_init_owner(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    owner: Address,
    bump: u8,
) -> ProgramResult {
    let RecordAccounts {
        smart_account,
        record,
        payer,
        system_program,
    } = RecordAccounts::parse(accounts)?;

    // only the account itself may bind its owner
    check_signer(smart_account, ProgramError::MissingRequiredSignature)?;
    check_writable_signer(payer, ProgramError::MissingRequiredSignature)?;
    check_writable(record, ProgramError::InvalidAccountData)?;
    check_system_program(system_program, ProgramError::IncorrectProgramId)?;

    // one owner record per account: only the canonical address is accepted
    let canonical_bump = find_self_pda(
        &owner_seeds(smart_account.key()),
        record.key(),
        KeystoneError::InvalidPDA,
    )?;
    check_canonical_bump(bump, canonical_bump, KeystoneError::InvalidPDA)?;
    let bump_arr = [canonical_bump];
    let seeds = owner_seeds_with_bump(smart_account.key(), &bump_arr);

    if record.data_len() != 0 {
        msg!("Owner already bound for {:?}", smart_account.key());
        return Err(ValidationError::AlreadyInitialized.into());
    }

    create_record(program_id, payer, record, &seeds, OwnerRecord::LEN)?;

    let mut data = record.try_borrow_mut_data()?;
    OwnerRecord::load_mut(&mut data)?.initialize(owner, canonical_bump)?;

    msg!("Owner bound:");
    msg!("  Account: {:?}", smart_account.key());
    msg!("  Owner: {:?}", owner);
    Ok(())
}
