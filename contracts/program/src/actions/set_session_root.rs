//! SetSessionRoot instruction handler

use keystone_assertions::{
    check_canonical_bump, check_self_owned, check_signer, check_system_program, check_writable,
    check_writable_signer, find_self_pda,
};
use keystone_state::{session_seeds, session_seeds_with_bump, SessionRecord, TransmutableMut};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{create_record, RecordAccounts};
use crate::error::KeystoneError;

pub fn process_set_session_root(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    root: [u8; 32],
    bump: u8,
) -> ProgramResult {
    let RecordAccounts {
        smart_account,
        record,
        payer,
        system_program,
    } = RecordAccounts::parse(accounts)?;

    check_signer(smart_account, ProgramError::MissingRequiredSignature)?;
    check_writable_signer(payer, ProgramError::MissingRequiredSignature)?;
    check_writable(record, ProgramError::InvalidAccountData)?;
    check_system_program(system_program, ProgramError::IncorrectProgramId)?;

    let canonical_bump = find_self_pda(
        &session_seeds(smart_account.key()),
        record.key(),
        KeystoneError::InvalidPDA,
    )?;
    check_canonical_bump(bump, canonical_bump, KeystoneError::InvalidPDA)?;
    let bump_arr = [canonical_bump];
    let seeds = session_seeds_with_bump(smart_account.key(), &bump_arr);

    if record.data_len() == 0 {
        create_record(program_id, payer, record, &seeds, SessionRecord::LEN)?;
        msg!("Session record created for {:?}", smart_account.key());
    } else {
        check_self_owned(record, ProgramError::IllegalOwner)?;
        if record.data_len() != SessionRecord::LEN {
            return Err(KeystoneError::InvalidRecordAccount.into());
        }
    }

    let mut data = record.try_borrow_mut_data()?;
    SessionRecord::load_mut(&mut data)?.set_root(root, canonical_bump);

    msg!("Session root set: {:?}", root);
    Ok(())
}
