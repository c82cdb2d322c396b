//! ValidateOperation instruction handler

use keystone_assertions::{check_canonical_bump, find_self_pda};
use keystone_state::{
    owner_seeds, session_seeds, validate_user_op, OwnerRecord, SessionRecord, Transmutable,
    UserOperation, ValidationContext, ValidationError, ValidationStatus,
};
use pinocchio::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};

use crate::{error::KeystoneError, policies::BUILTIN_POLICIES};

/// Loads the owner record if `account` holds one for `smart_account`.
///
/// `account` must be the canonical owner record address. An address this
/// program does not own yet reads as "not initialized".
fn load_owner<'a>(
    program_id: &Pubkey,
    smart_account: &Pubkey,
    account: &AccountInfo,
    data: &'a [u8],
) -> Result<Option<&'a OwnerRecord>, ProgramError> {
    let bump = find_self_pda(&owner_seeds(smart_account), account.key(), KeystoneError::InvalidPDA)?;
    if !account.is_owned_by(program_id) || data.len() < OwnerRecord::LEN {
        return Ok(None);
    }
    let record = OwnerRecord::load(data)?;
    if !record.is_initialized() {
        return Ok(None);
    }
    check_canonical_bump(record.bump, bump, KeystoneError::InvalidRecordAccount)?;
    Ok(Some(record))
}

fn load_session<'a>(
    program_id: &Pubkey,
    smart_account: &Pubkey,
    account: &AccountInfo,
    data: &'a [u8],
) -> Result<Option<&'a SessionRecord>, ProgramError> {
    let bump = find_self_pda(&session_seeds(smart_account), account.key(), KeystoneError::InvalidPDA)?;
    if !account.is_owned_by(program_id) || data.len() < SessionRecord::LEN {
        return Ok(None);
    }
    let record = SessionRecord::load(data)?;
    if !record.is_initialized() {
        return Ok(None);
    }
    check_canonical_bump(record.bump, bump, KeystoneError::InvalidRecordAccount)?;
    Ok(Some(record))
}

pub fn process_validate_operation(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    operation: &UserOperation,
    operation_hash: &[u8; 32],
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let smart_account = account_info_iter
        .next()
        .ok_or(ProgramError::NotEnoughAccountKeys)?;
    let owner_account = account_info_iter
        .next()
        .ok_or(ProgramError::NotEnoughAccountKeys)?;
    let session_account = account_info_iter
        .next()
        .ok_or(ProgramError::NotEnoughAccountKeys)?;

    if &operation.sender != smart_account.key() {
        msg!("Operation {}: sender is not {:?}", operation.nonce, smart_account.key());
        return Err(ValidationError::SenderMismatch.into());
    }

    let owner_data = owner_account.try_borrow_data()?;
    let owner = load_owner(program_id, smart_account.key(), owner_account, &owner_data)?;
    let session_data = session_account.try_borrow_data()?;
    let session = load_session(program_id, smart_account.key(), session_account, &session_data)?;

    let now = Clock::get()?.unix_timestamp.max(0) as u64;

    let ctx = ValidationContext {
        account: smart_account.key(),
        owner,
        session,
        policies: &BUILTIN_POLICIES,
        now,
    };

    match validate_user_op(&ctx, operation, operation_hash) {
        Ok(ValidationStatus::Success) => {
            msg!("Operation {} validated", operation.nonce);
            Ok(())
        },
        Ok(ValidationStatus::SignatureFailed) => {
            msg!("Operation {}: signature validation failed", operation.nonce);
            Err(KeystoneError::SignatureValidationFailed.into())
        },
        Err(e) => {
            msg!("Operation {} rejected: {}", operation.nonce, e);
            Err(e.into())
        },
    }
}
