use keystone_state::{
    constants::{OWNER_SEED, SESSION_SEED},
    OwnerRecord, SessionRecord, Transmutable,
};
use solana_sdk::pubkey::Pubkey;

use crate::error::{KeystoneSdkError, Result};

//=============================================================================
// PDA Derivation Helpers
//=============================================================================

/// Derive the owner record PDA of a smart account
pub fn derive_owner_pda(program_id: &Pubkey, smart_account: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[OWNER_SEED, smart_account.as_ref()], program_id)
}

/// Derive the session record PDA of a smart account
pub fn derive_session_pda(program_id: &Pubkey, smart_account: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SESSION_SEED, smart_account.as_ref()], program_id)
}

//=============================================================================
// Account Parsing
//=============================================================================

/// Parse an owner record from account data
pub fn parse_owner_record(data: &[u8]) -> Result<OwnerRecord> {
    let record = OwnerRecord::load(data).map_err(|e| {
        KeystoneSdkError::InvalidAccountData(format!("Failed to parse owner record: {:?}", e))
    })?;
    if !record.is_initialized() {
        return Err(KeystoneSdkError::InvalidAccountData(
            "Owner record not initialized".to_string(),
        ));
    }
    Ok(*record)
}

/// Parse a session record from account data
pub fn parse_session_record(data: &[u8]) -> Result<SessionRecord> {
    let record = SessionRecord::load(data).map_err(|e| {
        KeystoneSdkError::InvalidAccountData(format!("Failed to parse session record: {:?}", e))
    })?;
    if !record.is_initialized() {
        return Err(KeystoneSdkError::InvalidAccountData(
            "Session record not initialized".to_string(),
        ));
    }
    Ok(*record)
}
