//! Local entry point.
//!
//! Runs batches of operations through the same account validation the
//! program performs, keeping the per-sender nonce ledger the way an
//! ERC-4337 entry point does: an operation must carry the sender's current
//! nonce and the nonce advances only when validation succeeds.

use std::collections::HashMap;

use keystone_program::policies::BUILTIN_POLICIES;
use keystone_state::{
    validate_user_op, Address, OwnerRecord, PolicySet, SessionRecord, UserOperation,
    ValidationContext, ValidationError, ValidationStatus,
};
use solana_sdk::pubkey::Pubkey;

use crate::{
    core::constants::KEYSTONE_PROGRAM_ID,
    error::{KeystoneSdkError, Result},
    types::{AccountState, EntryPointConfig, FailedOp},
    utils::{derive_owner_pda, derive_session_pda},
};

pub const INVALID_NONCE: &str = "AA25 invalid account nonce";
pub const SIGNATURE_ERROR: &str = "AA24 signature error";
pub const REVERTED: &str = "AA23 reverted";

pub struct EntryPoint {
    config: EntryPointConfig,
    nonces: HashMap<Pubkey, u64>,
    accounts: HashMap<Pubkey, AccountState>,
    policies: PolicySet<'static>,
}

impl EntryPoint {
    pub fn new(config: EntryPointConfig) -> Self {
        Self {
            config,
            nonces: HashMap::new(),
            accounts: HashMap::new(),
            policies: BUILTIN_POLICIES,
        }
    }

    /// Replace the scope checkers sessions may name.
    pub fn with_policies(mut self, policies: PolicySet<'static>) -> Self {
        self.policies = policies;
        self
    }

    pub fn config(&self) -> &EntryPointConfig {
        &self.config
    }

    pub fn operation_hash(&self, operation: &UserOperation) -> [u8; 32] {
        operation.hash(&self.config.entry_point.to_bytes(), self.config.chain_id)
    }

    pub fn get_nonce(&self, sender: &Pubkey) -> u64 {
        self.nonces.get(sender).copied().unwrap_or_default()
    }

    pub fn account(&self, smart_account: &Pubkey) -> AccountState {
        self.accounts.get(smart_account).copied().unwrap_or_default()
    }

    /// Bind the owner of `smart_account`, once. Only the account itself may call.
    pub fn init_owner(
        &mut self,
        caller: &Pubkey,
        smart_account: &Pubkey,
        owner: Address,
    ) -> Result<()> {
        check_self_call(caller, smart_account)?;
        let (_, bump) = derive_owner_pda(&KEYSTONE_PROGRAM_ID, smart_account);
        let state = self.accounts.entry(*smart_account).or_default();
        if state.owner.is_some() {
            return Err(ValidationError::AlreadyInitialized.into());
        }
        state.owner = Some(OwnerRecord::new(owner, bump));
        Ok(())
    }

    /// Replace the session root of `smart_account`. Only the account itself may call.
    pub fn set_session_root(
        &mut self,
        caller: &Pubkey,
        smart_account: &Pubkey,
        root: [u8; 32],
    ) -> Result<()> {
        check_self_call(caller, smart_account)?;
        let (_, bump) = derive_session_pda(&KEYSTONE_PROGRAM_ID, smart_account);
        let state = self.accounts.entry(*smart_account).or_default();
        state.session = Some(SessionRecord::new(root, bump));
        Ok(())
    }

    /// Validates `operations` in order at time `now`.
    ///
    /// Each failure is reported for its own index only; later operations
    /// still run.
    pub fn handle_ops(&mut self, operations: &[UserOperation], now: u64) -> Vec<std::result::Result<(), FailedOp>> {
        operations
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                self.handle_op(operation, now)
                    .map_err(|reason| FailedOp { index, reason })
            })
            .collect()
    }

    fn handle_op(&mut self, operation: &UserOperation, now: u64) -> std::result::Result<(), String> {
        let sender = Pubkey::new_from_array(operation.sender);
        if operation.nonce != self.get_nonce(&sender) {
            return Err(INVALID_NONCE.to_string());
        }

        let operation_hash = self.operation_hash(operation);
        let state = self.account(&sender);
        let ctx = ValidationContext {
            account: &operation.sender,
            owner: state.owner.as_ref(),
            session: state.session.as_ref(),
            policies: &self.policies,
            now,
        };

        match validate_user_op(&ctx, operation, &operation_hash) {
            Ok(ValidationStatus::Success) => {
                *self.nonces.entry(sender).or_default() += 1;
                Ok(())
            },
            Ok(ValidationStatus::SignatureFailed) => Err(SIGNATURE_ERROR.to_string()),
            Err(e) => Err(format!("{REVERTED}: {e}")),
        }
    }
}

fn check_self_call(caller: &Pubkey, smart_account: &Pubkey) -> Result<()> {
    if caller != smart_account {
        return Err(KeystoneSdkError::Unauthorized(format!(
            "{caller} cannot modify records of {smart_account}"
        )));
    }
    Ok(())
}

impl Default for EntryPoint {
    fn default() -> Self {
        Self::new(EntryPointConfig::default())
    }
}
