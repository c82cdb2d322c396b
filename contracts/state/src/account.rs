//! Account-side validation glue.
//!
//! The account receives an operation from the entry point, strips the module
//! id trailing the signature and forwards the rest to that validator module.

use pinocchio::pubkey::Pubkey;

use crate::{
    constants::{MODULE_ID_LEN, MULTICHAIN_VALIDATOR_ID, SESSION_KEY_MANAGER_ID},
    error::ValidationError,
    multichain::{validate_owner_signature, OwnerRecord},
    operation::UserOperation,
    policy::PolicyRegistry,
    session::{validate_session_signature, SessionRecord},
    Address,
};

/// Status reported back to the entry point.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Success = 0,
    SignatureFailed = 1,
}

/// Everything a validator module reads while validating one operation.
pub struct ValidationContext<'a> {
    /// The smart account the operation is validated for
    pub account: &'a Pubkey,
    pub owner: Option<&'a OwnerRecord>,
    pub session: Option<&'a SessionRecord>,
    pub policies: &'a dyn PolicyRegistry,
    /// Unix timestamp of execution
    pub now: u64,
}

/// Splits `signature` into the module payload and the trailing module id.
pub fn split_module_signature(signature: &[u8]) -> Result<(&[u8], Address), ValidationError> {
    let split = signature
        .len()
        .checked_sub(MODULE_ID_LEN)
        .ok_or(ValidationError::MalformedSignature)?;
    let (payload, module) = signature.split_at(split);
    let mut module_id = [0u8; MODULE_ID_LEN];
    module_id.copy_from_slice(module);
    Ok((payload, module_id))
}

/// Appends `module_id` to a module payload.
pub fn wrap_module_signature(payload: &[u8], module_id: &Address) -> Vec<u8> {
    let mut signature = Vec::with_capacity(payload.len() + MODULE_ID_LEN);
    signature.extend_from_slice(payload);
    signature.extend_from_slice(module_id);
    signature
}

/// Routes the operation to the module named by its signature.
pub fn validate_operation(
    ctx: &ValidationContext,
    operation: &UserOperation,
    operation_hash: &[u8; 32],
) -> Result<(), ValidationError> {
    if &operation.sender != ctx.account {
        return Err(ValidationError::SenderMismatch);
    }

    let (payload, module_id) = split_module_signature(&operation.signature)?;
    match module_id {
        MULTICHAIN_VALIDATOR_ID => validate_owner_signature(ctx.owner, operation_hash, payload),
        SESSION_KEY_MANAGER_ID => validate_session_signature(
            ctx.session,
            operation,
            operation_hash,
            payload,
            ctx.now,
            ctx.policies,
        ),
        _ => Err(ValidationError::UnknownModule),
    }
}

/// Validates an operation and maps the outcome to an entry point status.
///
/// A signer mismatch is reported as `SignatureFailed`; every other failure
/// reverts validation.
pub fn validate_user_op(
    ctx: &ValidationContext,
    operation: &UserOperation,
    operation_hash: &[u8; 32],
) -> Result<ValidationStatus, ValidationError> {
    match validate_operation(ctx, operation, operation_hash) {
        Ok(()) => Ok(ValidationStatus::Success),
        Err(ValidationError::SignatureMismatch) => Ok(ValidationStatus::SignatureFailed),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        crypto::keccak256,
        policy::PolicySet,
        testing::{address_of, sign_message, OWNER_KEY, STRANGER_KEY},
    };

    const ACCOUNT: Pubkey = [5; 32];

    fn ctx<'a>(owner: Option<&'a OwnerRecord>, policies: &'a PolicySet<'a>) -> ValidationContext<'a> {
        ValidationContext {
            account: &ACCOUNT,
            owner,
            session: None,
            policies,
            now: 0,
        }
    }

    fn signed(key: &[u8; 32]) -> (UserOperation, [u8; 32]) {
        let mut op = UserOperation {
            sender: ACCOUNT,
            nonce: 0,
            ..Default::default()
        };
        let hash = op.hash(&[1; 32], 1);
        op.signature = wrap_module_signature(&sign_message(key, &hash), &MULTICHAIN_VALIDATOR_ID);
        (op, hash)
    }

    #[test]
    fn test_split_module_signature() {
        let signature = wrap_module_signature(&[1, 2, 3], &SESSION_KEY_MANAGER_ID);
        assert_eq!(
            split_module_signature(&signature),
            Ok((&[1u8, 2, 3][..], SESSION_KEY_MANAGER_ID))
        );
        assert_eq!(
            split_module_signature(&[0u8; 19]),
            Err(ValidationError::MalformedSignature)
        );
        assert_eq!(split_module_signature(&[7u8; 20]), Ok((&[][..], [7u8; 20])));
    }

    #[test]
    fn test_status_mapping() {
        let owner = OwnerRecord::new(address_of(&OWNER_KEY), 255);
        let policies = PolicySet::new(&[]);
        let ctx = ctx(Some(&owner), &policies);

        let (op, hash) = signed(&OWNER_KEY);
        assert_eq!(validate_user_op(&ctx, &op, &hash), Ok(ValidationStatus::Success));

        let (op, hash) = signed(&STRANGER_KEY);
        assert_eq!(
            validate_user_op(&ctx, &op, &hash),
            Ok(ValidationStatus::SignatureFailed)
        );
    }

    #[test]
    fn test_routing_failures() {
        let owner = OwnerRecord::new(address_of(&OWNER_KEY), 255);
        let policies = PolicySet::new(&[]);
        let ctx = ctx(Some(&owner), &policies);

        let (mut op, hash) = signed(&OWNER_KEY);
        op.signature.truncate(op.signature.len() - 1);
        op.signature.push(b'?');
        assert_eq!(
            validate_user_op(&ctx, &op, &hash),
            Err(ValidationError::UnknownModule)
        );

        let (mut op, hash) = signed(&OWNER_KEY);
        op.sender = [6; 32];
        assert_eq!(
            validate_user_op(&ctx, &op, &hash),
            Err(ValidationError::SenderMismatch)
        );

        let (op, _) = signed(&OWNER_KEY);
        assert_eq!(
            validate_user_op(&ctx, &op, &keccak256(b"other")),
            Ok(ValidationStatus::SignatureFailed)
        );

        let session_ctx = ValidationContext {
            account: &ACCOUNT,
            owner: None,
            session: None,
            policies: &policies,
            now: 0,
        };
        let mut op = op;
        op.signature = wrap_module_signature(&[], &SESSION_KEY_MANAGER_ID);
        assert_eq!(
            validate_user_op(&session_ctx, &op, &hash),
            Err(ValidationError::NotInitialized)
        );
    }
}
