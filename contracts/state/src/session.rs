//! Session key manager.
//!
//! An account stores a single Merkle root. Every leaf of the tree is the
//! keccak hash of a session leaf: a time window, a scope checker, the session
//! key and opaque scope data. A session key signs operations on its own and
//! proves membership of its leaf; the scope checker then decides whether the
//! call fits the delegation.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constants::{MAX_SESSION_TIMESTAMP, SIGNATURE_LEN},
    crypto::{eth_signed_message_hash, keccak256, recover_signer},
    error::ValidationError,
    merkle,
    operation::UserOperation,
    policy::PolicyRegistry,
    Address, Discriminator, IntoBytes, Transmutable, TransmutableMut,
};

const TIMESTAMP_LEN: usize = 6;

/// Session root of a smart account.
///
/// PDA Seeds: ["keystone-session", account]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Account type discriminator (= 2)
    pub discriminator: u8,

    /// PDA bump seed
    pub bump: u8,

    /// Root of the tree of enabled session leaves
    pub root: [u8; 32],
}

impl SessionRecord {
    /// 1 + 1 + 32 = 34 bytes
    pub const LEN: usize = 34;

    pub fn new(root: [u8; 32], bump: u8) -> Self {
        Self {
            discriminator: Discriminator::SessionRecord as u8,
            bump,
            root,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.discriminator == Discriminator::SessionRecord as u8
    }

    /// Replaces the root wholesale.
    pub fn set_root(&mut self, root: [u8; 32], bump: u8) {
        *self = Self::new(root, bump);
    }
}

impl Transmutable for SessionRecord {
    const LEN: usize = core::mem::size_of::<SessionRecord>();
}

impl TransmutableMut for SessionRecord {}

impl IntoBytes for SessionRecord {
    fn into_bytes(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) }
    }
}

/// Decoded session leaf.
///
/// Layout: `[valid_until: u48 BE][valid_after: u48 BE][scope_module: 20]
/// [session_key: 20][scope_data ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLeaf<'a> {
    /// Last valid timestamp, 0 for no expiry
    pub valid_until: u64,
    pub valid_after: u64,
    pub scope_module: Address,
    pub session_key: Address,
    pub scope_data: &'a [u8],
}

impl<'a> SessionLeaf<'a> {
    /// Size of the fixed part preceding the scope data
    pub const HEADER_LEN: usize = 2 * TIMESTAMP_LEN + 20 + 20;

    pub fn decode(data: &'a [u8]) -> Result<Self, ValidationError> {
        if data.len() < Self::HEADER_LEN {
            return Err(ValidationError::MalformedSignature);
        }
        let (valid_until, rest) = data.split_at(TIMESTAMP_LEN);
        let (valid_after, rest) = rest.split_at(TIMESTAMP_LEN);
        let (scope_module, rest) = rest.split_at(20);
        let (session_key, scope_data) = rest.split_at(20);

        Ok(Self {
            valid_until: read_u48(valid_until),
            valid_after: read_u48(valid_after),
            scope_module: to_address(scope_module),
            session_key: to_address(session_key),
            scope_data,
        })
    }

    /// Packs the leaf back into its wire form.
    pub fn encode(&self) -> Result<Vec<u8>, ValidationError> {
        let mut data = Vec::with_capacity(Self::HEADER_LEN + self.scope_data.len());
        data.extend_from_slice(&write_u48(self.valid_until)?);
        data.extend_from_slice(&write_u48(self.valid_after)?);
        data.extend_from_slice(&self.scope_module);
        data.extend_from_slice(&self.session_key);
        data.extend_from_slice(self.scope_data);
        Ok(data)
    }

    pub fn leaf_hash(&self) -> Result<[u8; 32], ValidationError> {
        Ok(keccak256(&self.encode()?))
    }

    /// Checks the leaf's time window against `now`.
    pub fn check_window(&self, now: u64) -> Result<(), ValidationError> {
        if self.valid_until != 0 && now > self.valid_until {
            return Err(ValidationError::SessionExpired);
        }
        if now < self.valid_after {
            return Err(ValidationError::NotYetValid);
        }
        Ok(())
    }
}

fn write_u48(timestamp: u64) -> Result<[u8; TIMESTAMP_LEN], ValidationError> {
    if timestamp > MAX_SESSION_TIMESTAMP {
        return Err(ValidationError::TimestampOutOfRange);
    }
    let mut bytes = [0u8; TIMESTAMP_LEN];
    bytes.copy_from_slice(&timestamp.to_be_bytes()[2..]);
    Ok(bytes)
}

fn read_u48(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64)
}

fn to_address(bytes: &[u8]) -> Address {
    let mut address = [0u8; 20];
    address.copy_from_slice(bytes);
    address
}

/// Module-specific signature of the session key manager.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSignature {
    pub leaf_data: Vec<u8>,
    pub proof: Vec<[u8; 32]>,
    pub signature: [u8; SIGNATURE_LEN],
}

impl SessionSignature {
    pub fn parse(payload: &[u8]) -> Result<Self, ValidationError> {
        Self::try_from_slice(payload).map_err(|_| ValidationError::MalformedSignature)
    }

    pub fn encode(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }
}

/// Checks that a session key authorized `operation` under the account's root.
///
/// Gates run in order: root present, leaf membership, time window, session
/// key signature, scope policy.
pub fn validate_session_signature(
    record: Option<&SessionRecord>,
    operation: &UserOperation,
    operation_hash: &[u8; 32],
    payload: &[u8],
    now: u64,
    policies: &dyn PolicyRegistry,
) -> Result<(), ValidationError> {
    let root = match record {
        Some(record) if record.is_initialized() => record.root,
        _ => return Err(ValidationError::NotInitialized),
    };

    let session = SessionSignature::parse(payload)?;

    let leaf = keccak256(&session.leaf_data);
    if !merkle::verify(&root, &leaf, &session.proof) {
        return Err(ValidationError::InvalidProof);
    }

    let leaf = SessionLeaf::decode(&session.leaf_data)?;
    leaf.check_window(now)?;

    let signer = recover_signer(&eth_signed_message_hash(operation_hash), &session.signature)?;
    if signer != leaf.session_key {
        return Err(ValidationError::SignatureMismatch);
    }

    let policy = policies
        .resolve(&leaf.scope_module)
        .ok_or(ValidationError::UnknownScopeModule)?;
    let call = operation.account_call()?;
    if !policy.check_scope(&call.destination, call.value, &call.data, leaf.scope_data) {
        return Err(ValidationError::PolicyViolation);
    }
    Ok(())
}
