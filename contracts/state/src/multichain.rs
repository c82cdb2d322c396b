//! Multichain ECDSA validator.
//!
//! An account binds one owner address. The owner either signs an operation
//! hash directly (single-chain) or signs the root of a Merkle tree whose
//! leaves are operation hashes for several chains, in which case each chain
//! receives the root, the signature and the proof for its own operation.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constants::{MULTICHAIN_TAG, SIGNATURE_LEN},
    crypto::{eth_signed_message_hash, recover_signer},
    error::ValidationError,
    merkle,
    Address, Discriminator, IntoBytes, Transmutable, TransmutableMut,
};

/// Owner binding of a smart account.
///
/// PDA Seeds: ["keystone-owner", account]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnerRecord {
    /// Account type discriminator (= 1)
    pub discriminator: u8,

    /// PDA bump seed
    pub bump: u8,

    /// Owner address allowed to sign for the account
    pub owner: Address,
}

impl OwnerRecord {
    /// 1 + 1 + 20 = 22 bytes
    pub const LEN: usize = 22;

    pub fn new(owner: Address, bump: u8) -> Self {
        Self {
            discriminator: Discriminator::OwnerRecord as u8,
            bump,
            owner,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.discriminator == Discriminator::OwnerRecord as u8
    }

    /// Binds `owner`. The binding can only happen once.
    pub fn initialize(&mut self, owner: Address, bump: u8) -> Result<(), ValidationError> {
        if self.is_initialized() {
            return Err(ValidationError::AlreadyInitialized);
        }
        *self = Self::new(owner, bump);
        Ok(())
    }
}

impl Transmutable for OwnerRecord {
    const LEN: usize = core::mem::size_of::<OwnerRecord>();
}

impl TransmutableMut for OwnerRecord {}

impl IntoBytes for OwnerRecord {
    fn into_bytes(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) }
    }
}

/// Owner signature over a Merkle root of operation hashes.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct MultichainSignature {
    pub root: [u8; 32],
    pub proof: Vec<[u8; 32]>,
    pub signature: [u8; SIGNATURE_LEN],
}

impl MultichainSignature {
    /// Payload bytes: the multichain tag followed by the borsh encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut payload =
            Vec::with_capacity(1 + 32 + 4 + self.proof.len() * 32 + SIGNATURE_LEN);
        payload.push(MULTICHAIN_TAG);
        // borsh layout: root, u32 LE proof length, proof nodes, signature
        payload.extend_from_slice(&self.root);
        payload.extend_from_slice(&(self.proof.len() as u32).to_le_bytes());
        for node in &self.proof {
            payload.extend_from_slice(node);
        }
        payload.extend_from_slice(&self.signature);
        payload
    }
}

/// The two payload shapes accepted by the multichain validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerSignature<'a> {
    /// Raw 65 byte signature over the operation hash
    SingleChain(&'a [u8]),
    /// Signature over a root plus the proof for the operation hash
    Multichain(MultichainSignature),
}

impl<'a> OwnerSignature<'a> {
    pub fn parse(payload: &'a [u8]) -> Result<Self, ValidationError> {
        match payload.split_first() {
            Some((&MULTICHAIN_TAG, rest)) if payload.len() != SIGNATURE_LEN => {
                MultichainSignature::try_from_slice(rest)
                    .map(OwnerSignature::Multichain)
                    .map_err(|_| ValidationError::MalformedSignature)
            },
            _ if payload.len() == SIGNATURE_LEN => Ok(OwnerSignature::SingleChain(payload)),
            _ => Err(ValidationError::MalformedSignature),
        }
    }
}

/// Checks that `payload` authorizes `operation_hash` for the bound owner.
pub fn validate_owner_signature(
    owner: Option<&OwnerRecord>,
    operation_hash: &[u8; 32],
    payload: &[u8],
) -> Result<(), ValidationError> {
    let owner = match owner {
        Some(record) if record.is_initialized() => record.owner,
        _ => return Err(ValidationError::NotInitialized),
    };

    match OwnerSignature::parse(payload)? {
        OwnerSignature::SingleChain(signature) => {
            let signer = recover_signer(&eth_signed_message_hash(operation_hash), signature)?;
            if signer != owner {
                return Err(ValidationError::SignatureMismatch);
            }
        },
        OwnerSignature::Multichain(multichain) => {
            if !merkle::verify(&multichain.root, operation_hash, &multichain.proof) {
                return Err(ValidationError::InvalidProof);
            }
            let signer = recover_signer(
                &eth_signed_message_hash(&multichain.root),
                &multichain.signature,
            )?;
            if signer != owner {
                return Err(ValidationError::SignatureMismatch);
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        crypto::keccak256,
        merkle::hash_pair,
        testing::{address_of, sign_message, OWNER_KEY, STRANGER_KEY},
    };
    use assert_matches::assert_matches;

    fn owner_record() -> OwnerRecord {
        OwnerRecord::new(address_of(&OWNER_KEY), 254)
    }

    /// Four operation hashes, the real one at index 2.
    fn tree() -> ([[u8; 32]; 4], [u8; 32]) {
        let leaves = [
            keccak256(b"decoy chain 1"),
            keccak256(b"decoy chain 10"),
            keccak256(b"real operation"),
            keccak256(b"decoy chain 137"),
        ];
        let root = hash_pair(
            &hash_pair(&leaves[0], &leaves[1]),
            &hash_pair(&leaves[2], &leaves[3]),
        );
        (leaves, root)
    }

    fn proof_for(leaves: &[[u8; 32]; 4], index: usize) -> Vec<[u8; 32]> {
        let sibling = leaves[index ^ 1];
        let other = if index < 2 {
            hash_pair(&leaves[2], &leaves[3])
        } else {
            hash_pair(&leaves[0], &leaves[1])
        };
        vec![sibling, other]
    }

    #[test]
    fn test_record_layout() {
        let record = owner_record();
        assert_eq!(OwnerRecord::LEN, 22);
        let bytes = record.into_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 254);
        assert_eq!(OwnerRecord::load(bytes).unwrap(), &record);
    }

    #[test]
    fn test_initialize_only_once() {
        let mut data = [0u8; OwnerRecord::LEN];
        let record = OwnerRecord::load_mut(&mut data).unwrap();
        assert!(!record.is_initialized());
        record.initialize([1; 20], 250).unwrap();
        assert_eq!(
            record.initialize([2; 20], 250),
            Err(ValidationError::AlreadyInitialized)
        );
        assert_eq!(record.owner, [1; 20]);
    }

    #[test]
    fn test_single_chain_signature() {
        let op_hash = keccak256(b"op");
        let signature = sign_message(&OWNER_KEY, &op_hash);
        assert_eq!(
            validate_owner_signature(Some(&owner_record()), &op_hash, &signature),
            Ok(())
        );

        let forged = sign_message(&STRANGER_KEY, &op_hash);
        assert_eq!(
            validate_owner_signature(Some(&owner_record()), &op_hash, &forged),
            Err(ValidationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_not_initialized_comes_first() {
        let op_hash = keccak256(b"op");
        assert_eq!(
            validate_owner_signature(None, &op_hash, &[0u8; 3]),
            Err(ValidationError::NotInitialized)
        );
        let blank = OwnerRecord::load(&[0u8; OwnerRecord::LEN]).unwrap();
        assert_eq!(
            validate_owner_signature(Some(blank), &op_hash, &[0u8; 65]),
            Err(ValidationError::NotInitialized)
        );
    }

    #[test]
    fn test_multichain_accepts_real_leaf() {
        let (leaves, root) = tree();
        let payload = MultichainSignature {
            root,
            proof: proof_for(&leaves, 2),
            signature: sign_message(&OWNER_KEY, &root),
        }
        .encode();
        assert_eq!(
            validate_owner_signature(Some(&owner_record()), &leaves[2], &payload),
            Ok(())
        );
    }

    #[test]
    fn test_multichain_wrong_proof_is_invalid_proof() {
        let (leaves, root) = tree();
        let payload = MultichainSignature {
            root,
            proof: proof_for(&leaves, 0),
            signature: sign_message(&OWNER_KEY, &root),
        }
        .encode();
        assert_eq!(
            validate_owner_signature(Some(&owner_record()), &leaves[2], &payload),
            Err(ValidationError::InvalidProof)
        );

        // proof is checked before the signature
        let payload = MultichainSignature {
            root,
            proof: proof_for(&leaves, 0),
            signature: sign_message(&STRANGER_KEY, &root),
        }
        .encode();
        assert_eq!(
            validate_owner_signature(Some(&owner_record()), &leaves[2], &payload),
            Err(ValidationError::InvalidProof)
        );
    }

    #[test]
    fn test_multichain_non_owner_signature() {
        let (leaves, root) = tree();
        let payload = MultichainSignature {
            root,
            proof: proof_for(&leaves, 2),
            signature: sign_message(&STRANGER_KEY, &root),
        }
        .encode();
        assert_eq!(
            validate_owner_signature(Some(&owner_record()), &leaves[2], &payload),
            Err(ValidationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_parse_shapes() {
        assert_matches!(
            OwnerSignature::parse(&[MULTICHAIN_TAG; 65]),
            Ok(OwnerSignature::SingleChain(_))
        );
        assert_eq!(
            OwnerSignature::parse(&[0u8; 64]),
            Err(ValidationError::MalformedSignature)
        );
        assert_eq!(
            OwnerSignature::parse(&[MULTICHAIN_TAG, 0, 0]),
            Err(ValidationError::MalformedSignature)
        );

        let multichain = MultichainSignature {
            root: [3; 32],
            proof: vec![[4; 32]],
            signature: [5; 65],
        };
        let payload = multichain.encode();
        assert_eq!(payload.len(), 1 + 32 + 4 + 32 + 65);
        assert_eq!(payload[0], MULTICHAIN_TAG);
        assert_eq!(&payload[1..], &borsh::to_vec(&multichain).unwrap()[..]);
        assert_eq!(
            OwnerSignature::parse(&payload),
            Ok(OwnerSignature::Multichain(multichain))
        );

        let mut trailing = payload;
        trailing.push(0);
        assert_eq!(
            OwnerSignature::parse(&trailing),
            Err(ValidationError::MalformedSignature)
        );
    }
}
