//! Encoders for the module signatures carried in `UserOperation::signature`.

use keystone_state::{
    account::wrap_module_signature,
    constants::{MULTICHAIN_VALIDATOR_ID, SESSION_KEY_MANAGER_ID},
    MultichainSignature, SessionSignature,
};

use crate::{core::signer::KeystoneSigner, error::Result, merkle::MerkleTree};

/// Owner signature over a single operation hash.
pub fn single_chain_signature(
    owner: &dyn KeystoneSigner,
    operation_hash: &[u8; 32],
) -> Result<Vec<u8>> {
    let signature = owner.sign_message(operation_hash)?;
    Ok(wrap_module_signature(&signature, &MULTICHAIN_VALIDATOR_ID))
}

/// One owner signature authorizing several operations, typically one per chain.
///
/// The owner signs the root of the tree of `operation_hashes` once; the
/// returned signatures are in the order of the hashes.
pub fn multichain_signatures(
    owner: &dyn KeystoneSigner,
    operation_hashes: &[[u8; 32]],
) -> Result<Vec<Vec<u8>>> {
    let tree = MerkleTree::new(operation_hashes.to_vec())?;
    let root = tree.root();
    let signature = owner.sign_message(&root)?;

    (0..operation_hashes.len())
        .map(|index| -> Result<Vec<u8>> {
            let payload = MultichainSignature {
                root,
                proof: tree.proof(index)?,
                signature,
            }
            .encode();
            Ok(wrap_module_signature(&payload, &MULTICHAIN_VALIDATOR_ID))
        })
        .collect()
}

/// Session key signature for an operation, proving the leaf under the session root.
pub fn session_signature(
    session_key: &dyn KeystoneSigner,
    leaf_data: Vec<u8>,
    proof: Vec<[u8; 32]>,
    operation_hash: &[u8; 32],
) -> Result<Vec<u8>> {
    let payload = SessionSignature {
        leaf_data,
        proof,
        signature: session_key.sign_message(operation_hash)?,
    };
    Ok(wrap_module_signature(
        &borsh::to_vec(&payload)?,
        &SESSION_KEY_MANAGER_ID,
    ))
}
