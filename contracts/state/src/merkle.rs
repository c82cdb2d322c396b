//! Sorted-pair Merkle proof verification.
//!
//! Pairs are ordered ascending before hashing and leaves are used as-is, the
//! layout produced by `merkletreejs` with `sortPairs: true` and consumed by
//! OpenZeppelin's `MerkleProof`.

use crate::crypto::hashv;

/// Hashes two nodes after ordering them ascending.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[&a[..], &b[..]])
    } else {
        hashv(&[&b[..], &a[..]])
    }
}

/// Recomputes the root reached from `leaf` by walking `proof` root-ward.
pub fn compute_root(leaf: &[u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling))
}

/// Returns true if `proof` proves `leaf` is part of the tree with `root`.
pub fn verify(root: &[u8; 32], leaf: &[u8; 32], proof: &[[u8; 32]]) -> bool {
    &compute_root(leaf, proof) == root
}
