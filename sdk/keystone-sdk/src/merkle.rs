//! Sorted-pair Merkle tree builder.
//!
//! Builds the same trees as `merkletreejs` with `sortPairs: true`: leaves are
//! used as given, pairs are sorted before hashing and an odd node at the end
//! of a level moves up unchanged.

use keystone_state::merkle::hash_pair;

use crate::error::{KeystoneSdkError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// levels[0] holds the leaves, the last level holds the root
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<[u8; 32]>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(KeystoneSdkError::EmptyTree);
        }
        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next = next_level(&levels[levels.len() - 1]);
            levels.push(next);
        }
        Ok(Self { levels })
    }

    pub fn root(&self) -> [u8; 32] {
        // new() guarantees a non-empty top level
        self.levels[self.levels.len() - 1][0]
    }

    pub fn leaves(&self) -> &[[u8; 32]] {
        &self.levels[0]
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Sibling path from the leaf at `index` up to the root.
    pub fn proof(&self, index: usize) -> Result<Vec<[u8; 32]>> {
        if index >= self.leaves().len() {
            return Err(KeystoneSdkError::LeafNotFound(index));
        }
        let mut proof = Vec::with_capacity(self.depth());
        let mut index = index;
        for level in &self.levels[..self.depth()] {
            if let Some(sibling) = level.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }
        Ok(proof)
    }

    /// Proof for the first occurrence of `leaf`.
    pub fn proof_for(&self, leaf: &[u8; 32]) -> Result<Vec<[u8; 32]>> {
        let index = self
            .leaves()
            .iter()
            .position(|candidate| candidate == leaf)
            .ok_or(KeystoneSdkError::LeafNotFound(self.leaves().len()))?;
        self.proof(index)
    }
}

fn next_level(level: &[[u8; 32]]) -> Vec<[u8; 32]> {
    level
        .chunks(2)
        .map(|pair| match pair.get(1) {
            Some(right) => hash_pair(&pair[0], right),
            None => pair[0],
        })
        .collect()
}
