//! Session leaves and the tree an account publishes as its session root.

use keystone_state::{Address, SessionLeaf};
use keystone_state::crypto::keccak256;

use crate::{error::Result, merkle::MerkleTree};

/// Builder for the packed leaf data of one session key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLeafBuilder {
    valid_until: u64,
    valid_after: u64,
    scope_module: Address,
    session_key: Address,
    scope_data: Vec<u8>,
}

impl SessionLeafBuilder {
    pub fn new(session_key: Address) -> Self {
        Self {
            session_key,
            ..Default::default()
        }
    }

    /// Last valid timestamp, 0 for no expiry
    pub fn valid_until(mut self, timestamp: u64) -> Self {
        self.valid_until = timestamp;
        self
    }

    pub fn valid_after(mut self, timestamp: u64) -> Self {
        self.valid_after = timestamp;
        self
    }

    /// Scope checker and the data it checks calls against
    pub fn scope(mut self, module_id: Address, scope_data: Vec<u8>) -> Self {
        self.scope_module = module_id;
        self.scope_data = scope_data;
        self
    }

    /// Packed leaf data. Fails when a timestamp does not fit in 48 bits.
    pub fn build(&self) -> Result<Vec<u8>> {
        let data = SessionLeaf {
            valid_until: self.valid_until,
            valid_after: self.valid_after,
            scope_module: self.scope_module,
            session_key: self.session_key,
            scope_data: &self.scope_data,
        }
        .encode()?;
        Ok(data)
    }
}

/// The set of enabled session leaves of one account.
#[derive(Debug, Clone)]
pub struct SessionTree {
    leaves: Vec<Vec<u8>>,
    tree: MerkleTree,
}

impl SessionTree {
    pub fn new(leaves: Vec<Vec<u8>>) -> Result<Self> {
        let tree = MerkleTree::new(leaves.iter().map(|leaf| keccak256(leaf)).collect())?;
        Ok(Self { leaves, tree })
    }

    /// Root to store with `SetSessionRoot`
    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    /// Leaf data and membership proof of the session at `index`.
    pub fn leaf(&self, index: usize) -> Result<(Vec<u8>, Vec<[u8; 32]>)> {
        let proof = self.tree.proof(index)?;
        Ok((self.leaves[index].clone(), proof))
    }
}
