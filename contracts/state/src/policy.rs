//! Scope policies consulted by the session key manager.
//!
//! A session leaf names the scope checker that governs it. Each checker is a
//! fixed capability with a 20 byte module id, looked up through a registry.

use crate::Address;

/// Decides whether a call fits a delegated scope.
pub trait ScopePolicy {
    /// Module id a session leaf uses to select this checker
    fn module_id(&self) -> Address;

    /// Returns true iff the call `(destination, value, call_payload)` is allowed
    /// by `scope_data`. Must not depend on anything but its inputs.
    fn check_scope(
        &self,
        destination: &Address,
        value: u128,
        call_payload: &[u8],
        scope_data: &[u8],
    ) -> bool;
}

/// Resolves scope module ids to checkers.
pub trait PolicyRegistry {
    fn resolve(&self, module_id: &Address) -> Option<&dyn ScopePolicy>;
}

/// Registry over a fixed list of checkers.
#[derive(Clone, Copy)]
pub struct PolicySet<'a> {
    policies: &'a [&'a dyn ScopePolicy],
}

impl<'a> PolicySet<'a> {
    pub const fn new(policies: &'a [&'a dyn ScopePolicy]) -> Self {
        Self { policies }
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl PolicyRegistry for PolicySet<'_> {
    fn resolve(&self, module_id: &Address) -> Option<&dyn ScopePolicy> {
        self.policies
            .iter()
            .find(|policy| &policy.module_id() == module_id)
            .map(|policy| *policy)
    }
}
