//! Scope checkers compiled into the program.

use keystone_erc20_policy::Erc20TransferPolicy;
use keystone_state::{PolicySet, ScopePolicy};

const POLICIES: &[&dyn ScopePolicy] = &[&Erc20TransferPolicy];

/// Registry consulted by the session key manager
pub const BUILTIN_POLICIES: PolicySet<'static> = PolicySet::new(POLICIES);
