//! # Authorization Oracle
//!
//! Decides whether an authenticated identity may release a given bill.
//! The built-in [`StaticPolicy`] maps each identity to exactly one bill.

use std::collections::HashMap;

use crate::bill::BillId;
use crate::session::SessionIdentity;

/// Answers "may this identity release this bill?".
///
/// Implementations must be pure: no side effects, no errors. An identity
/// the oracle does not know is simply not authorized.
pub trait AuthorizationOracle: Send + Sync {
    fn authorize(&self, identity: &SessionIdentity, bill: BillId) -> bool;
}

/// Fixed identity → bill table.
#[derive(Debug, Clone)]
pub struct StaticPolicy {
    grants: HashMap<String, BillId>,
}

impl StaticPolicy {
    /// Build a policy from explicit `(identity, bill)` pairs.
    ///
    /// A later pair for the same identity replaces the earlier one.
    pub fn from_grants<I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = (S, BillId)>,
        S: Into<String>,
    {
        Self {
            grants: grants
                .into_iter()
                .map(|(identity, bill)| (identity.into(), bill))
                .collect(),
        }
    }

    /// The bill an identity is allowed to release, if any.
    pub fn grant_for(&self, identity: &str) -> Option<BillId> {
        self.grants.get(identity).copied()
    }
}

impl Default for StaticPolicy {
    /// The deployment table: bob → 1111, alice → 2222, john → 3333.
    fn default() -> Self {
        Self::from_grants([
            ("bob", BillId::new(1111)),
            ("alice", BillId::new(2222)),
            ("john", BillId::new(3333)),
        ])
    }
}

impl AuthorizationOracle for StaticPolicy {
    fn authorize(&self, identity: &SessionIdentity, bill: BillId) -> bool {
        self.grant_for(identity.as_str()) == Some(bill)
    }
}
