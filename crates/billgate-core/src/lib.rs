//! # billgate-core — Foundational Types
//!
//! Leaf crate of the billgate workspace. Every other crate depends on it;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Canonical bill identifiers.** Request paths carry free-form text.
//!    [`BillId`] is the only form that reaches authorization, the release
//!    ledger, or the document service, so `"0042"` and `"42"` can never be
//!    treated as two different bills.
//!
//! 2. **Authentication is a constructor.** A [`SessionIdentity`] can only be
//!    obtained through [`SessionIdentity::authenticate`], so holding one is
//!    proof the session passed the allow-list.
//!
//! 3. **Authorization is a trait.** The gateway depends on
//!    [`AuthorizationOracle`], with [`StaticPolicy`] as the built-in table.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `billgate-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bill;
pub mod policy;
pub mod session;

pub use bill::BillId;
pub use policy::{AuthorizationOracle, StaticPolicy};
pub use session::SessionIdentity;
