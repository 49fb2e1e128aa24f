//! # Route Modules
//!
//! | Prefix        | Module        | Purpose                          |
//! |---------------|---------------|----------------------------------|
//! | `/billing/*`  | [`billing`]   | Release-gated document proxy     |

pub mod billing;
