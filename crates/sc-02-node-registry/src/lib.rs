//! # Node Registry Subsystem (SC-02)
//!
//! Ordered, append-only set of node addresses allowed to sign blocks for
//! one chain. The main chain's registry may also name an administrator who
//! can add nodes without being a member.
//!
//! ## Invariants
//!
//! - No address appears twice.
//! - Nodes are never removed, so indices are stable once assigned.

#![warn(missing_docs)]

pub mod domain;

pub use domain::registry::NodeRegistry;
