//! # Hash Chain Subsystem (SC-03)
//!
//! Running chain hash and monotonic block counter for one logical chain.
//!
//! ```text
//! h0 = 0x00..00
//! hN = SHA256(hN-1 || SHA256(payloadN))
//! ```
//!
//! A block is appended only when its signer is registered, its id is
//! exactly one past the current id, and its payload is within bounds.
//! Checks run in that order and the first failure is reported.

#![warn(missing_docs)]

pub mod domain;

pub use domain::chain::{HashChain, DEFAULT_MAX_PAYLOAD_BYTES};
pub use domain::hashing::{chain_step, replay, sha256};
