//! # Domain Layer
//!
//! The state one chain lock protects, and the outcome of a submission.

pub mod ledger;

pub use ledger::{AcceptedBlock, ChainLedger};
