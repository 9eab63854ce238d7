//! # Block Validation Subsystem (SC-04)
//!
//! Orchestrates one block submission: digest, signer recovery, then chain
//! extension, which checks membership, sequencing and payload bounds in
//! that order.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the per-chain ledger and acceptance outcome
//! - **Validator** (`validator.rs`): synchronous pipeline behind one lock
//! - **Service Layer** (`service.rs`): async API that publishes `ChainEvent`s
//!
//! ## Concurrency
//!
//! Submissions and node additions on one chain are mutually exclusive.
//! Of several submissions claiming the same block id, exactly one succeeds;
//! the others see `StaleOrFutureBlock`.

#![warn(missing_docs)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod validator;

pub use config::ValidationConfig;
pub use domain::{AcceptedBlock, ChainLedger};
pub use ports::inbound::BlockValidationApi;
pub use service::BlockValidationService;
pub use validator::BlockValidator;
