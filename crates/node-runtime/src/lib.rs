//! # Node Runtime Library
//!
//! Configuration, wiring and the chain auditor. The entry point is the
//! `main.rs` binary; everything here is exposed for tests.

#![warn(missing_docs)]

pub mod auditor;
pub mod config;
pub mod runtime;

pub use auditor::{run_auditor, AuditLog};
pub use config::{ConfigError, NodeConfig};
pub use runtime::NodeRuntime;
