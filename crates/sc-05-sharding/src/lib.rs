//! # Sharding Subsystem (SC-05)
//!
//! Side chains: independent hash chains, each with its own member
//! registry, created at runtime by main-chain nodes.
//!
//! ## Module Structure
//!
//! ```text
//! sc-05-sharding/
//! ├── domain/      # SideChainInfo
//! ├── ports/       # ShardingApi
//! └── service.rs   # ShardManager
//! ```

#![warn(missing_docs)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::SideChainInfo;
pub use ports::inbound::ShardingApi;
pub use service::ShardManager;
