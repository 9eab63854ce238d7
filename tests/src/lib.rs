//! # Scale-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deterministic signing nodes
//! └── integration/      # Cross-crate flows
//!     ├── main_chain.rs     # v1: fixed main nodes
//!     ├── side_chains.rs    # v2: admin, addNode, addSideChain
//!     ├── concurrency.rs    # same-id races, parallel shards
//!     ├── events.rs         # bus delivery and auditor
//!     ├── eth_scheme.rs     # eth_sign digests, hex signatures
//!     └── adversarial.rs    # replay, malleability, tampering
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! cargo bench -p sc-tests
//! ```

pub mod integration;
