//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that callers and the shard manager use
//! - **Outbound (Driven)**: event publication via `shared_bus::EventPublisher`

pub mod inbound;
