//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the block validator uses

pub mod inbound;
