//! # Shared Types Crate
//!
//! Primitive types, the common error enum and hex helpers used by every
//! Scale-Chain subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **All-or-nothing**: every `ChainError` is produced before any state is
//!   mutated, so a failed call never leaves a partial update behind.

pub mod entities;
pub mod errors;
pub mod encoding;

pub use entities::*;
pub use errors::*;
pub use encoding::{decode_hex, parse_address, parse_hash, short_hex, to_hex, HexError};
