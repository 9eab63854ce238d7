//! # Error Types
//!
//! Errors reported by the chaining core. Every variant is returned
//! synchronously by the offending call and leaves chain state untouched.

use crate::entities::{Address, BlockId, ShardId};
use crate::encoding::short_hex;
use thiserror::Error;

/// Why a payload was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFault {
    /// Zero-length payload.
    Empty,
    /// Payload longer than the configured bound.
    TooLarge {
        /// Payload length in bytes.
        size: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl std::fmt::Display for PayloadFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty payload"),
            Self::TooLarge { size, max } => write!(f, "{size} bytes exceeds limit of {max}"),
        }
    }
}

/// Errors from registry, chain, validation and shard operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Caller or signer is not a registered member.
    #[error("Unauthorized: {} is not a registered node", short_hex(.0))]
    Unauthorized(Address),

    /// Signature could not be decoded or recovered.
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(String),

    /// Claimed block id is not exactly current + 1 (replay or gap).
    #[error("Stale or future block: expected {expected}, got {claimed}")]
    StaleOrFutureBlock {
        /// The only id the chain would accept.
        expected: BlockId,
        /// The id supplied by the caller.
        claimed: BlockId,
    },

    /// Payload empty or oversized.
    #[error("Invalid payload: {0}")]
    InvalidPayload(PayloadFault),

    /// Address already registered.
    #[error("Duplicate node: {}", short_hex(.0))]
    DuplicateNode(Address),

    /// Registry index outside `[0, count)`.
    #[error("Index {index} out of range (count {count})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Registry size.
        count: usize,
    },

    /// No shard registered under this id.
    #[error("Unknown shard: {0}")]
    UnknownShard(ShardId),

    /// A side chain must start with at least one member.
    #[error("Side chain requires at least one member")]
    EmptyMembership,

    /// Every shard id has been handed out.
    #[error("No shard ids left to allocate")]
    ShardIdsExhausted,
}

impl ChainError {
    /// Short machine-friendly name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::InvalidSignatureFormat(_) => "invalid_signature_format",
            Self::StaleOrFutureBlock { .. } => "stale_or_future_block",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::DuplicateNode(_) => "duplicate_node",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::UnknownShard(_) => "unknown_shard",
            Self::EmptyMembership => "empty_membership",
            Self::ShardIdsExhausted => "shard_ids_exhausted",
        }
    }
}
