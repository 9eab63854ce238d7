//! # Signature Errors
//!
//! Error types for signer recovery. All of them surface to callers of the
//! chaining core as `ChainError::InvalidSignatureFormat`.

use shared_types::ChainError;
use thiserror::Error;

/// Errors that can occur while decoding a signature or recovering its signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Encoded signature has the wrong number of bytes.
    #[error("Invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Hex-encoded signature could not be decoded.
    #[error("Invalid signature hex: {0}")]
    InvalidHex(String),

    /// R or S is zero or not below the curve order.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// No public key could be recovered (R is not on the curve).
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Digest scheme name not recognized.
    #[error("Unknown digest scheme: {0}")]
    UnknownScheme(String),
}

impl From<SignatureError> for ChainError {
    fn from(err: SignatureError) -> Self {
        ChainError::InvalidSignatureFormat(err.to_string())
    }
}
