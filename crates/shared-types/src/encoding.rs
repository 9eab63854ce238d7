//! # Hex Encoding
//!
//! `0x`-prefixed hex helpers for addresses and digests, the textual form the
//! external tooling uses for node accounts and block signatures.

use crate::entities::{Address, Hash};
use thiserror::Error;

/// Errors from hex decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexError {
    /// Not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    Invalid(String),

    /// Decoded to the wrong number of bytes.
    #[error("Expected {expected} bytes, got {actual}")]
    Length {
        /// Required byte length.
        expected: usize,
        /// Decoded byte length.
        actual: usize,
    },
}

/// Encode bytes as `0x`-prefixed lowercase hex.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// First four bytes as `0x`-prefixed hex followed by an ellipsis, for logs.
#[must_use]
pub fn short_hex(bytes: &[u8]) -> String {
    let prefix = &bytes[..bytes.len().min(4)];
    format!("0x{}...", hex::encode(prefix))
}

/// Decode hex with an optional `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| HexError::Invalid(e.to_string()))
}

fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_hex(input)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| HexError::Length {
        expected: N,
        actual: bytes.len(),
    })
}

/// Parse a 20-byte address.
pub fn parse_address(input: &str) -> Result<Address, HexError> {
    decode_fixed::<20>(input)
}

/// Parse a 32-byte hash.
pub fn parse_hash(input: &str) -> Result<Hash, HexError> {
    decode_fixed::<32>(input)
}
