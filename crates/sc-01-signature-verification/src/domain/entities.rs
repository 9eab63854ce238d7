//! # Domain Entities
//!
//! Signature encoding and digest scheme.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::decode_hex;
use std::fmt;
use std::str::FromStr;

/// Encoded signature length: r (32) || s (32) || v (1).
pub const SIGNATURE_LENGTH: usize = 65;

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Decode the 65-byte `r || s || v` encoding.
    ///
    /// Only the length is checked here; scalar ranges and the recovery id
    /// are validated during recovery.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidLength {
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self { r, s, v: bytes[64] })
    }

    /// Decode a hex string (optional `0x` prefix) holding `r || s || v`.
    pub fn from_hex(input: &str) -> Result<Self, SignatureError> {
        let bytes = decode_hex(input).map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Encode as `r || s || v`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// How a block payload is turned into the 32-byte digest that gets signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestScheme {
    /// `keccak256(payload)`.
    #[default]
    Keccak256,
    /// `keccak256("\x19Ethereum Signed Message:\n32" || keccak256(payload))`,
    /// what `eth_sign` produces over a payload hash.
    EthSignedMessage,
}

impl DigestScheme {
    /// Configuration name of the scheme.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::EthSignedMessage => "eth-signed-message",
        }
    }
}

impl fmt::Display for DigestScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestScheme {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(Self::Keccak256),
            "eth-signed-message" | "eth_sign" | "eth-sign" => Ok(Self::EthSignedMessage),
            other => Err(SignatureError::UnknownScheme(other.to_string())),
        }
    }
}
