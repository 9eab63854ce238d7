//! # Validation Configuration
//!
//! Per-chain settings for block validation.

use sc_01_signature_verification::DigestScheme;
use sc_03_hash_chain::DEFAULT_MAX_PAYLOAD_BYTES;
use serde::{Deserialize, Serialize};

/// Block validation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Largest accepted payload in bytes.
    pub max_payload_bytes: usize,

    /// How payloads are digested before signer recovery.
    pub digest_scheme: DigestScheme,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            digest_scheme: DigestScheme::Keccak256,
        }
    }
}

impl ValidationConfig {
    /// Create a config for testing (small payload bound).
    pub fn for_testing() -> Self {
        Self {
            max_payload_bytes: 1024,
            digest_scheme: DigestScheme::Keccak256,
        }
    }
}
