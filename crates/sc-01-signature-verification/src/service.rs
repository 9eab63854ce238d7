//! # Signature Verification Service
//!
//! Application service that implements `SignatureVerificationApi` for one
//! digest scheme, delegating the cryptography to the domain layer.

use crate::domain::ecdsa;
use crate::domain::entities::DigestScheme;
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureVerificationApi;
use shared_types::{Address, Hash};
use tracing::debug;

/// Signature Verification Service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignatureVerificationService {
    scheme: DigestScheme,
}

impl SignatureVerificationService {
    /// Create a service that digests payloads with `scheme`.
    #[must_use]
    pub fn new(scheme: DigestScheme) -> Self {
        Self { scheme }
    }

    /// Scheme in use.
    #[must_use]
    pub fn scheme(&self) -> DigestScheme {
        self.scheme
    }
}

impl SignatureVerificationApi for SignatureVerificationService {
    fn digest(&self, payload: &[u8]) -> Hash {
        ecdsa::block_digest(payload, self.scheme)
    }

    fn recover_signer(&self, digest: &Hash, signature: &[u8]) -> Result<Address, SignatureError> {
        ecdsa::recover_signer(digest, signature).map_err(|e| {
            debug!("[sc-01] Signer recovery failed: {}", e);
            e
        })
    }
}
