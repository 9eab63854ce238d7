//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash};

/// Signer recovery API consumed by block validation.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Digest a block payload into the 32-byte value signers sign.
    fn digest(&self, payload: &[u8]) -> Hash;

    /// Recover the address that produced `signature` over `digest`.
    ///
    /// # Security
    /// - Rejects signatures with high S values (EIP-2 malleability protection)
    /// - A signature over a different digest yields a different address,
    ///   never an error. Membership checks catch it.
    fn recover_signer(&self, digest: &Hash, signature: &[u8]) -> Result<Address, SignatureError>;
}
