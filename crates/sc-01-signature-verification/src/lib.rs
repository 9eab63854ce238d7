//! # Signature Verification Subsystem (SC-01)
//!
//! Recovers the Ethereum-style address that signed a block payload.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): The recovery API the validator depends on
//! - **Service Layer** (`service.rs`): Binds a digest scheme to the domain logic
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - Recovery only names a signer. Authorization is the registry's job.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, block_digest, eth_signed_message_hash, keccak256, recover_address,
    recover_signer, ETH_SIGNED_MESSAGE_PREFIX,
};
pub use domain::entities::{DigestScheme, EcdsaSignature, SIGNATURE_LENGTH};
pub use domain::errors::SignatureError;
pub use ports::inbound::SignatureVerificationApi;
pub use service::SignatureVerificationService;

#[cfg(any(test, feature = "test-helpers"))]
pub use domain::ecdsa::test_helpers;
