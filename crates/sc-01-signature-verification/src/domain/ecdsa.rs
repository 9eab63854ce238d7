//! # Signer Recovery (secp256k1)
//!
//! Digest construction and Ethereum-style address recovery. No state, no
//! I/O; the service layer wraps these functions behind the inbound port.
//!
//! A signature is rejected before recovery when:
//! - `v` is not one of 0, 1, 27, 28
//! - `r` or `s` is zero or not below the curve order `n`
//! - `s` is above `n / 2` (the high-S twin of a valid signature)
//!
//! Recovery never asserts authenticity: a well-formed signature over a
//! different digest recovers a different address. Callers compare.

use super::entities::{DigestScheme, EcdsaSignature};
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};

/// Prefix `eth_sign` prepends to a 32-byte message before hashing.
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Curve order `n`, big-endian.
#[cfg(any(test, feature = "test-helpers"))]
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// floor(n / 2). S values above this are the malleable twin of a low-S signature.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// DIGESTS
// =============================================================================

/// Ethereum's Keccak-256 (pre-NIST padding).
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Hash of a 32-byte message as signed by `eth_sign`.
pub fn eth_signed_message_hash(message: &Hash) -> Hash {
    Keccak256::new()
        .chain_update(ETH_SIGNED_MESSAGE_PREFIX)
        .chain_update(message)
        .finalize()
        .into()
}

/// Digest a block payload under the given scheme.
pub fn block_digest(payload: &[u8], scheme: DigestScheme) -> Hash {
    let payload_hash = keccak256(payload);
    match scheme {
        DigestScheme::Keccak256 => payload_hash,
        DigestScheme::EthSignedMessage => eth_signed_message_hash(&payload_hash),
    }
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the signer's address from an encoded `r || s || v` signature.
pub fn recover_signer(digest: &Hash, signature: &[u8]) -> Result<Address, SignatureError> {
    let signature = EcdsaSignature::from_bytes(signature)?;
    recover_address(digest, &signature)
}

/// Recover the address whose key produced `signature` over `digest`.
///
/// Checks run in the order listed in the module docs; the last possible
/// failure is `RecoveryFailed`, when `r` is not the x-coordinate of a
/// curve point.
pub fn recover_address(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    let recovery_id = parse_recovery_id(signature.v)?;

    let scalars = Signature::from_scalars(signature.r, signature.s)
        .map_err(|_| SignatureError::InvalidFormat)?;
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    VerifyingKey::recover_from_prehash(digest, &scalars, recovery_id)
        .map(|key| address_from_pubkey(&key))
        .map_err(|_| SignatureError::RecoveryFailed)
}

/// Address of a public key: the low 20 bytes of `keccak256(x || y)`.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    // Uncompressed SEC1 encoding is 0x04 || x || y.
    let point = public_key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);

    let mut address = Address::default();
    address.copy_from_slice(&digest[12..]);
    address
}

/// Big-endian byte arrays compare in numeric order.
fn is_low_s(s: &[u8; 32]) -> bool {
    *s <= SECP256K1_HALF_ORDER
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let parity = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };
    RecoveryId::try_from(parity).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Key generation and signing for tests.
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;
    use crate::domain::entities::SIGNATURE_LENGTH;
    use k256::ecdsa::SigningKey;

    /// Fresh random keypair.
    pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
        let key = SigningKey::random(&mut rand::thread_rng());
        let public = *key.verifying_key();
        (key, public)
    }

    /// Deterministic key whose secret scalar is `seed` repeated 32 times.
    ///
    /// `seed` must be in `1..=0xFE` so the scalar stays below the order.
    pub fn key_from_seed(seed: u8) -> SigningKey {
        SigningKey::from_slice(&[seed; 32]).expect("seed scalar in range")
    }

    /// Address belonging to a signing key.
    pub fn address_of(key: &SigningKey) -> Address {
        address_from_pubkey(key.verifying_key())
    }

    /// Sign a digest, low-S, with `v` in the 27/28 convention.
    pub fn sign(digest: &Hash, key: &SigningKey) -> EcdsaSignature {
        let (raw, recid) = key
            .sign_prehash_recoverable(digest)
            .expect("prehash signing");

        let mut encoded = [0u8; SIGNATURE_LENGTH];
        encoded[..64].copy_from_slice(&raw.to_bytes());
        let mut signature = EcdsaSignature::from_bytes(&encoded).expect("fixed length");

        let mut parity = recid.to_byte();
        if !is_low_s(&signature.s) {
            // n - s pairs with the opposite y parity.
            signature.s = invert_s(&signature.s);
            parity ^= 1;
        }
        signature.v = 27 + parity;
        signature
    }

    /// Sign a block payload and return the 65-byte encoding.
    pub fn sign_payload(payload: &[u8], scheme: DigestScheme, key: &SigningKey) -> Vec<u8> {
        sign(&block_digest(payload, scheme), key).to_bytes().to_vec()
    }

    /// `n - s`: turns a low-S value into its high-S twin and back.
    pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
        let mut out = [0u8; 32];
        let mut borrow = 0u16;
        for (i, (n, v)) in SECP256K1_ORDER.iter().zip(s).enumerate().rev() {
            let (n, sub) = (u16::from(*n), u16::from(*v) + borrow);
            out[i] = ((n + 0x100 - sub) & 0xFF) as u8;
            borrow = u16::from(n < sub);
        }
        out
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
