//! # Chain Hashing
//!
//! SHA-256 primitives shared by the chain and by offline auditors.

use sha2::{Digest, Sha256};
use shared_types::Hash;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// One chaining step: `SHA256(prev || SHA256(payload))`.
pub fn chain_step(prev: &Hash, payload: &[u8]) -> Hash {
    link(prev, &sha256(payload))
}

/// Combine a chain hash with an already computed payload hash.
pub(crate) fn link(prev: &Hash, payload_hash: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(prev);
    hasher.update(payload_hash);
    hasher.finalize().into()
}

/// Recompute a chain hash from `init` over `payloads` in order.
pub fn replay<I, P>(init: Hash, payloads: I) -> Hash
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    payloads
        .into_iter()
        .fold(init, |hash, payload| chain_step(&hash, payload.as_ref()))
}
