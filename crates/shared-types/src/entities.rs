//! # Core Domain Entities
//!
//! Primitive types shared by every Scale-Chain subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `ShardId`
//! - **Chain**: `Hash`, `BlockId`, `ChainState`, `BlockRecord`

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte Ethereum-style address.
///
/// Last 20 bytes of keccak256 over the uncompressed secp256k1 public key
/// (without the 0x04 prefix).
pub type Address = [u8; 20];

/// Shard identifier. The main chain is always shard 0.
pub type ShardId = u32;

/// Shard id of the main chain.
pub const MAIN_CHAIN: ShardId = 0;

// =============================================================================
// CLUSTER B: THE CHAIN
// =============================================================================

/// A 32-byte digest.
pub type Hash = [u8; 32];

/// Sequential block identifier. Genesis is 0, the first accepted block is 1.
pub type BlockId = u64;

/// Hash every chain starts from.
pub const GENESIS_HASH: Hash = [0u8; 32];

/// Running state of one hash chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainState {
    /// Hash after the most recently accepted block.
    pub current_hash: Hash,
    /// Id of the most recently accepted block.
    pub block_id: BlockId,
}

impl ChainState {
    /// State of a chain that has accepted nothing yet.
    #[must_use]
    pub const fn genesis() -> Self {
        Self {
            current_hash: GENESIS_HASH,
            block_id: 0,
        }
    }

    /// Whether no block has been accepted.
    #[must_use]
    pub fn is_genesis(&self) -> bool {
        self.block_id == 0
    }

    /// The only block id the chain will accept next.
    #[must_use]
    pub fn next_block_id(&self) -> BlockId {
        self.block_id + 1
    }
}

impl Default for ChainState {
    fn default() -> Self {
        Self::genesis()
    }
}

/// Audit record kept for every accepted block.
///
/// The payload itself is not retained, only its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Position of the block in its chain.
    pub block_id: BlockId,
    /// Hash of the block payload.
    pub payload_hash: Hash,
    /// Chain hash after this block was applied.
    pub chain_hash: Hash,
    /// Recovered signer of the block.
    pub signer: Address,
}
