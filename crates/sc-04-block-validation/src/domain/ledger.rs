//! # Chain Ledger
//!
//! Registry and hash chain of one chain, mutated together under one lock so
//! a membership check and the chain extension it guards see the same
//! registry.

use sc_02_node_registry::NodeRegistry;
use sc_03_hash_chain::HashChain;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockId, ChainError, ChainState, Hash, ShardId};

/// Outcome of an accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedBlock {
    /// Chain the block was appended to.
    pub shard_id: ShardId,
    /// Id of the block, now the chain's current id.
    pub block_id: BlockId,
    /// Chain hash after the block.
    pub hash: Hash,
    /// Recovered signer.
    pub signer: Address,
}

impl AcceptedBlock {
    /// Chain state the acceptance produced.
    #[must_use]
    pub fn state(&self) -> ChainState {
        ChainState {
            current_hash: self.hash,
            block_id: self.block_id,
        }
    }
}

/// Membership and chain state of one chain.
#[derive(Debug, Clone)]
pub struct ChainLedger {
    /// Nodes allowed to sign blocks.
    pub registry: NodeRegistry,
    /// Running hash and history.
    pub chain: HashChain,
}

impl ChainLedger {
    /// Genesis ledger over `registry`.
    #[must_use]
    pub fn new(registry: NodeRegistry, max_payload_bytes: usize) -> Self {
        Self {
            registry,
            chain: HashChain::new(max_payload_bytes),
        }
    }

    /// Extend the chain with a block whose signer is already recovered.
    pub fn extend(
        &mut self,
        signer: Address,
        payload: &[u8],
        claimed: BlockId,
    ) -> Result<ChainState, ChainError> {
        self.chain.extend(&self.registry, signer, payload, claimed)
    }
}
