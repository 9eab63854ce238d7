//! # Hash Chain
//!
//! State machine for one chain: `AwaitingBlock(n)` moves to
//! `AwaitingBlock(n + 1)` on a valid block. No rollback, no forks.

use super::hashing::{link, replay, sha256};
use sc_02_node_registry::NodeRegistry;
use shared_types::{
    short_hex, Address, BlockId, BlockRecord, ChainError, ChainState, Hash, PayloadFault,
};
use tracing::debug;

/// Payload bound used when none is configured.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 65_536;

/// Running hash, block counter and history of one chain.
#[derive(Debug, Clone)]
pub struct HashChain {
    state: ChainState,
    max_payload_bytes: usize,
    history: Vec<BlockRecord>,
}

impl HashChain {
    /// Genesis chain accepting payloads up to `max_payload_bytes`.
    #[must_use]
    pub fn new(max_payload_bytes: usize) -> Self {
        Self {
            state: ChainState::genesis(),
            max_payload_bytes,
            history: Vec::new(),
        }
    }

    /// Hash after the latest accepted block.
    #[must_use]
    pub fn current_hash(&self) -> Hash {
        self.state.current_hash
    }

    /// Id of the latest accepted block, 0 at genesis.
    #[must_use]
    pub fn current_block_id(&self) -> BlockId {
        self.state.block_id
    }

    /// Copy of the running state.
    #[must_use]
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Configured payload bound.
    #[must_use]
    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }

    /// Append a block signed by `signer`.
    ///
    /// Preconditions, first failure wins:
    /// 1. `signer` is a member of `registry` (`Unauthorized`)
    /// 2. `claimed == current_block_id() + 1` (`StaleOrFutureBlock`)
    /// 3. payload non-empty and within bounds (`InvalidPayload`)
    ///
    /// On failure the chain is unchanged.
    pub fn extend(
        &mut self,
        registry: &NodeRegistry,
        signer: Address,
        payload: &[u8],
        claimed: BlockId,
    ) -> Result<ChainState, ChainError> {
        if !registry.is_member(&signer) {
            debug!("[sc-03] Signer {} is not a member", short_hex(&signer));
            return Err(ChainError::Unauthorized(signer));
        }

        let expected = self.state.next_block_id();
        if claimed != expected {
            debug!(
                "[sc-03] Block id {} rejected, expecting {}",
                claimed, expected
            );
            return Err(ChainError::StaleOrFutureBlock { expected, claimed });
        }

        self.check_payload(payload)?;

        let payload_hash = sha256(payload);
        let chain_hash = link(&self.state.current_hash, &payload_hash);

        self.state = ChainState {
            current_hash: chain_hash,
            block_id: claimed,
        };
        self.history.push(BlockRecord {
            block_id: claimed,
            payload_hash,
            chain_hash,
            signer,
        });

        Ok(self.state)
    }

    fn check_payload(&self, payload: &[u8]) -> Result<(), ChainError> {
        if payload.is_empty() {
            return Err(ChainError::InvalidPayload(PayloadFault::Empty));
        }
        if payload.len() > self.max_payload_bytes {
            return Err(ChainError::InvalidPayload(PayloadFault::TooLarge {
                size: payload.len(),
                max: self.max_payload_bytes,
            }));
        }
        Ok(())
    }

    /// Records with `start <= block_id < end`, clamped to the history.
    #[must_use]
    pub fn blocks(&self, start: BlockId, end: BlockId) -> &[BlockRecord] {
        // Record for block n sits at index n - 1.
        let len = self.history.len() as u64;
        let from = start.saturating_sub(1).min(len);
        let to = end.saturating_sub(1).min(len);
        if from >= to {
            return &[];
        }
        &self.history[from as usize..to as usize]
    }

    /// Record of block `block_id`, if accepted.
    #[must_use]
    pub fn block(&self, block_id: BlockId) -> Option<&BlockRecord> {
        block_id
            .checked_sub(1)
            .and_then(|index| self.history.get(index as usize))
    }

    /// Check that `payloads` reproduce the recorded history from genesis.
    ///
    /// Returns the first block id whose payload diverges, or whose record
    /// is missing on either side. `None` means the sequence matches.
    pub fn audit<P: AsRef<[u8]>>(&self, payloads: &[P]) -> Option<BlockId> {
        let mut hash = shared_types::GENESIS_HASH;
        for (position, payload) in payloads.iter().enumerate() {
            let block_id = position as BlockId + 1;
            let Some(record) = self.history.get(position) else {
                return Some(block_id);
            };
            let payload_hash = sha256(payload.as_ref());
            hash = link(&hash, &payload_hash);
            if record.payload_hash != payload_hash || record.chain_hash != hash {
                return Some(block_id);
            }
        }

        if payloads.len() < self.history.len() {
            return Some(payloads.len() as BlockId + 1);
        }
        None
    }

    /// Recompute the current hash from genesis over `payloads`.
    #[must_use]
    pub fn matches_replay<P: AsRef<[u8]>>(&self, payloads: &[P]) -> bool {
        replay(shared_types::GENESIS_HASH, payloads) == self.state.current_hash
    }
}

impl Default for HashChain {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD_BYTES)
    }
}
