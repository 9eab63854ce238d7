//! # Block Validator
//!
//! Synchronous submission pipeline for one chain:
//!
//! 1. digest the payload
//! 2. recover the signer
//! 3. extend the chain (membership, sequencing, payload bounds)
//!
//! Digesting and recovery run without the chain lock. Everything that reads
//! or writes the registry or chain runs under it, so submissions and node
//! additions on the same chain are serialized.

use crate::config::ValidationConfig;
use crate::domain::{AcceptedBlock, ChainLedger};
use parking_lot::Mutex;
use sc_01_signature_verification::{SignatureVerificationApi, SignatureVerificationService};
use sc_02_node_registry::NodeRegistry;
use shared_types::{
    short_hex, Address, BlockId, BlockRecord, ChainError, ChainState, Hash, ShardId,
};
use tracing::{debug, info};

/// Validates and applies block submissions for one chain.
pub struct BlockValidator<V: SignatureVerificationApi = SignatureVerificationService> {
    shard_id: ShardId,
    ledger: Mutex<ChainLedger>,
    verifier: V,
}

impl BlockValidator<SignatureVerificationService> {
    /// Validator whose verifier follows `config.digest_scheme`.
    #[must_use]
    pub fn new(shard_id: ShardId, registry: NodeRegistry, config: ValidationConfig) -> Self {
        Self::with_verifier(
            shard_id,
            registry,
            config,
            SignatureVerificationService::new(config.digest_scheme),
        )
    }
}

impl<V: SignatureVerificationApi> BlockValidator<V> {
    /// Validator with an explicit verifier.
    pub fn with_verifier(
        shard_id: ShardId,
        registry: NodeRegistry,
        config: ValidationConfig,
        verifier: V,
    ) -> Self {
        Self {
            shard_id,
            ledger: Mutex::new(ChainLedger::new(registry, config.max_payload_bytes)),
            verifier,
        }
    }

    /// Chain this validator guards.
    #[must_use]
    pub fn shard_id(&self) -> ShardId {
        self.shard_id
    }

    /// Validate `payload` signed with `signature` as block `claimed`.
    ///
    /// Errors propagate unchanged from recovery and chain extension; a
    /// rejected submission leaves the chain untouched.
    pub fn submit(
        &self,
        payload: &[u8],
        signature: &[u8],
        claimed: BlockId,
    ) -> Result<AcceptedBlock, ChainError> {
        let digest = self.verifier.digest(payload);
        let signer = self.verifier.recover_signer(&digest, signature)?;

        let state = {
            let mut ledger = self.ledger.lock();
            ledger.extend(signer, payload, claimed)
        }
        .map_err(|e| {
            debug!(
                shard = self.shard_id,
                block_id = claimed,
                "[sc-04] Block rejected: {}",
                e
            );
            e
        })?;

        info!(
            shard = self.shard_id,
            block_id = state.block_id,
            signer = %short_hex(&signer),
            "[sc-04] Block accepted"
        );

        Ok(AcceptedBlock {
            shard_id: self.shard_id,
            block_id: state.block_id,
            hash: state.current_hash,
            signer,
        })
    }

    /// Register `new_node` on behalf of `caller`, returning its index.
    pub fn add_node(&self, caller: Address, new_node: Address) -> Result<usize, ChainError> {
        self.add_node_with_metadata(caller, new_node, Vec::new())
    }

    /// Register `new_node` together with its opaque node metadata.
    pub fn add_node_with_metadata(
        &self,
        caller: Address,
        new_node: Address,
        metadata: Vec<u64>,
    ) -> Result<usize, ChainError> {
        let index = self
            .ledger
            .lock()
            .registry
            .add_node_with_metadata(caller, new_node, metadata)?;
        info!(
            shard = self.shard_id,
            index,
            "[sc-04] Node {} added by {}",
            short_hex(&new_node),
            short_hex(&caller)
        );
        Ok(index)
    }

    /// Hash after the latest accepted block.
    #[must_use]
    pub fn current_hash(&self) -> Hash {
        self.ledger.lock().chain.current_hash()
    }

    /// Id of the latest accepted block.
    #[must_use]
    pub fn current_block_id(&self) -> BlockId {
        self.ledger.lock().chain.current_block_id()
    }

    /// Consistent (hash, block id) pair.
    #[must_use]
    pub fn state(&self) -> ChainState {
        self.ledger.lock().chain.state()
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.ledger.lock().registry.count()
    }

    /// Node at `index`.
    pub fn get_node(&self, index: usize) -> Result<Address, ChainError> {
        self.ledger.lock().registry.get_node(index)
    }

    /// Metadata registered with the node at `index`.
    pub fn node_metadata(&self, index: usize) -> Result<Vec<u64>, ChainError> {
        self.ledger.lock().registry.node_metadata(index).map(<[u64]>::to_vec)
    }

    /// Metadata registered with `address`, if it is a member.
    #[must_use]
    pub fn metadata_of(&self, address: &Address) -> Option<Vec<u64>> {
        self.ledger.lock().registry.metadata_of(address).map(<[u64]>::to_vec)
    }

    /// All nodes in registration order.
    #[must_use]
    pub fn nodes(&self) -> Vec<Address> {
        self.ledger.lock().registry.nodes().to_vec()
    }

    /// Whether `address` may sign blocks here.
    #[must_use]
    pub fn is_member(&self, address: &Address) -> bool {
        self.ledger.lock().registry.is_member(address)
    }

    /// Whether `address` may add nodes or create side chains.
    #[must_use]
    pub fn is_authorized(&self, address: &Address) -> bool {
        self.ledger.lock().registry.is_authorized(address)
    }

    /// Position of `address` in the registry.
    #[must_use]
    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.ledger.lock().registry.index_of(address)
    }

    /// History records with `start <= block_id < end`.
    #[must_use]
    pub fn blocks(&self, start: BlockId, end: BlockId) -> Vec<BlockRecord> {
        self.ledger.lock().chain.blocks(start, end).to_vec()
    }

    /// First block id at which `payloads` diverge from the history.
    pub fn audit<P: AsRef<[u8]>>(&self, payloads: &[P]) -> Option<BlockId> {
        self.ledger.lock().chain.audit(payloads)
    }
}
