//! # Shard Manager
//!
//! Maps shard ids to independent chains. Shard 0 is the main chain; side
//! chains are numbered from 1 in creation order and never removed.
//!
//! The shard table lock is held only to look up or insert an entry. Work on
//! a chain happens under that chain's own lock, so distinct shards proceed
//! in parallel.

use crate::domain::SideChainInfo;
use crate::ports::inbound::ShardingApi;
use async_trait::async_trait;
use parking_lot::RwLock;
use sc_02_node_registry::NodeRegistry;
use sc_04_block_validation::{
    AcceptedBlock, BlockValidationApi, BlockValidationService, BlockValidator, ValidationConfig,
};
use shared_bus::{ChainEvent, EventPublisher};
use shared_types::{short_hex, Address, BlockId, ChainError, ChainState, Hash, ShardId, MAIN_CHAIN};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct ShardEntry<P: EventPublisher> {
    service: BlockValidationService<P>,
    metadata: Vec<u64>,
}

struct ShardTable<P: EventPublisher> {
    entries: HashMap<ShardId, Arc<ShardEntry<P>>>,
    next_id: ShardId,
}

/// Owner of the main chain and every side chain.
pub struct ShardManager<P: EventPublisher> {
    table: RwLock<ShardTable<P>>,
    config: ValidationConfig,
    publisher: Arc<P>,
}

impl<P: EventPublisher> ShardManager<P> {
    /// Create a manager whose main chain uses `main_registry`.
    pub fn new(main_registry: NodeRegistry, config: ValidationConfig, publisher: Arc<P>) -> Self {
        let main = Self::build_entry(MAIN_CHAIN, main_registry, Vec::new(), config, &publisher);

        let mut entries = HashMap::new();
        entries.insert(MAIN_CHAIN, Arc::new(main));

        Self {
            table: RwLock::new(ShardTable {
                entries,
                next_id: MAIN_CHAIN + 1,
            }),
            config,
            publisher,
        }
    }

    fn build_entry(
        shard_id: ShardId,
        registry: NodeRegistry,
        metadata: Vec<u64>,
        config: ValidationConfig,
        publisher: &Arc<P>,
    ) -> ShardEntry<P> {
        let validator = Arc::new(BlockValidator::new(shard_id, registry, config));
        ShardEntry {
            service: BlockValidationService::new(validator, Arc::clone(publisher)),
            metadata,
        }
    }

    fn entry(&self, shard_id: ShardId) -> Result<Arc<ShardEntry<P>>, ChainError> {
        self.table
            .read()
            .entries
            .get(&shard_id)
            .cloned()
            .ok_or(ChainError::UnknownShard(shard_id))
    }

    /// Validator of `shard_id`, for history and registry queries.
    pub fn validator(&self, shard_id: ShardId) -> Result<Arc<BlockValidator>, ChainError> {
        Ok(Arc::clone(self.entry(shard_id)?.service.validator()))
    }

    /// Validator of the main chain.
    pub fn main_chain(&self) -> Result<Arc<BlockValidator>, ChainError> {
        self.validator(MAIN_CHAIN)
    }

    /// Current hash of the main chain.
    pub fn main_current_hash(&self) -> Result<Hash, ChainError> {
        self.current_hash(MAIN_CHAIN)
    }

    /// Current block id of the main chain.
    pub fn main_block_id(&self) -> Result<BlockId, ChainError> {
        self.block_id(MAIN_CHAIN)
    }

    /// Submit a block to the main chain.
    pub async fn submit_main(
        &self,
        payload: &[u8],
        signature: &[u8],
        claimed: BlockId,
    ) -> Result<AcceptedBlock, ChainError> {
        self.route(MAIN_CHAIN, payload, signature, claimed).await
    }

    /// Validation settings every shard is created with.
    #[must_use]
    pub fn config(&self) -> ValidationConfig {
        self.config
    }
}

#[async_trait]
impl<P: EventPublisher> ShardingApi for ShardManager<P> {
    async fn add_side_chain(
        &self,
        caller: Address,
        members: Vec<Address>,
        metadata: Vec<u64>,
    ) -> Result<ShardId, ChainError> {
        if !self.main_chain()?.is_authorized(&caller) {
            debug!("[sc-05] Side chain request from {} denied", short_hex(&caller));
            return Err(ChainError::Unauthorized(caller));
        }
        if members.is_empty() {
            return Err(ChainError::EmptyMembership);
        }
        let registry = NodeRegistry::new(members.iter().copied())?;

        let shard_id = {
            let mut table = self.table.write();
            let shard_id = table.next_id;
            let Some(next_id) = shard_id.checked_add(1) else {
                warn!("[sc-05] Shard id space exhausted");
                return Err(ChainError::ShardIdsExhausted);
            };
            let entry = Self::build_entry(
                shard_id,
                registry,
                metadata.clone(),
                self.config,
                &self.publisher,
            );
            table.entries.insert(shard_id, Arc::new(entry));
            table.next_id = next_id;
            shard_id
        };

        info!(
            shard = shard_id,
            members = members.len(),
            "[sc-05] Side chain created by {}",
            short_hex(&caller)
        );

        self.publisher
            .publish(ChainEvent::SideChainAdded {
                shard_id,
                members,
                metadata,
                creator: caller,
            })
            .await;

        Ok(shard_id)
    }

    async fn route(
        &self,
        shard_id: ShardId,
        payload: &[u8],
        signature: &[u8],
        claimed: BlockId,
    ) -> Result<AcceptedBlock, ChainError> {
        let entry = self.entry(shard_id)?;
        entry.service.submit(payload, signature, claimed).await
    }

    async fn add_node(
        &self,
        shard_id: ShardId,
        caller: Address,
        new_node: Address,
    ) -> Result<usize, ChainError> {
        self.add_node_with_metadata(shard_id, caller, new_node, Vec::new())
            .await
    }

    async fn add_node_with_metadata(
        &self,
        shard_id: ShardId,
        caller: Address,
        new_node: Address,
        metadata: Vec<u64>,
    ) -> Result<usize, ChainError> {
        let entry = self.entry(shard_id)?;
        entry
            .service
            .add_node_with_metadata(caller, new_node, metadata)
            .await
    }

    fn node_metadata(&self, shard_id: ShardId, index: usize) -> Result<Vec<u64>, ChainError> {
        self.entry(shard_id)?.service.node_metadata(index)
    }

    fn current_hash(&self, shard_id: ShardId) -> Result<Hash, ChainError> {
        Ok(self.entry(shard_id)?.service.current_hash())
    }

    fn block_id(&self, shard_id: ShardId) -> Result<BlockId, ChainError> {
        Ok(self.entry(shard_id)?.service.current_block_id())
    }

    fn snapshot(&self, shard_id: ShardId) -> Result<ChainState, ChainError> {
        Ok(self.entry(shard_id)?.service.validator().state())
    }

    fn side_chain_info(&self, shard_id: ShardId) -> Result<SideChainInfo, ChainError> {
        let entry = self.entry(shard_id)?;
        let validator = entry.service.validator();
        Ok(SideChainInfo {
            shard_id,
            members: validator.nodes(),
            metadata: entry.metadata.clone(),
            state: validator.state(),
        })
    }

    fn shard_count(&self) -> usize {
        self.table.read().entries.len()
    }

    fn shard_ids(&self) -> Vec<ShardId> {
        let mut ids: Vec<ShardId> = self.table.read().entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
