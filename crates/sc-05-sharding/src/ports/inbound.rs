//! # Inbound Ports
//!
//! API trait defining what the sharding subsystem can do.

use crate::domain::SideChainInfo;
use async_trait::async_trait;
use sc_04_block_validation::AcceptedBlock;
use shared_types::{Address, BlockId, ChainError, ChainState, Hash, ShardId};

/// Sharding API - inbound port.
#[async_trait]
pub trait ShardingApi: Send + Sync {
    /// Create a side chain seeded with `members`. Only main-chain nodes (or
    /// the administrator) may do this.
    async fn add_side_chain(
        &self,
        caller: Address,
        members: Vec<Address>,
        metadata: Vec<u64>,
    ) -> Result<ShardId, ChainError>;

    /// Submit a block to `shard_id`.
    async fn route(
        &self,
        shard_id: ShardId,
        payload: &[u8],
        signature: &[u8],
        claimed: BlockId,
    ) -> Result<AcceptedBlock, ChainError>;

    /// Register a node on `shard_id` on behalf of `caller`.
    async fn add_node(
        &self,
        shard_id: ShardId,
        caller: Address,
        new_node: Address,
    ) -> Result<usize, ChainError>;

    /// Register a node on `shard_id` together with its opaque metadata.
    async fn add_node_with_metadata(
        &self,
        shard_id: ShardId,
        caller: Address,
        new_node: Address,
        metadata: Vec<u64>,
    ) -> Result<usize, ChainError>;

    /// Metadata of the node at `index` on `shard_id`.
    fn node_metadata(&self, shard_id: ShardId, index: usize) -> Result<Vec<u64>, ChainError>;

    /// Current hash of `shard_id`.
    fn current_hash(&self, shard_id: ShardId) -> Result<Hash, ChainError>;

    /// Current block id of `shard_id`.
    fn block_id(&self, shard_id: ShardId) -> Result<BlockId, ChainError>;

    /// Consistent state of `shard_id`.
    fn snapshot(&self, shard_id: ShardId) -> Result<ChainState, ChainError>;

    /// Members, metadata and state of `shard_id`.
    fn side_chain_info(&self, shard_id: ShardId) -> Result<SideChainInfo, ChainError>;

    /// Number of shards, the main chain included.
    fn shard_count(&self) -> usize;

    /// All shard ids in ascending order.
    fn shard_ids(&self) -> Vec<ShardId>;
}
