//! # Inbound Ports (Driving Ports / API)

use crate::domain::AcceptedBlock;
use async_trait::async_trait;
use shared_types::{Address, BlockId, ChainError, Hash};

/// Block submission API of one chain.
#[async_trait]
pub trait BlockValidationApi: Send + Sync {
    /// Submit a signed block claiming id `claimed`.
    async fn submit(
        &self,
        payload: &[u8],
        signature: &[u8],
        claimed: BlockId,
    ) -> Result<AcceptedBlock, ChainError>;

    /// Register a node on behalf of `caller`.
    async fn add_node(&self, caller: Address, new_node: Address) -> Result<usize, ChainError>;

    /// Register a node and the opaque metadata that travels with it.
    async fn add_node_with_metadata(
        &self,
        caller: Address,
        new_node: Address,
        metadata: Vec<u64>,
    ) -> Result<usize, ChainError>;

    /// Hash after the latest accepted block.
    fn current_hash(&self) -> Hash;

    /// Id of the latest accepted block.
    fn current_block_id(&self) -> BlockId;

    /// Number of registered nodes.
    fn node_count(&self) -> usize;

    /// Node at `index`.
    fn get_node(&self, index: usize) -> Result<Address, ChainError>;

    /// Metadata of the node at `index`.
    fn node_metadata(&self, index: usize) -> Result<Vec<u64>, ChainError>;
}
