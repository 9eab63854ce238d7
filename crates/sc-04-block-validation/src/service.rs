//! # Block Validation Service
//!
//! Wraps a [`BlockValidator`] and announces its state changes on the event
//! bus. Events are published only after the chain lock has been released,
//! and a failed publication never undoes an accepted block.

use crate::domain::AcceptedBlock;
use crate::ports::inbound::BlockValidationApi;
use crate::validator::BlockValidator;
use async_trait::async_trait;
use sc_01_signature_verification::{SignatureVerificationApi, SignatureVerificationService};
use shared_bus::{ChainEvent, EventPublisher};
use shared_types::{Address, BlockId, ChainError, Hash};
use std::sync::Arc;

/// Block validation service for one chain.
///
/// ## Thread Safety
///
/// Cheap to share via `Arc`; all state lives in the validator's lock.
pub struct BlockValidationService<P, V = SignatureVerificationService>
where
    P: EventPublisher,
    V: SignatureVerificationApi,
{
    validator: Arc<BlockValidator<V>>,
    publisher: Arc<P>,
}

impl<P, V> BlockValidationService<P, V>
where
    P: EventPublisher,
    V: SignatureVerificationApi,
{
    /// Create a service publishing to `publisher`.
    pub fn new(validator: Arc<BlockValidator<V>>, publisher: Arc<P>) -> Self {
        Self {
            validator,
            publisher,
        }
    }

    /// The wrapped validator, for synchronous readers.
    #[must_use]
    pub fn validator(&self) -> &Arc<BlockValidator<V>> {
        &self.validator
    }
}

impl From<AcceptedBlock> for ChainEvent {
    fn from(accepted: AcceptedBlock) -> Self {
        ChainEvent::BlockAccepted {
            shard_id: accepted.shard_id,
            block_id: accepted.block_id,
            hash: accepted.hash,
            signer: accepted.signer,
        }
    }
}

#[async_trait]
impl<P, V> BlockValidationApi for BlockValidationService<P, V>
where
    P: EventPublisher,
    V: SignatureVerificationApi,
{
    async fn submit(
        &self,
        payload: &[u8],
        signature: &[u8],
        claimed: BlockId,
    ) -> Result<AcceptedBlock, ChainError> {
        let accepted = self.validator.submit(payload, signature, claimed)?;
        self.publisher.publish(accepted.into()).await;
        Ok(accepted)
    }

    async fn add_node(&self, caller: Address, new_node: Address) -> Result<usize, ChainError> {
        self.add_node_with_metadata(caller, new_node, Vec::new()).await
    }

    async fn add_node_with_metadata(
        &self,
        caller: Address,
        new_node: Address,
        metadata: Vec<u64>,
    ) -> Result<usize, ChainError> {
        let index = self
            .validator
            .add_node_with_metadata(caller, new_node, metadata)?;
        self.publisher
            .publish(ChainEvent::NodeAdded {
                shard_id: self.validator.shard_id(),
                address: new_node,
                index,
            })
            .await;
        Ok(index)
    }

    fn current_hash(&self) -> Hash {
        self.validator.current_hash()
    }

    fn current_block_id(&self) -> BlockId {
        self.validator.current_block_id()
    }

    fn node_count(&self) -> usize {
        self.validator.node_count()
    }

    fn get_node(&self, index: usize) -> Result<Address, ChainError> {
        self.validator.get_node(index)
    }

    fn node_metadata(&self, index: usize) -> Result<Vec<u64>, ChainError> {
        self.validator.node_metadata(index)
    }
}
