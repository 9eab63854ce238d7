//! # Chain Events
//!
//! Defines all event types that flow through the shared bus. Auditors and
//! monitoring consume these; no core behavior depends on their delivery.

use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockId, Hash, ShardId};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainEvent {
    // =========================================================================
    // BLOCK VALIDATION (sc-04)
    // =========================================================================
    /// A block was accepted and the chain hash advanced.
    BlockAccepted {
        /// Chain the block was appended to.
        shard_id: ShardId,
        /// Id of the accepted block.
        block_id: BlockId,
        /// Chain hash after the block.
        hash: Hash,
        /// Recovered signer.
        signer: Address,
    },

    // =========================================================================
    // NODE REGISTRY (sc-02)
    // =========================================================================
    /// A node joined a chain's registry.
    NodeAdded {
        /// Chain whose registry grew.
        shard_id: ShardId,
        /// The new member.
        address: Address,
        /// Position of the new member.
        index: usize,
    },

    // =========================================================================
    // SHARDING (sc-05)
    // =========================================================================
    /// A side chain was created.
    SideChainAdded {
        /// Freshly allocated shard id.
        shard_id: ShardId,
        /// Initial members of the side chain.
        members: Vec<Address>,
        /// Opaque per-shard configuration values.
        metadata: Vec<u64>,
        /// Main node that created the side chain.
        creator: Address,
    },
}

impl ChainEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::BlockAccepted { .. } => EventTopic::Chain,
            Self::NodeAdded { .. } => EventTopic::Membership,
            Self::SideChainAdded { .. } => EventTopic::Sharding,
        }
    }

    /// Shard the event concerns.
    #[must_use]
    pub fn shard_id(&self) -> ShardId {
        match self {
            Self::BlockAccepted { shard_id, .. }
            | Self::NodeAdded { shard_id, .. }
            | Self::SideChainAdded { shard_id, .. } => *shard_id,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Accepted blocks.
    Chain,
    /// Registry growth.
    Membership,
    /// Side chain creation.
    Sharding,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Shards to include. Empty means all shards.
    pub shards: Vec<ShardId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            shards: Vec::new(),
        }
    }

    /// Create a filter for events concerning specific shards.
    #[must_use]
    pub fn shards(shards: Vec<ShardId>) -> Self {
        Self {
            topics: Vec::new(),
            shards,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ChainEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let shard_match = self.shards.is_empty() || self.shards.contains(&event.shard_id());

        topic_match && shard_match
    }
}
