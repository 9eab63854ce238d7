//! # Event Publisher
//!
//! `EventPublisher` is the outbound port the validation and sharding
//! services write to. `InMemoryEventBus` is the only implementation: a
//! `tokio::sync::broadcast` channel that fans each event out to every live
//! subscription.

use crate::events::{ChainEvent, EventFilter};
use crate::subscriber::{EventStream, EventSubscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Sink for chain notifications.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event. Returns how many subscriptions it was handed to;
    /// zero is not an error.
    async fn publish(&self, event: ChainEvent) -> usize;

    /// Events published since creation, delivered or not.
    fn events_published(&self) -> u64;
}

/// Broadcast-backed bus shared by all chains of one node.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<ChainEvent>,
    published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus buffering `DEFAULT_CHANNEL_CAPACITY` events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (a `broadcast` channel requirement).
    /// Callers reading the capacity from configuration validate it first.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Open a subscription. Only events published after this call are seen.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, shards = ?filter.shards, "Subscriber attached");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Same as `subscribe`, wrapped as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Live subscriptions and streams.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        InMemoryEventBus::subscribe(self, filter)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: ChainEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let (topic, shard) = (event.topic(), event.shard_id());

        // `send` only fails when nobody is listening.
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(?topic, shard, delivered, "Event published");
        delivered
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
