//! # Shared Bus
//!
//! Notification channel between the chain services and whoever watches
//! them. Validators publish `BlockAccepted` and `NodeAdded`; the shard
//! manager publishes `SideChainAdded`. The node's auditor is the usual
//! subscriber.
//!
//! ```text
//!  sc-04 validators ──┐
//!                     ├── publish() ──▶ InMemoryEventBus ──▶ Subscription ──▶ auditor
//!  sc-05 shard mgr ───┘                 (broadcast)         (filtered)
//! ```
//!
//! Nothing in the chaining core reads these events back. Delivery is best
//! effort: an event published with no subscriber is dropped, and a
//! subscriber that falls a full buffer behind skips ahead and counts the
//! gap (see [`Subscription::missed`]).

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{ChainEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Events buffered per subscriber before the oldest are overwritten.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
