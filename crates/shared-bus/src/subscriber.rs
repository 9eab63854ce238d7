//! # Event Subscriber
//!
//! Receiving side of the bus. A `Subscription` owns one broadcast receiver
//! and applies its `EventFilter` locally; events that fall outside the
//! filter are consumed and discarded.
//!
//! When a receiver falls more than the channel capacity behind, the oldest
//! events are overwritten. The subscription skips ahead and keeps a running
//! count of what it missed, so an auditor can tell a quiet chain apart from
//! a lossy one.

use crate::events::{ChainEvent, EventFilter};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::Stream;
use tracing::warn;

/// Failure to read from a subscription.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Every sender is gone; no further events will arrive.
    #[error("Event bus closed")]
    Closed,
}

/// Anything that hands out filtered subscriptions.
pub trait EventSubscriber: Send + Sync {
    /// Open a subscription that yields only events matching `filter`.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

/// A filtered view of the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<ChainEvent>,
    filter: EventFilter,
    missed: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<ChainEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            missed: 0,
        }
    }

    /// Wait for the next matching event.
    ///
    /// Returns `None` once the bus has been dropped.
    pub async fn recv(&mut self) -> Option<ChainEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(n)) => self.note_lag(n),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<ChainEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(n)) => self.note_lag(n),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// Events overwritten before this subscription could read them.
    ///
    /// Counts every lost event, matching the filter or not.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// Filter applied to incoming events.
    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.filter
    }

    fn note_lag(&mut self, n: u64) {
        self.missed += n;
        warn!(skipped = n, total = self.missed, "Subscriber lagged behind the bus");
    }
}

/// `Stream` adapter over a subscription, for `StreamExt` consumers.
pub struct EventStream {
    inner: BroadcastStream<ChainEvent>,
    filter: EventFilter,
    missed: u64,
}

impl EventStream {
    /// Convert a subscription into a stream. Events already buffered in the
    /// subscription are kept.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        let Subscription {
            receiver,
            filter,
            missed,
        } = subscription;
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
            missed,
        }
    }

    /// Filter applied to incoming events.
    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Events overwritten before the stream could yield them.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }
}

impl Stream for EventStream {
    type Item = ChainEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    if self.filter.matches(&event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(n)))) => {
                    self.missed += n;
                    warn!(skipped = n, total = self.missed, "Event stream lagged behind the bus");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
