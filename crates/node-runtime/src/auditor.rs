//! # Chain Auditor
//!
//! Follows the event bus and keeps the highest announced head of every
//! shard.
//!
//! Validators publish after releasing the chain lock, so two submissions
//! to the same shard may announce their blocks in either order. An id that
//! jumps past the head opens a hole for every id skipped; a late event
//! fills its hole. Holes still open are reported by `gaps`, and are real
//! losses only once the bus has moved on (see `missed_events`, mirrored
//! from the subscription's lag counter).

use parking_lot::RwLock;
use shared_bus::{ChainEvent, Subscription};
use shared_types::{short_hex, Address, BlockId, ChainState, Hash, ShardId};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Open holes kept per shard. Older holes are forgotten first.
pub const MAX_OPEN_GAPS_PER_SHARD: usize = 1024;

#[derive(Debug)]
struct ShardTrack {
    head: ChainState,
    open: BTreeSet<BlockId>,
}

impl ShardTrack {
    fn genesis() -> Self {
        Self {
            head: ChainState::genesis(),
            open: BTreeSet::new(),
        }
    }
}

/// Shard heads as seen through events.
#[derive(Debug, Default)]
pub struct AuditLog {
    shards: RwLock<HashMap<ShardId, ShardTrack>>,
    missed: AtomicU64,
    forgotten: AtomicU64,
}

impl AuditLog {
    /// Highest head announced for `shard_id`.
    #[must_use]
    pub fn head(&self, shard_id: ShardId) -> Option<ChainState> {
        self.shards.read().get(&shard_id).map(|track| track.head)
    }

    /// Shards with at least one announced block or known to exist.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.read().len()
    }

    /// `(shard, block_id)` pairs below the head that were never announced,
    /// ordered by shard then id.
    #[must_use]
    pub fn gaps(&self) -> Vec<(ShardId, BlockId)> {
        let shards = self.shards.read();
        let mut gaps: Vec<_> = shards
            .iter()
            .flat_map(|(shard, track)| track.open.iter().map(move |id| (*shard, *id)))
            .collect();
        gaps.sort_unstable();
        gaps
    }

    /// Events the auditor's subscription lost to lag.
    #[must_use]
    pub fn missed_events(&self) -> u64 {
        self.missed.load(Ordering::Relaxed)
    }

    /// Holes dropped from `gaps` to respect `MAX_OPEN_GAPS_PER_SHARD`.
    #[must_use]
    pub fn forgotten_gaps(&self) -> u64 {
        self.forgotten.load(Ordering::Relaxed)
    }

    /// Apply one event.
    pub fn record(&self, event: &ChainEvent) {
        match event {
            ChainEvent::BlockAccepted {
                shard_id,
                block_id,
                hash,
                signer,
            } => self.record_block(*shard_id, *block_id, hash, signer),
            ChainEvent::NodeAdded {
                shard_id,
                address,
                index,
            } => {
                info!(
                    shard = shard_id,
                    index = index,
                    "[auditor] Node {} joined",
                    short_hex(address)
                );
            }
            ChainEvent::SideChainAdded {
                shard_id,
                members,
                metadata,
                creator,
            } => {
                self.shards
                    .write()
                    .entry(*shard_id)
                    .or_insert_with(ShardTrack::genesis);
                info!(
                    shard = shard_id,
                    members = members.len(),
                    metadata = ?metadata,
                    "[auditor] Side chain created by {}",
                    short_hex(creator)
                );
            }
        }
    }

    fn record_block(&self, shard_id: ShardId, block_id: BlockId, hash: &Hash, signer: &Address) {
        let mut shards = self.shards.write();
        let track = shards.entry(shard_id).or_insert_with(ShardTrack::genesis);
        let previous = track.head.block_id;

        if block_id <= previous {
            if track.open.remove(&block_id) {
                debug!(
                    shard = shard_id,
                    "[auditor] Block {} arrived after {}",
                    block_id,
                    previous
                );
            } else {
                warn!(
                    shard = shard_id,
                    "[auditor] Block {} announced twice",
                    block_id
                );
            }
            return;
        }

        if block_id > previous + 1 {
            // Only the newest holes are worth remembering.
            let cap = MAX_OPEN_GAPS_PER_SHARD as BlockId;
            let first = (previous + 1).max(block_id.saturating_sub(cap));
            track.open.extend(first..block_id);
            debug!(
                shard = shard_id,
                "[auditor] Block {} announced after {}",
                block_id,
                previous
            );
        }
        while track.open.len() > MAX_OPEN_GAPS_PER_SHARD {
            track.open.pop_first();
            self.forgotten.fetch_add(1, Ordering::Relaxed);
        }

        track.head = ChainState {
            current_hash: *hash,
            block_id,
        };
        info!(
            shard = shard_id,
            block_id = block_id,
            "[auditor] Head {} signed by {}",
            short_hex(hash),
            short_hex(signer)
        );
    }
}

/// Consume `subscription` into `log` until shutdown or bus closure.
pub async fn run_auditor(
    mut subscription: Subscription,
    log: Arc<AuditLog>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("[auditor] Chain auditor started");
    loop {
        tokio::select! {
            event = subscription.recv() => match event {
                Some(event) => {
                    log.missed.store(subscription.missed(), Ordering::Relaxed);
                    log.record(&event);
                }
                None => {
                    info!("[auditor] Event bus closed");
                    break;
                }
            },
            _ = shutdown.changed() => {
                info!("[auditor] Shutdown signal received");
                break;
            }
        }
    }
}
