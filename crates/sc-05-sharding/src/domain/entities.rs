//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainState, ShardId};

/// Description of one shard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideChainInfo {
    /// Shard id (0 is the main chain).
    pub shard_id: ShardId,
    /// Registered nodes in order.
    pub members: Vec<Address>,
    /// Opaque values supplied at creation (port or id hints).
    pub metadata: Vec<u64>,
    /// Current hash and block id.
    pub state: ChainState,
}
