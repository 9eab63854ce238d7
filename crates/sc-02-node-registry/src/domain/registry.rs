//! # Registry
//!
//! Membership list with O(1) lookup. Every member carries an opaque
//! `Vec<u64>` of node metadata (node id, public key limbs and the like)
//! that the registry stores but never interprets.

use shared_types::{short_hex, Address, ChainError};
use std::collections::HashMap;
use tracing::debug;

/// Authorized nodes of one chain, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRegistry {
    members: Vec<Address>,
    metadata: Vec<Vec<u64>>,
    index: HashMap<Address, usize>,
    admin: Option<Address>,
}

impl NodeRegistry {
    /// Build a registry from an initial member list.
    ///
    /// # Errors
    /// `DuplicateNode` if an address is listed twice.
    pub fn new(initial: impl IntoIterator<Item = Address>) -> Result<Self, ChainError> {
        let mut registry = Self::default();
        for address in initial {
            registry.push(address)?;
        }
        Ok(registry)
    }

    /// Build a registry whose administrator may add nodes without being one.
    ///
    /// The administrator is not a member unless it is also listed in
    /// `initial`, so it cannot sign blocks by itself.
    pub fn with_admin(
        admin: Address,
        initial: impl IntoIterator<Item = Address>,
    ) -> Result<Self, ChainError> {
        let mut registry = Self::new(initial)?;
        registry.admin = Some(admin);
        Ok(registry)
    }

    /// Append `new_node` on behalf of `caller`, returning its index.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is a member or the administrator
    /// - `DuplicateNode` if `new_node` is already registered
    pub fn add_node(&mut self, caller: Address, new_node: Address) -> Result<usize, ChainError> {
        self.add_node_with_metadata(caller, new_node, Vec::new())
    }

    /// Like [`add_node`](Self::add_node), attaching `metadata` to the new
    /// member. Nothing is stored when the call fails.
    pub fn add_node_with_metadata(
        &mut self,
        caller: Address,
        new_node: Address,
        metadata: Vec<u64>,
    ) -> Result<usize, ChainError> {
        if !self.is_authorized(&caller) {
            debug!("[sc-02] Rejected add_node from {}", short_hex(&caller));
            return Err(ChainError::Unauthorized(caller));
        }
        self.push_with(new_node, metadata)
    }

    fn push(&mut self, address: Address) -> Result<usize, ChainError> {
        self.push_with(address, Vec::new())
    }

    fn push_with(&mut self, address: Address, metadata: Vec<u64>) -> Result<usize, ChainError> {
        if self.index.contains_key(&address) {
            return Err(ChainError::DuplicateNode(address));
        }
        let position = self.members.len();
        self.members.push(address);
        self.metadata.push(metadata);
        self.index.insert(address, position);
        Ok(position)
    }

    /// Whether `address` may sign blocks.
    #[must_use]
    pub fn is_member(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    /// Whether `address` may grow the registry.
    #[must_use]
    pub fn is_authorized(&self, address: &Address) -> bool {
        self.is_member(address) || self.admin.as_ref() == Some(address)
    }

    /// Number of members.
    #[must_use]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Member at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[0, count())`.
    pub fn get_node(&self, index: usize) -> Result<Address, ChainError> {
        self.members
            .get(index)
            .copied()
            .ok_or(ChainError::IndexOutOfRange {
                index,
                count: self.members.len(),
            })
    }

    /// Metadata of the member at `index`. Initial members have none.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[0, count())`.
    pub fn node_metadata(&self, index: usize) -> Result<&[u64], ChainError> {
        self.metadata
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ChainError::IndexOutOfRange {
                index,
                count: self.members.len(),
            })
    }

    /// Metadata of `address`, if registered.
    #[must_use]
    pub fn metadata_of(&self, address: &Address) -> Option<&[u64]> {
        let position = self.index_of(address)?;
        self.metadata.get(position).map(Vec::as_slice)
    }

    /// All members in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Address] {
        &self.members
    }

    /// Position of `address`, if registered.
    #[must_use]
    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.index.get(address).copied()
    }

    /// Administrator, if any.
    #[must_use]
    pub fn admin(&self) -> Option<Address> {
        self.admin
    }
}
