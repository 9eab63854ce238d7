//! # Node Runtime
//!
//! Wires the shard manager to the event bus and runs the auditor.
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Build the main registry and the shard manager (shard 0)
//! 3. Subscribe the auditor before any block can be accepted
//! 4. Signal ready

use crate::auditor::{run_auditor, AuditLog};
use crate::config::{ConfigError, NodeConfig};
use sc_05_sharding::{ShardManager, ShardingApi};
use shared_bus::{EventFilter, InMemoryEventBus};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running node: chains, bus and auditor.
pub struct NodeRuntime {
    manager: Arc<ShardManager<InMemoryEventBus>>,
    bus: Arc<InMemoryEventBus>,
    audit_log: Arc<AuditLog>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Build a runtime from a validated configuration.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = config.main_registry()?;

        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let manager = Arc::new(ShardManager::new(
            registry,
            config.validation,
            Arc::clone(&bus),
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            main_nodes = config.main_nodes.len(),
            admin = config.admin.is_some(),
            scheme = %config.validation.digest_scheme,
            max_payload = config.validation.max_payload_bytes,
            "Creating Scale-Chain node runtime"
        );

        Ok(Self {
            manager,
            bus,
            audit_log: Arc::new(AuditLog::default()),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Spawn the auditor task.
    pub fn start(&self) -> JoinHandle<()> {
        let subscription = self.bus.subscribe(EventFilter::all());
        let handle = tokio::spawn(run_auditor(
            subscription,
            Arc::clone(&self.audit_log),
            self.shutdown_rx.clone(),
        ));

        info!("Shards: {:?}", self.manager.shard_ids());
        handle
    }

    /// Signal every task to stop.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
    }

    /// The shard manager, for submitting blocks and creating side chains.
    #[must_use]
    pub fn manager(&self) -> Arc<ShardManager<InMemoryEventBus>> {
        Arc::clone(&self.manager)
    }

    /// The event bus.
    #[must_use]
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    /// Heads observed by the auditor.
    #[must_use]
    pub fn audit_log(&self) -> Arc<AuditLog> {
        Arc::clone(&self.audit_log)
    }
}
