//! # Scale-Chain Node Runtime
//!
//! Hosts the main chain and its side chains in one process.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG`, INFO by default)
//! 2. Load configuration from `SC_*` environment variables
//! 3. Build the shard manager and start the auditor
//! 4. Run until Ctrl+C

use anyhow::{Context, Result};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Scale-Chain Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let runtime = NodeRuntime::new(config).context("Invalid node configuration")?;
    let auditor = runtime.start();

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown();
    auditor.await.context("Auditor task panicked")?;
    info!("Shutdown complete");

    Ok(())
}
