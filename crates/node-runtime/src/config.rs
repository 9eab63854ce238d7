//! # Node Configuration
//!
//! Runtime parameters with environment overrides.
//!
//! | Variable               | Meaning                                  |
//! |------------------------|------------------------------------------|
//! | `SC_ADMIN_ADDRESS`     | administrator of the main registry (hex) |
//! | `SC_MAIN_NODES`        | comma-separated hex addresses            |
//! | `SC_MAX_PAYLOAD_BYTES` | payload bound                            |
//! | `SC_DIGEST_SCHEME`     | `keccak256` or `eth-signed-message`      |
//! | `SC_BUS_CAPACITY`      | event channel capacity                   |

use sc_01_signature_verification::DigestScheme;
use sc_02_node_registry::NodeRegistry;
use sc_04_block_validation::ValidationConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{parse_address, Address, ChainError};
use thiserror::Error;
use tracing::info;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Main-chain administrator, registered as a main node at startup.
    pub admin: Option<Address>,
    /// Initial main-chain members.
    pub main_nodes: Vec<Address>,
    /// Payload bound and digest scheme shared by every chain.
    pub validation: ValidationConfig,
    /// Event bus capacity.
    pub bus_capacity: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            admin: None,
            main_nodes: Vec::new(),
            validation: ValidationConfig::default(),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// Environment variable name.
        var: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Neither an administrator nor a main node is configured.
    #[error("No administrator and no main nodes configured: nobody could submit blocks. Set SC_ADMIN_ADDRESS or SC_MAIN_NODES.")]
    NoAuthority,

    /// Payload bound of zero rejects every block.
    #[error("SC_MAX_PAYLOAD_BYTES must be greater than zero")]
    ZeroPayloadBound,

    /// Event bus capacity of zero.
    #[error("SC_BUS_CAPACITY must be greater than zero")]
    ZeroBusCapacity,

    /// Initial main node set is not valid.
    #[error("Invalid main node set: {0}")]
    Registry(#[from] ChainError),
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(admin) = lookup("SC_ADMIN_ADDRESS") {
            config.admin = Some(parse_address(admin.trim()).map_err(|e| {
                ConfigError::InvalidValue {
                    var: "SC_ADMIN_ADDRESS",
                    reason: e.to_string(),
                }
            })?);
            info!("Loaded administrator address from environment");
        }

        if let Some(nodes) = lookup("SC_MAIN_NODES") {
            config.main_nodes = nodes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    parse_address(s).map_err(|e| ConfigError::InvalidValue {
                        var: "SC_MAIN_NODES",
                        reason: format!("{s}: {e}"),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(max) = lookup("SC_MAX_PAYLOAD_BYTES") {
            config.validation.max_payload_bytes =
                max.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        var: "SC_MAX_PAYLOAD_BYTES",
                        reason: e.to_string(),
                    }
                })?;
        }

        if let Some(scheme) = lookup("SC_DIGEST_SCHEME") {
            config.validation.digest_scheme =
                scheme
                    .parse::<DigestScheme>()
                    .map_err(|e| ConfigError::InvalidValue {
                        var: "SC_DIGEST_SCHEME",
                        reason: e.to_string(),
                    })?;
        }

        if let Some(capacity) = lookup("SC_BUS_CAPACITY") {
            config.bus_capacity =
                capacity
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        var: "SC_BUS_CAPACITY",
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }

    /// Reject configurations under which the node could never accept a block.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_none() && self.main_nodes.is_empty() {
            return Err(ConfigError::NoAuthority);
        }
        if self.validation.max_payload_bytes == 0 {
            return Err(ConfigError::ZeroPayloadBound);
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        Ok(())
    }

    /// Main-chain registry described by this configuration.
    ///
    /// The administrator is seeded as the first member unless it is already
    /// listed in `main_nodes`, so a freshly started node can sign main-chain
    /// blocks with the administrator key alone.
    pub fn main_registry(&self) -> Result<NodeRegistry, ConfigError> {
        let registry = match self.admin {
            Some(admin) => {
                let seed = (!self.main_nodes.contains(&admin)).then_some(admin);
                let nodes = seed.into_iter().chain(self.main_nodes.iter().copied());
                NodeRegistry::with_admin(admin, nodes)?
            }
            None => NodeRegistry::new(self.main_nodes.iter().copied())?,
        };
        Ok(registry)
    }
}
