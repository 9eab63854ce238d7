//! # Integration Flows

pub mod adversarial;
pub mod concurrency;
pub mod eth_scheme;
pub mod main_chain;
pub mod side_chains;
