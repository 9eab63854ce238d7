//! # Domain Layer

pub mod entities;

pub use entities::SideChainInfo;
