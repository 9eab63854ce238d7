//! # Domain Layer
//!
//! Pure chaining logic, no I/O.

pub mod chain;
pub mod hashing;
