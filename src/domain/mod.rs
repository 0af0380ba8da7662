//! Domain layer for spellbreaker
//!
//! This module contains the core models, error types, and the port traits
//! that oracle adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, OracleError, OracleResult};
