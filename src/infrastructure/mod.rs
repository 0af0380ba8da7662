//! Infrastructure layer module
//!
//! Configuration loading, logging setup and project initialization. Oracle
//! adapters live in `crate::adapters`.

pub mod config;
pub mod logging;
pub mod setup;
