//! Success memory adapters.

pub mod json_file;

pub use json_file::{InMemorySuccessMemory, JsonFileMemory};
