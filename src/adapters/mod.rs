//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - API Ninjas: remote quote provider client
//! - Storage: file-backed preference storage
//! - CLI: Command-line interface handlers

pub mod api_ninjas;
pub mod storage;
pub mod cli;

pub use api_ninjas::{ApiNinjasClient, ApiNinjasConfig};
pub use storage::JsonFileStorage;
pub use cli::CliApp;
