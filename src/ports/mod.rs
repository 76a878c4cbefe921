//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The remote quote provider
//! - Key/value storage for persisted preferences

pub mod quote_source;
pub mod storage;
pub mod mocks;

pub use quote_source::{FetchScope, QuoteSource, QuoteSourceError};
pub use storage::{PreferenceStorage, StorageError};
