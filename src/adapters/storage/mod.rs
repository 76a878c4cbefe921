//! Storage Adapters
//!
//! Implementations of the PreferenceStorage port.

mod json_file;

pub use json_file::JsonFileStorage;
