//! API Ninjas Adapter
//!
//! Implementation of the QuoteSource port for the API Ninjas quotes endpoint.

mod client;

pub use client::{ApiNinjasClient, ApiNinjasConfig, API_KEY_PLACEHOLDER, DEFAULT_API_BASE_URL};
