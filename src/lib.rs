//! QuoteVerse - client-side quote collection library
//!
//! Fetches quotations from a remote provider, keeps liked/bookmarked
//! preferences across runs, and projects a filtered, sorted view.
//!
//! # Modules
//!
//! - `domain`: Core types and pure logic (Quote, PreferenceSet, view projector)
//! - `ports`: Trait abstractions (QuoteSource, PreferenceStorage)
//! - `adapters`: External implementations (API Ninjas, JSON files, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Collection state manager and preference store

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
