//! Domain Layer - Core types and pure logic for the quote collection
//!
//! No I/O happens here. All external interactions go through the ports layer.
//!
//! - `quote`: the quote record, built-in categories and sort modes
//! - `preferences`: liked/bookmarked identity sets
//! - `view`: the pure view projector (filter, sort, annotate)

pub mod quote;
pub mod preferences;
pub mod view;

pub use quote::{Quote, SortMode, ParseSortModeError, CATEGORIES, is_known_category};
pub use preferences::{PreferenceKind, PreferenceSet, LIKED_KEY, BOOKMARKED_KEY};
pub use view::{DisplayQuote, ViewParams, project, matches_query};
