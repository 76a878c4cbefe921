//! Quote
//!
//! The identity and content unit of the collection. Quotes carry no surrogate
//! id: the quotation body is the identity key for likes, bookmarks and search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Built-in browsing categories offered by the collection
pub const CATEGORIES: [&str; 10] = [
    "inspirational",
    "life",
    "happiness",
    "love",
    "success",
    "motivation",
    "wisdom",
    "humor",
    "friendship",
    "family",
];

/// A single quotation record
///
/// Field names on the wire are `quote`, `author` and `category`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Quotation body, also the identity key
    #[serde(rename = "quote")]
    pub text: String,
    pub author: String,
    /// Free-form label, not restricted to [`CATEGORIES`]
    #[serde(default)]
    pub category: String,
}

impl Quote {
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            category: category.into(),
        }
    }

    /// Identity key used by the preference sets
    pub fn identity(&self) -> &str {
        &self.text
    }

    /// Two quotes are the same quote iff their text is byte-identical
    pub fn same_as(&self, other: &Quote) -> bool {
        self.text == other.text
    }

    /// Citation line used for copying and sharing
    pub fn citation(&self) -> String {
        format!("\"{}\" — {}", self.text, self.author)
    }

    /// Whether the category is one of the built-in browsing categories
    pub fn has_known_category(&self) -> bool {
        is_known_category(&self.category)
    }
}

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// Display ordering applied by the view projector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Working set order
    #[default]
    Recent,
    /// Liked quotes first, otherwise working set order
    Popular,
    /// Fresh shuffle on every projection
    Random,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Popular => "popular",
            SortMode::Random => "random",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown sort mode '{0}' (expected recent, popular or random)")]
pub struct ParseSortModeError(String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(SortMode::Recent),
            "popular" => Ok(SortMode::Popular),
            "random" => Ok(SortMode::Random),
            other => Err(ParseSortModeError(other.to_string())),
        }
    }
}
