//! Preference Sets
//!
//! Binary user preferences (liked, bookmarked) keyed by quote text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage key of the liked set
pub const LIKED_KEY: &str = "likedQuotes";

/// Storage key of the bookmarked set
pub const BOOKMARKED_KEY: &str = "bookmarkedQuotes";

/// Which preference set an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    Liked,
    Bookmarked,
}

impl PreferenceKind {
    /// Fixed key the set is persisted under
    pub fn storage_key(&self) -> &'static str {
        match self {
            PreferenceKind::Liked => LIKED_KEY,
            PreferenceKind::Bookmarked => BOOKMARKED_KEY,
        }
    }
}

/// A set of quote texts
///
/// Serializes as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceSet {
    texts: BTreeSet<String>,
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    /// Add `text` if absent, remove it if present.
    /// Returns the membership after the toggle.
    pub fn toggle(&mut self, text: &str) -> bool {
        if self.texts.remove(text) {
            false
        } else {
            self.texts.insert(text.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Members in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            texts: iter.into_iter().map(Into::into).collect(),
        }
    }
}
