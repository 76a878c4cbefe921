//! Preference Store
//!
//! Owns the liked and bookmarked sets and is the only writer to preference
//! storage. Every toggle is persisted immediately (write-through).
//!
//! Storage faults never escape this type: unreadable or malformed entries load
//! as empty sets, and failed writes keep the in-memory state and log a warning.

use crate::domain::{PreferenceKind, PreferenceSet};
use crate::ports::storage::PreferenceStorage;

pub struct PreferenceStore<S: PreferenceStorage> {
    storage: S,
    liked: PreferenceSet,
    bookmarked: PreferenceSet,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    /// Load both sets from `storage`; never fails
    pub fn load(storage: S) -> Self {
        let liked = read_set(&storage, PreferenceKind::Liked);
        let bookmarked = read_set(&storage, PreferenceKind::Bookmarked);

        tracing::info!(
            "Preferences loaded: {} liked, {} bookmarked",
            liked.len(),
            bookmarked.len()
        );

        Self {
            storage,
            liked,
            bookmarked,
        }
    }

    pub fn set(&self, kind: PreferenceKind) -> &PreferenceSet {
        match kind {
            PreferenceKind::Liked => &self.liked,
            PreferenceKind::Bookmarked => &self.bookmarked,
        }
    }

    fn set_mut(&mut self, kind: PreferenceKind) -> &mut PreferenceSet {
        match kind {
            PreferenceKind::Liked => &mut self.liked,
            PreferenceKind::Bookmarked => &mut self.bookmarked,
        }
    }

    pub fn liked(&self) -> &PreferenceSet {
        &self.liked
    }

    pub fn bookmarked(&self) -> &PreferenceSet {
        &self.bookmarked
    }

    pub fn is_liked(&self, text: &str) -> bool {
        self.liked.contains(text)
    }

    pub fn is_bookmarked(&self, text: &str) -> bool {
        self.bookmarked.contains(text)
    }

    /// Flip membership of `text` in the chosen set, persist, and return the new set
    pub fn toggle(&mut self, kind: PreferenceKind, text: &str) -> &PreferenceSet {
        let now_member = self.set_mut(kind).toggle(text);
        tracing::debug!(
            "{:?} {}: {}",
            kind,
            if now_member { "added" } else { "removed" },
            text
        );
        self.persist(kind);
        self.set(kind)
    }

    /// Returns whether the quote is liked after the toggle
    pub fn toggle_like(&mut self, text: &str) -> bool {
        self.toggle(PreferenceKind::Liked, text).contains(text)
    }

    /// Returns whether the quote is bookmarked after the toggle
    pub fn toggle_bookmark(&mut self, text: &str) -> bool {
        self.toggle(PreferenceKind::Bookmarked, text).contains(text)
    }

    /// Write the full set under its fixed key, overwriting prior content
    pub fn persist(&self, kind: PreferenceKind) {
        let key = kind.storage_key();
        let serialized = match serde_json::to_string_pretty(self.set(kind)) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Failed to serialize {}: {}", key, e);
                return;
            }
        };

        match self.storage.write(key, &serialized) {
            Ok(()) => tracing::debug!("Persisted {} ({} entries)", key, self.set(kind).len()),
            Err(e) => tracing::warn!("Preferences not persisted, keeping in-memory state: {}", e),
        }
    }
}

fn read_set<S: PreferenceStorage>(storage: &S, kind: PreferenceKind) -> PreferenceSet {
    let key = kind.storage_key();
    match storage.read(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Malformed {} entry, starting empty: {}", key, e);
            PreferenceSet::new()
        }),
        Ok(None) => PreferenceSet::new(),
        Err(e) => {
            tracing::warn!("Could not read {}, starting empty: {}", key, e);
            PreferenceSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::JsonFileStorage;
    use crate::ports::mocks::InMemoryStorage;
    use crate::ports::storage::{MockPreferenceStorage, StorageError};
    use tempfile::tempdir;

    #[test]
    fn test_absent_storage_loads_empty() {
        let store = PreferenceStore::load(InMemoryStorage::new());
        assert!(store.liked().is_empty());
        assert!(store.bookmarked().is_empty());
    }

    #[test]
    fn test_loads_existing_entries() {
        let storage = InMemoryStorage::new()
            .with_entry("likedQuotes", r#"["a","b"]"#)
            .with_entry("bookmarkedQuotes", r#"["c"]"#);
        let store = PreferenceStore::load(storage);
        assert!(store.is_liked("a") && store.is_liked("b"));
        assert!(store.is_bookmarked("c"));
        assert!(!store.is_bookmarked("a"));
    }

    #[test]
    fn test_malformed_entry_falls_back_to_empty() {
        let storage = InMemoryStorage::new()
            .with_entry("likedQuotes", "{not json")
            .with_entry("bookmarkedQuotes", r#"["ok"]"#);
        let store = PreferenceStore::load(storage);
        assert!(store.liked().is_empty());
        assert!(store.is_bookmarked("ok"));
    }

    #[test]
    fn test_wrong_shape_falls_back_to_empty() {
        let storage = InMemoryStorage::new().with_entry("likedQuotes", r#"{"a":1}"#);
        let store = PreferenceStore::load(storage);
        assert!(store.liked().is_empty());
    }

    #[test]
    fn test_toggle_writes_through() {
        let storage = InMemoryStorage::new();
        let mut store = PreferenceStore::load(storage.clone());

        assert!(store.toggle_like("Carpe diem."));
        assert_eq!(storage.get_writes(), vec!["likedQuotes".to_string()]);
        let raw = storage.get("likedQuotes").unwrap();
        let persisted: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec!["Carpe diem.".to_string()]);

        assert!(!store.toggle_like("Carpe diem."));
        let raw = storage.get("likedQuotes").unwrap();
        let persisted: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert!(persisted.is_empty());
        assert!(storage.get("bookmarkedQuotes").is_none());
    }

    #[test]
    fn test_sets_are_independent() {
        let mut store = PreferenceStore::load(InMemoryStorage::new());
        store.toggle_bookmark("x");
        assert!(store.is_bookmarked("x"));
        assert!(!store.is_liked("x"));
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let storage = InMemoryStorage::new().with_entry("likedQuotes", r#"["keep"]"#);
        let mut store = PreferenceStore::load(storage);
        let before = store.liked().clone();

        store.toggle(PreferenceKind::Liked, "t");
        let after = store.toggle(PreferenceKind::Liked, "t").clone();
        assert_eq!(after, before);
    }

    #[test]
    fn test_persistence_round_trip_with_unicode() {
        let dir = tempdir().unwrap();
        let texts = [
            "He said \"no\" and left.",
            "It's a 'single' quote",
            "Back\\slash and\nnewline",
            "Ce n'est qu'un au revoir — « à bientôt »",
            "知之为知之，不知为不知",
            "🙂 emoji",
        ];

        {
            let mut store = PreferenceStore::load(JsonFileStorage::new(dir.path()));
            for text in texts {
                store.toggle_like(text);
            }
            store.toggle_bookmark(texts[4]);
        }

        let reloaded = PreferenceStore::load(JsonFileStorage::new(dir.path()));
        let expected: PreferenceSet = texts.into_iter().collect();
        assert_eq!(reloaded.liked(), &expected);
        assert_eq!(reloaded.bookmarked().len(), 1);
        assert!(reloaded.is_bookmarked("知之为知之，不知为不知"));
    }

    #[test]
    fn test_read_failure_is_recovered() {
        let mut mock = MockPreferenceStorage::new();
        mock.expect_read()
            .returning(|_| Err(StorageError::Unavailable("disk offline".to_string())));

        let store = PreferenceStore::load(mock);
        assert!(store.liked().is_empty());
        assert!(store.bookmarked().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut mock = MockPreferenceStorage::new();
        mock.expect_read().returning(|_| Ok(None));
        mock.expect_write()
            .withf(|key: &str, _value: &str| key == "bookmarkedQuotes")
            .times(1)
            .returning(|_, _| Err(StorageError::QuotaExceeded));

        let mut store = PreferenceStore::load(mock);
        assert!(store.toggle_bookmark("survives"));
        assert!(store.is_bookmarked("survives"));
    }

    #[test]
    fn test_persist_writes_full_set() {
        let mut mock = MockPreferenceStorage::new();
        mock.expect_read()
            .withf(|key: &str| key == "likedQuotes")
            .returning(|_| Ok(Some(r#"["a","b"]"#.to_string())));
        mock.expect_read()
            .withf(|key: &str| key == "bookmarkedQuotes")
            .returning(|_| Ok(None));
        mock.expect_write()
            .withf(|key: &str, value: &str| {
                let set: Vec<String> = serde_json::from_str(value).unwrap();
                key == "likedQuotes" && set == vec!["a", "b", "c"]
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = PreferenceStore::load(mock);
        store.toggle_like("c");
    }
}
