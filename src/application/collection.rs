//! Collection State Manager
//!
//! Owns the working set and view parameters, drives loads through the
//! QuoteSource port and exposes the projected display list.
//!
//! Loads follow a cancel-and-replace policy: every load takes a new generation
//! number, and a result is applied only if its generation is still the latest
//! when it resolves. Superseded results are discarded, so a slow earlier
//! request can never overwrite a later one.

use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::sync::RwLock;

use crate::domain::{project, DisplayQuote, PreferenceKind, Quote, SortMode, ViewParams};
use crate::ports::quote_source::{FetchScope, QuoteSource, QuoteSourceError};
use crate::ports::storage::PreferenceStorage;

use super::preference_store::PreferenceStore;

/// Default number of concurrent batches issued by an unscoped load
pub const DEFAULT_UNSCOPED_BATCHES: usize = 3;

/// Load lifecycle of the collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(QuoteSourceError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn failure(&self) -> Option<&QuoteSourceError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// What happened to one load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Applied; the working set now holds `total` quotes
    Ready { total: usize },
    /// Applied as a failure
    Failed(QuoteSourceError),
    /// A newer load started before this one resolved; result discarded
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeMode {
    Replace,
    Append,
}

/// Counters shown alongside the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStats {
    pub total_quotes: usize,
    pub liked_count: usize,
    pub bookmarked_count: usize,
    pub last_loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct CollectionState {
    working_set: Vec<Quote>,
    load_state: LoadState,
    params: ViewParams,
    selected_category: String,
    generation: u64,
    last_loaded_at: Option<DateTime<Utc>>,
}

/// Client-side quote collection
pub struct CollectionManager<Q: QuoteSource, S: PreferenceStorage> {
    source: Q,
    state: RwLock<CollectionState>,
    preferences: RwLock<PreferenceStore<S>>,
    unscoped_batches: usize,
}

impl<Q: QuoteSource, S: PreferenceStorage> CollectionManager<Q, S> {
    /// Create an idle manager with an empty working set
    pub fn new(source: Q, preferences: PreferenceStore<S>) -> Self {
        Self {
            source,
            state: RwLock::new(CollectionState::default()),
            preferences: RwLock::new(preferences),
            unscoped_batches: DEFAULT_UNSCOPED_BATCHES,
        }
    }

    /// Set how many batches an unscoped load merges (minimum 1)
    pub fn with_unscoped_batches(mut self, batches: usize) -> Self {
        self.unscoped_batches = batches.max(1);
        self
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    /// Replace the working set with the merge of several unscoped batches
    pub async fn load_unscoped(&self) -> LoadOutcome {
        self.run_load("unscoped", MergeMode::Replace, self.fetch_unscoped(self.unscoped_batches))
            .await
    }

    /// Replace the working set with one category batch; `""` means unscoped
    pub async fn load_scoped(&self, category: &str) -> LoadOutcome {
        let scope = FetchScope::category(category);
        if scope == FetchScope::Unscoped {
            return self.load_unscoped().await;
        }
        self.run_load("scoped", MergeMode::Replace, self.fetch_single(scope))
            .await
    }

    /// Replace the working set with exactly one random quote
    pub async fn load_one(&self) -> LoadOutcome {
        let fetch = async {
            let mut quotes = self.fetch_single(FetchScope::Random).await?;
            quotes.truncate(1);
            Ok::<_, QuoteSourceError>(quotes)
        };
        self.run_load("random", MergeMode::Replace, fetch).await
    }

    /// Append one more unscoped batch to the working set
    pub async fn append_more(&self) -> LoadOutcome {
        self.run_load("append", MergeMode::Append, self.fetch_unscoped(1))
            .await
    }

    /// Remember `category`, clear the search and load it
    pub async fn select_category(&self, category: &str) -> LoadOutcome {
        {
            let mut state = self.state.write().await;
            state.selected_category = category.to_string();
            state.params.search_query.clear();
        }
        self.load_scoped(category).await
    }

    /// Clear search and category, then reload unscoped
    pub async fn reset(&self) -> LoadOutcome {
        {
            let mut state = self.state.write().await;
            state.selected_category.clear();
            state.params.search_query.clear();
        }
        self.load_unscoped().await
    }

    /// Issue `batches` unscoped requests concurrently and concatenate them in
    /// request order. The first failure in request order fails the whole load.
    async fn fetch_unscoped(&self, batches: usize) -> Result<Vec<Quote>, QuoteSourceError> {
        let scope = FetchScope::Unscoped;
        let responses = join_all((0..batches.max(1)).map(|_| self.source.fetch_quotes(&scope))).await;

        let mut merged = Vec::new();
        for response in responses {
            merged.extend(response?);
        }
        non_empty(merged)
    }

    async fn fetch_single(&self, scope: FetchScope) -> Result<Vec<Quote>, QuoteSourceError> {
        non_empty(self.source.fetch_quotes(&scope).await?)
    }

    async fn run_load<F>(&self, label: &str, mode: MergeMode, fetch: F) -> LoadOutcome
    where
        F: Future<Output = Result<Vec<Quote>, QuoteSourceError>>,
    {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.load_state = LoadState::Loading;
            state.generation
        };

        let result = fetch.await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                "Discarding {} load #{} (superseded by #{})",
                label,
                generation,
                state.generation
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(quotes) => {
                let received = quotes.len();
                match mode {
                    MergeMode::Replace => state.working_set = quotes,
                    MergeMode::Append => state.working_set.extend(quotes),
                }
                state.load_state = LoadState::Ready;
                state.last_loaded_at = Some(Utc::now());
                tracing::info!(
                    "Loaded {} quotes ({}), working set now {}",
                    received,
                    label,
                    state.working_set.len()
                );
                LoadOutcome::Ready {
                    total: state.working_set.len(),
                }
            }
            Err(e) => {
                if mode == MergeMode::Replace {
                    state.working_set.clear();
                }
                state.load_state = LoadState::Failed(e.clone());
                tracing::warn!("{} load failed: {}", label, e);
                LoadOutcome::Failed(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // View parameters
    // ------------------------------------------------------------------

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.write().await.params.search_query = query.into();
    }

    pub async fn set_sort_mode(&self, sort_mode: SortMode) {
        self.state.write().await.params.sort_mode = sort_mode;
    }

    pub async fn view_params(&self) -> ViewParams {
        self.state.read().await.params.clone()
    }

    pub async fn selected_category(&self) -> String {
        self.state.read().await.selected_category.clone()
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    /// Returns whether the quote is liked after the toggle
    pub async fn toggle_like(&self, text: &str) -> bool {
        self.preferences.write().await.toggle_like(text)
    }

    /// Returns whether the quote is bookmarked after the toggle
    pub async fn toggle_bookmark(&self, text: &str) -> bool {
        self.preferences.write().await.toggle_bookmark(text)
    }

    pub async fn is_liked(&self, text: &str) -> bool {
        self.preferences.read().await.is_liked(text)
    }

    pub async fn is_bookmarked(&self, text: &str) -> bool {
        self.preferences.read().await.is_bookmarked(text)
    }

    /// Members of one preference set, in ascending order
    pub async fn saved(&self, kind: PreferenceKind) -> Vec<String> {
        self.preferences
            .read()
            .await
            .set(kind)
            .iter()
            .map(str::to_string)
            .collect()
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load_state.clone()
    }

    pub async fn working_set(&self) -> Vec<Quote> {
        self.state.read().await.working_set.clone()
    }

    /// Current filtered, sorted and annotated display list
    pub async fn display_list(&self) -> Vec<DisplayQuote> {
        let state = self.state.read().await;
        let prefs = self.preferences.read().await;
        project(&state.working_set, &state.params, prefs.liked(), prefs.bookmarked())
    }

    pub async fn stats(&self) -> CollectionStats {
        let state = self.state.read().await;
        let prefs = self.preferences.read().await;
        CollectionStats {
            total_quotes: state.working_set.len(),
            liked_count: prefs.liked().len(),
            bookmarked_count: prefs.bookmarked().len(),
            last_loaded_at: state.last_loaded_at,
        }
    }
}

fn non_empty(quotes: Vec<Quote>) -> Result<Vec<Quote>, QuoteSourceError> {
    if quotes.is_empty() {
        Err(QuoteSourceError::EmptyResult)
    } else {
        Ok(quotes)
    }
}
