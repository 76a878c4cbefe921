//! Test doubles for the ports
//!
//! Recording fakes with scripted responses. Used by unit tests and by the
//! integration tests under `tests/`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::quote_source::{FetchScope, QuoteSource, QuoteSourceError};
use super::storage::{PreferenceStorage, StorageError};
use crate::domain::Quote;

struct ScriptedResponse {
    result: Result<Vec<Quote>, QuoteSourceError>,
    delay: Option<Duration>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Mock quote source that records calls and replays scripted responses
///
/// Responses are consumed in call order. The response is claimed before the
/// first suspension point, so concurrent calls claim responses in the order
/// they were issued, not the order they complete.
#[derive(Clone, Default)]
pub struct MockQuoteSource {
    calls: Arc<Mutex<Vec<FetchScope>>>,
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
}

impl MockQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue an immediate response
    pub fn with_response(self, result: Result<Vec<Quote>, QuoteSourceError>) -> Self {
        self.push(result, None, None);
        self
    }

    /// Builder method to queue a response that completes after `delay`
    pub fn with_delayed_response(
        self,
        result: Result<Vec<Quote>, QuoteSourceError>,
        delay: Duration,
    ) -> Self {
        self.push(result, Some(delay), None);
        self
    }

    /// Queue a response held back until the returned sender fires (or drops)
    pub fn push_gated_response(
        &self,
        result: Result<Vec<Quote>, QuoteSourceError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(result, None, Some(rx));
        tx
    }

    pub fn push_response(&self, result: Result<Vec<Quote>, QuoteSourceError>) {
        self.push(result, None, None);
    }

    fn push(
        &self,
        result: Result<Vec<Quote>, QuoteSourceError>,
        delay: Option<Duration>,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .push_back(ScriptedResponse { result, delay, gate });
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<FetchScope> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn fetch_quotes(&self, scope: &FetchScope) -> Result<Vec<Quote>, QuoteSourceError> {
        self.calls.lock().unwrap().push(scope.clone());
        let scripted = self.responses.lock().unwrap().pop_front();

        let Some(scripted) = scripted else {
            return Err(QuoteSourceError::Unknown("No response configured".to_string()));
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.result
    }
}

/// In-memory preference storage, the local-storage stand-in for tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to seed a raw entry
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Raw value currently stored under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Keys written, in write order
    pub fn get_writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl PreferenceStorage for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
