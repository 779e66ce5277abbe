//! In-memory catalog used by the reconciliation unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::catalog::{CatalogCandidate, CatalogClient, ProvisionRequest, TrackedEntry, TransportError};

/// Mock catalog for testing reconciliation logic.
///
/// Lookups are keyed by lowercased term. A successful create adds the artist
/// to the tracked set, like the real service does.
pub struct MockCatalogClient {
    lookups: Mutex<HashMap<String, Result<Vec<CatalogCandidate>, TransportError>>>,
    tracked: Mutex<Vec<TrackedEntry>>,
    list_failure: Mutex<Option<TransportError>>,
    create_failure: Mutex<Option<TransportError>>,
    created: Mutex<Vec<ProvisionRequest>>,
    call_counts: Mutex<HashMap<String, usize>>,
}

impl MockCatalogClient {
    pub fn new() -> Self {
        Self {
            lookups: Mutex::new(HashMap::new()),
            tracked: Mutex::new(Vec::new()),
            list_failure: Mutex::new(None),
            create_failure: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            call_counts: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_lookup_results(&self, term: &str, candidates: Vec<CatalogCandidate>) {
        self.lookups
            .lock()
            .unwrap()
            .insert(term.to_lowercase(), Ok(candidates));
    }

    /// Shorthand for a lookup that returns a single well-formed artist.
    pub fn add_artist(&self, term: &str, external_id: &str, display_name: &str) {
        self.add_lookup_results(term, vec![CatalogCandidate::new(external_id, display_name)]);
    }

    pub fn fail_lookup(&self, term: &str, error: TransportError) {
        self.lookups
            .lock()
            .unwrap()
            .insert(term.to_lowercase(), Err(error));
    }

    pub fn track(&self, display_name: &str) {
        self.tracked
            .lock()
            .unwrap()
            .push(TrackedEntry::named(display_name));
    }

    pub fn fail_list_tracked(&self, error: TransportError) {
        *self.list_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_create(&self, error: TransportError) {
        *self.create_failure.lock().unwrap() = Some(error);
    }

    pub fn created(&self) -> Vec<ProvisionRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        *self.call_counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn increment_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn lookup(&self, term: &str) -> Result<Vec<CatalogCandidate>, TransportError> {
        self.increment_call("lookup");
        self.lookups
            .lock()
            .unwrap()
            .get(&term.to_lowercase())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_tracked(&self) -> Result<Vec<TrackedEntry>, TransportError> {
        self.increment_call("list_tracked");
        if let Some(error) = self.list_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.tracked.lock().unwrap().clone())
    }

    async fn create(&self, request: &ProvisionRequest) -> Result<(), TransportError> {
        self.increment_call("create");
        if let Some(error) = self.create_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.created.lock().unwrap().push(request.clone());
        self.track(&request.artist_name);
        Ok(())
    }
}
