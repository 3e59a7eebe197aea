// ── Fetch-state tracker ──
//
// Records which endpoints a poll cycle attempted and which of them are
// currently failing, so the cycle can tell partial degradation apart from
// total failure.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::CoreError;

/// Per-cycle bookkeeping of attempted endpoints and their outstanding errors.
#[derive(Debug, Default)]
pub struct FetchState {
    sent: BTreeSet<String>,
    errors: BTreeMap<String, tsw_api::Error>,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that `endpoint` is being attempted this cycle.
    pub fn push_request(&mut self, endpoint: &str) {
        self.sent.insert(endpoint.to_owned());
    }

    /// Record the latest failure for `endpoint`.
    pub fn push(&mut self, endpoint: &str, error: tsw_api::Error) {
        self.errors.insert(endpoint.to_owned(), error);
    }

    /// Drop any recorded failure for `endpoint`.
    pub fn resolve(&mut self, endpoint: &str) {
        self.errors.remove(endpoint);
    }

    /// Start a new cycle. Recorded errors survive until resolved.
    pub fn clear(&mut self) {
        self.sent.clear();
    }

    /// Forget everything, including recorded errors.
    pub fn reset(&mut self) {
        self.sent.clear();
        self.errors.clear();
    }

    /// Fail if every endpoint attempted this cycle has an outstanding error.
    ///
    /// Errors from endpoints not attempted this cycle are ignored.
    pub fn verify(&self) -> Result<(), CoreError> {
        let failing: Vec<(&String, &tsw_api::Error)> = self
            .errors
            .iter()
            .filter(|(endpoint, _)| self.sent.contains(*endpoint))
            .collect();

        if failing.is_empty() || failing.len() != self.sent.len() {
            return Ok(());
        }

        let message = failing
            .first()
            .map_or_else(|| "N/A".to_owned(), |(_, e)| e.to_string());
        Err(CoreError::AggregateFetch {
            sections: failing.into_iter().map(|(s, _)| s.clone()).collect(),
            message,
        })
    }

    /// Endpoints attempted in the current cycle.
    pub fn sent(&self) -> impl Iterator<Item = &str> {
        self.sent.iter().map(String::as_str)
    }

    /// `true` if `endpoint` currently has a recorded failure.
    pub fn is_failing(&self, endpoint: &str) -> bool {
        self.errors.contains_key(endpoint)
    }
}
