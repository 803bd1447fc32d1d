use tracing::{debug, error, info};

use crate::errors::ScreenerError;
use crate::models::results::{CandidatePatch, ResultSet};
use crate::session::store::SessionStore;

pub const LAST_RESULTS_KEY: &str = "last_results";
pub const SESSION_ID_KEY: &str = "session_id";

/// Last analysis result set and session id, kept in a `SessionStore`.
///
/// Writes are synchronous, so a `persist_result` is visible to the very next
/// `load_results`.
pub struct ResultsCache {
    store: Box<dyn SessionStore>,
}

impl ResultsCache {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Navigation-carried results win; otherwise fall back to the cache.
    /// `None` means there is nothing to show, which is not an error.
    pub fn load_results(&self, nav_results: Option<&ResultSet>) -> Option<ResultSet> {
        match nav_results {
            Some(results) => Some(results.clone()),
            None => self.cached_results(),
        }
    }

    /// Reads the cached set. Unreadable or malformed entries count as a miss.
    pub fn cached_results(&self) -> Option<ResultSet> {
        let raw = match self.store.get(LAST_RESULTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("Failed to read cached results: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(results) => Some(results),
            Err(e) => {
                error!("Failed to parse cached results: {e}");
                None
            }
        }
    }

    pub fn session_id(&self) -> Option<String> {
        self.store.get(SESSION_ID_KEY).ok().flatten()
    }

    /// Overwrites the cached set (last write wins) and records its session id.
    pub fn persist_result(&mut self, results: &ResultSet) -> Result<(), ScreenerError> {
        let serialized = serde_json::to_string(results)?;
        self.store.set(LAST_RESULTS_KEY, &serialized)?;
        if let Some(session_id) = results.session_id() {
            self.store.set(SESSION_ID_KEY, session_id)?;
        }
        debug!(
            "Cached {} candidates (session {:?})",
            results.candidates.len(),
            results.session_id()
        );
        Ok(())
    }

    /// Merges `patch` into the candidate `email` and persists the whole set.
    ///
    /// The merge runs on a copy; `results` is replaced only once the cache
    /// write has succeeded, so memory and cache never disagree.
    pub fn commit_patch(
        &mut self,
        results: &mut ResultSet,
        email: &str,
        patch: &CandidatePatch,
    ) -> Result<(), ScreenerError> {
        let mut updated = results.clone();
        updated
            .candidate_mut(email)
            .ok_or_else(|| ScreenerError::CandidateNotFound(email.to_string()))?
            .apply_patch(patch)?;
        self.persist_result(&updated)?;
        *results = updated;
        Ok(())
    }

    /// Removes both slots. In-memory view state is the caller's to reset.
    pub fn clear(&mut self) -> Result<(), ScreenerError> {
        self.store.remove(LAST_RESULTS_KEY)?;
        self.store.remove(SESSION_ID_KEY)?;
        info!("Session cache cleared");
        Ok(())
    }
}
