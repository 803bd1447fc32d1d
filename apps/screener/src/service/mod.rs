//! Screener service: remote calls plus the session cache that mirrors them.
//!
//! Anything that changes a candidate goes remote-first: the backend is the
//! record of truth, and the local set and cache are touched only once it has
//! accepted the change.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::api_client::ScreenerApi;
use crate::errors::ScreenerError;
use crate::models::requests::{ApiAck, BulkEmailRequest, JobConfig};
use crate::models::results::{CandidatePatch, ResultSet, Verdict};
use crate::session::ResultsCache;

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

pub struct ScreenerService {
    api: Arc<dyn ScreenerApi>,
    cache: ResultsCache,
}

impl ScreenerService {
    pub fn new(api: Arc<dyn ScreenerApi>, cache: ResultsCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &ResultsCache {
        &self.cache
    }

    /// Runs an analysis and caches the result set.
    pub async fn analyze(
        &mut self,
        job: &JobConfig,
        load_from_blob: bool,
    ) -> Result<ResultSet, ScreenerError> {
        let results = self.api.analyze(job, load_from_blob).await?;
        self.cache.persist_result(&results)?;
        info!(
            "Analysis complete: {} processed, session {:?}",
            results.total_processed,
            results.session_id()
        );
        Ok(results)
    }

    /// Fetches a previous session from the backend and makes it the cached set.
    pub async fn fetch_session_results(
        &mut self,
        session_id: &str,
    ) -> Result<ResultSet, ScreenerError> {
        let mut results = self.api.results_by_session(session_id).await?;
        if results.metrics.session_id.is_none() {
            results.metrics.session_id = Some(session_id.to_string());
        }
        self.cache.persist_result(&results)?;
        info!("Loaded session {session_id} ({} candidates)", results.candidates.len());
        Ok(results)
    }

    pub fn load_results(&self, nav_results: Option<&ResultSet>) -> Option<ResultSet> {
        self.cache.load_results(nav_results)
    }

    /// Updates one candidate remotely, then merges the patch into `results`
    /// and the cache. A remote failure leaves both untouched.
    pub async fn update_candidate_field(
        &mut self,
        results: &mut ResultSet,
        email: &str,
        patch: &CandidatePatch,
    ) -> Result<ApiAck, ScreenerError> {
        if results.candidate(email).is_none() {
            return Err(ScreenerError::CandidateNotFound(email.to_string()));
        }
        let ack = self.api.update_candidate(email, patch).await?;
        self.cache.commit_patch(results, email, patch)?;
        info!("Updated candidate {email}");
        Ok(ack)
    }

    pub fn clear_cache(&mut self) -> Result<(), ScreenerError> {
        self.cache.clear()
    }

    pub async fn export_csv(&self, verdict: Option<Verdict>) -> Result<Bytes, ScreenerError> {
        self.api.export_csv(verdict).await
    }

    pub async fn candidate_summary(&self, email: &str) -> Result<Bytes, ScreenerError> {
        self.api.candidate_summary(email).await
    }

    pub async fn send_email(
        &self,
        email: &str,
        subject: &str,
        body: &str,
    ) -> Result<ApiAck, ScreenerError> {
        let ack = self.api.send_email(email, subject, body).await?;
        info!("Email sent to {email}");
        Ok(ack)
    }

    pub async fn send_bulk_email(
        &self,
        request: &BulkEmailRequest,
    ) -> Result<ApiAck, ScreenerError> {
        if request.candidate_emails.is_empty() {
            return Err(ScreenerError::Validation("no recipients selected".into()));
        }
        let ack = self.api.send_bulk_email(request).await?;
        info!(
            "Bulk email queued for {} {} candidates",
            request.candidate_emails.len(),
            request.verdict
        );
        Ok(ack)
    }

    pub async fn clear_upload_cache(&self) -> Result<ApiAck, ScreenerError> {
        self.api.clear_upload_cache().await
    }

    /// Uploads one resume to the backend's temporary area.
    /// Only pdf/docx/doc files are accepted.
    pub async fn upload_resume(&self, path: &Path) -> Result<ApiAck, ScreenerError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScreenerError::Validation(format!("{} has no file name", path.display())))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !RESUME_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ScreenerError::Validation(format!(
                "unsupported file type for {file_name}; allowed: .pdf, .docx, .doc"
            )));
        }
        let contents = tokio::fs::read(path).await?;
        let ack = self.api.upload_resume(file_name, contents).await?;
        info!("Uploaded {file_name}");
        Ok(ack)
    }
}
