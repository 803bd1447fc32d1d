//! Screener API client: the single point of entry for every backend call.
//!
//! Other modules talk to the backend through the `ScreenerApi` trait so the
//! view and service layers can be exercised against an in-process fake.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ScreenerError;
use crate::models::requests::{
    decode_session_results, AnalyzeRequest, ApiAck, BulkEmailRequest, EmailRequest, JobConfig,
    UpdateCandidateRequest,
};
use crate::models::results::{CandidatePatch, ResultSet, Verdict};

pub const ANALYZE_PATH: &str = "/api/screener/analyze";
pub const RESULTS_PATH: &str = "/api/screener/results";
pub const EXPORT_CSV_PATH: &str = "/api/screener/export-csv";
pub const SUMMARY_PATH: &str = "/api/screener/summary";
pub const UPDATE_CANDIDATE_PATH: &str = "/api/screener/candidate";
pub const SEND_EMAIL_PATH: &str = "/api/screener/email/send";
pub const BULK_EMAIL_PATH: &str = "/api/screener/bulk-email";
pub const CLEAR_UPLOADS_PATH: &str = "/api/screener/clear-cache";
pub const UPLOAD_PATH: &str = "/api/screener/upload";

/// Remote operations the results screen depends on.
///
/// Carried as `Arc<dyn ScreenerApi>`.
#[async_trait]
pub trait ScreenerApi: Send + Sync {
    async fn analyze(&self, job: &JobConfig, load_from_blob: bool)
        -> Result<ResultSet, ScreenerError>;

    async fn results_by_session(&self, session_id: &str) -> Result<ResultSet, ScreenerError>;

    /// CSV export, optionally restricted to one verdict.
    async fn export_csv(&self, verdict: Option<Verdict>) -> Result<Bytes, ScreenerError>;

    /// PDF summary for a single candidate.
    async fn candidate_summary(&self, email: &str) -> Result<Bytes, ScreenerError>;

    async fn update_candidate(
        &self,
        candidate_id: &str,
        updates: &CandidatePatch,
    ) -> Result<ApiAck, ScreenerError>;

    async fn send_email(
        &self,
        email: &str,
        subject: &str,
        body: &str,
    ) -> Result<ApiAck, ScreenerError>;

    async fn send_bulk_email(&self, request: &BulkEmailRequest) -> Result<ApiAck, ScreenerError>;

    /// Drops the backend's temporary (non-blob) upload area.
    async fn clear_upload_cache(&self) -> Result<ApiAck, ScreenerError>;

    async fn upload_resume(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ApiAck, ScreenerError>;
}

/// reqwest-backed implementation of `ScreenerApi`.
#[derive(Clone)]
pub struct HttpScreenerClient {
    client: Client,
    base_url: Url,
}

impl HttpScreenerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ScreenerError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScreenerError::Validation(format!("invalid API URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ScreenerError::Validation(format!(
                "API URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    /// Joins `path` and any extra segments onto the base URL.
    /// Extra segments are percent-encoded, so an email is safe to pass.
    fn endpoint(&self, path: &str, extra: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()))
                .extend(extra);
        }
        url
    }

    /// Turns non-2xx responses into `ScreenerError::Api`.
    async fn check(response: Response) -> Result<Response, ScreenerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Screener API returned {}: {}", status, body);
        Err(ScreenerError::from_response(status.as_u16(), body))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ScreenerError> {
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn bytes(response: Response) -> Result<Bytes, ScreenerError> {
        let response = Self::check(response).await?;
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl ScreenerApi for HttpScreenerClient {
    async fn analyze(
        &self,
        job: &JobConfig,
        load_from_blob: bool,
    ) -> Result<ResultSet, ScreenerError> {
        let body = AnalyzeRequest {
            job_config: job,
            load_from_blob,
        };
        let response = self
            .client
            .post(self.endpoint(ANALYZE_PATH, &[]))
            .json(&body)
            .send()
            .await?;
        let results: ResultSet = Self::json(response).await?;
        debug!(
            "Analyze returned {} candidates (session {:?})",
            results.candidates.len(),
            results.session_id()
        );
        Ok(results)
    }

    async fn results_by_session(&self, session_id: &str) -> Result<ResultSet, ScreenerError> {
        let response = self
            .client
            .get(self.endpoint(RESULTS_PATH, &[session_id]))
            .send()
            .await?;
        let payload: Value = Self::json(response).await?;
        Ok(decode_session_results(payload)?)
    }

    async fn export_csv(&self, verdict: Option<Verdict>) -> Result<Bytes, ScreenerError> {
        let mut request = self.client.get(self.endpoint(EXPORT_CSV_PATH, &[]));
        if let Some(verdict) = verdict {
            request = request.query(&[("verdict", verdict.as_str())]);
        }
        Self::bytes(request.send().await?).await
    }

    async fn candidate_summary(&self, email: &str) -> Result<Bytes, ScreenerError> {
        let response = self
            .client
            .get(self.endpoint(SUMMARY_PATH, &[email]))
            .send()
            .await?;
        Self::bytes(response).await
    }

    async fn update_candidate(
        &self,
        candidate_id: &str,
        updates: &CandidatePatch,
    ) -> Result<ApiAck, ScreenerError> {
        let body = UpdateCandidateRequest {
            candidate_id,
            updates,
        };
        let response = self
            .client
            .patch(self.endpoint(UPDATE_CANDIDATE_PATH, &[]))
            .json(&body)
            .send()
            .await?;
        Self::json(response).await
    }

    async fn send_email(
        &self,
        email: &str,
        subject: &str,
        body: &str,
    ) -> Result<ApiAck, ScreenerError> {
        let response = self
            .client
            .post(self.endpoint(SEND_EMAIL_PATH, &[]))
            .json(&EmailRequest {
                email,
                subject,
                body,
            })
            .send()
            .await?;
        Self::json(response).await
    }

    async fn send_bulk_email(&self, request: &BulkEmailRequest) -> Result<ApiAck, ScreenerError> {
        let response = self
            .client
            .post(self.endpoint(BULK_EMAIL_PATH, &[]))
            .json(request)
            .send()
            .await?;
        Self::json(response).await
    }

    async fn clear_upload_cache(&self) -> Result<ApiAck, ScreenerError> {
        let response = self
            .client
            .delete(self.endpoint(CLEAR_UPLOADS_PATH, &[]))
            .send()
            .await?;
        Self::json(response).await
    }

    async fn upload_resume(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ApiAck, ScreenerError> {
        let part = reqwest::multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.endpoint(UPLOAD_PATH, &[]))
            .multipart(form)
            .send()
            .await?;
        Self::json(response).await
    }
}
