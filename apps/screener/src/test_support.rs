//! In-process fakes shared by the unit tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Map;

use crate::api_client::ScreenerApi;
use crate::errors::ScreenerError;
use crate::models::requests::{ApiAck, BulkEmailRequest, JobConfig};
use crate::models::results::{Candidate, CandidatePatch, Metrics, ResultSet, Verdict};
use crate::results::download::Downloader;
use crate::results::notify::{NoticeKind, Notifier};

pub fn candidate(email: &str, verdict: Verdict) -> Candidate {
    Candidate {
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        jd_role: Some("Backend Engineer".to_string()),
        verdict,
        recruiter_notes: String::new(),
        extra: Map::new(),
    }
}

pub fn result_set(candidates: Vec<Candidate>) -> ResultSet {
    let count = |v: Verdict| candidates.iter().filter(|c| c.verdict == v).count() as u32;
    ResultSet {
        total_processed: candidates.len() as u32,
        shortlisted: count(Verdict::Shortlist),
        under_review: count(Verdict::Review),
        rejected: count(Verdict::Reject),
        metrics: Metrics {
            session_id: Some("analysis_1700000000".to_string()),
            extra: Map::new(),
        },
        candidates,
        extra: Map::new(),
    }
}

/// Scripted backend: either everything succeeds or everything fails with a 500.
#[derive(Default)]
pub struct FakeApi {
    results: Option<ResultSet>,
    fail: bool,
    calls: Mutex<Vec<String>>,
    emails: Mutex<Vec<(String, String, String)>>,
}

impl FakeApi {
    pub fn with_results(results: ResultSet) -> Self {
        Self {
            results: Some(results),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_emails(&self) -> Vec<(String, String, String)> {
        self.emails.lock().unwrap().clone()
    }

    fn record<T>(&self, call: String, value: T) -> Result<T, ScreenerError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ScreenerError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(value)
    }

    fn ack() -> ApiAck {
        ApiAck {
            success: true,
            message: "ok".to_string(),
            data: None,
        }
    }
}

#[async_trait]
impl ScreenerApi for FakeApi {
    async fn analyze(
        &self,
        _job: &JobConfig,
        load_from_blob: bool,
    ) -> Result<ResultSet, ScreenerError> {
        self.record(
            format!("analyze(load_from_blob={load_from_blob})"),
            self.results.clone().unwrap_or_default(),
        )
    }

    async fn results_by_session(&self, session_id: &str) -> Result<ResultSet, ScreenerError> {
        self.record(
            format!("results_by_session({session_id})"),
            self.results.clone().unwrap_or_default(),
        )
    }

    async fn export_csv(&self, verdict: Option<Verdict>) -> Result<Bytes, ScreenerError> {
        let call = match verdict {
            Some(v) => format!("export_csv(verdict={v})"),
            None => "export_csv()".to_string(),
        };
        self.record(call, Bytes::from_static(b"name,email,verdict\n"))
    }

    async fn candidate_summary(&self, email: &str) -> Result<Bytes, ScreenerError> {
        self.record(
            format!("candidate_summary({email})"),
            Bytes::from_static(b"%PDF-1.4"),
        )
    }

    async fn update_candidate(
        &self,
        candidate_id: &str,
        _updates: &CandidatePatch,
    ) -> Result<ApiAck, ScreenerError> {
        self.record(format!("update_candidate({candidate_id})"), Self::ack())
    }

    async fn send_email(
        &self,
        email: &str,
        subject: &str,
        body: &str,
    ) -> Result<ApiAck, ScreenerError> {
        let ack = self.record(format!("send_email({email})"), Self::ack())?;
        self.emails
            .lock()
            .unwrap()
            .push((email.to_string(), subject.to_string(), body.to_string()));
        Ok(ack)
    }

    async fn send_bulk_email(&self, request: &BulkEmailRequest) -> Result<ApiAck, ScreenerError> {
        self.record(
            format!(
                "send_bulk_email({}: {}; {} @ {})",
                request.verdict,
                request.candidate_emails.join(","),
                request.role,
                request.company_name
            ),
            Self::ack(),
        )
    }

    async fn clear_upload_cache(&self) -> Result<ApiAck, ScreenerError> {
        self.record("clear_upload_cache()".to_string(), Self::ack())
    }

    async fn upload_resume(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ApiAck, ScreenerError> {
        self.record(
            format!("upload_resume({file_name}, {} bytes)", contents.len()),
            Self::ack(),
        )
    }
}

/// Records notices and prompts; answers every confirmation the same way.
#[derive(Clone)]
pub struct RecordingNotifier {
    answer: bool,
    notices: Arc<Mutex<Vec<(NoticeKind, String)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            notices: Arc::default(),
            prompts: Arc::default(),
        }
    }

    pub fn all(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(NoticeKind, String)> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

#[derive(Clone, Default)]
pub struct MemoryDownloader {
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemoryDownloader {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl Downloader for MemoryDownloader {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ScreenerError> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
