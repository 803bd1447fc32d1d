//! Results screen view model.
//!
//! Owns the current `ResultSet` (the single in-memory copy; the candidate
//! list is always read through it), the verdict filter, and the injected
//! notifier and downloader. Every action catches its own failures and turns
//! them into notices; nothing here returns an error to the caller.
//!
//! Actions take `&mut self`, so two updates can never be in flight on the
//! same view and results always apply in dispatch order.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::requests::BulkEmailRequest;
use crate::models::results::{Candidate, CandidatePatch, ResultSet};
use crate::results::download::Downloader;
use crate::results::email::compose_email;
use crate::results::filter::VerdictFilter;
use crate::results::notify::{NoticeKind, Notifier};
use crate::service::ScreenerService;

pub const SCREENER_ROUTE: &str = "/screener";
pub const CLEAR_CACHE_PROMPT: &str =
    "Clear cached results? This will remove all saved analysis data.";

/// State handed over by whatever navigated to the results screen.
/// `generation` identifies the navigation; a new one triggers a new resolve.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub generation: u64,
    pub results: Option<ResultSet>,
}

impl NavigationState {
    pub fn with_results(generation: u64, results: ResultSet) -> Self {
        Self {
            generation,
            results: Some(results),
        }
    }
}

/// The one way out of the empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    GoToScreener,
}

impl RecoveryAction {
    pub fn route(&self) -> &'static str {
        match self {
            RecoveryAction::GoToScreener => SCREENER_ROUTE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecoveryAction::GoToScreener => "Go to Resume Screener",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTab {
    pub filter: VerdictFilter,
    pub label: String,
    pub active: bool,
}

/// What the screen shows right now. Rebuilt on every call.
#[derive(Debug)]
pub enum Screen<'a> {
    Loading,
    Empty {
        recovery: RecoveryAction,
    },
    Results {
        summary: String,
        tabs: Vec<FilterTab>,
        visible: Vec<&'a Candidate>,
    },
}

pub struct ResultsView {
    service: ScreenerService,
    notifier: Box<dyn Notifier>,
    downloader: Box<dyn Downloader>,
    results: Option<ResultSet>,
    filter: VerdictFilter,
    loading: bool,
    resolved_generation: Option<u64>,
}

impl ResultsView {
    pub fn new(
        service: ScreenerService,
        notifier: Box<dyn Notifier>,
        downloader: Box<dyn Downloader>,
    ) -> Self {
        Self {
            service,
            notifier,
            downloader,
            results: None,
            filter: VerdictFilter::All,
            loading: true,
            resolved_generation: None,
        }
    }

    /// Resolves the result set for `nav`, once per navigation generation.
    /// Returns whether a resolution actually ran.
    pub fn resolve(&mut self, nav: &NavigationState) -> bool {
        if self.resolved_generation == Some(nav.generation) {
            return false;
        }
        self.resolved_generation = Some(nav.generation);
        self.results = self.service.load_results(nav.results.as_ref());
        self.loading = false;
        debug!(
            "Resolved results for navigation {}: {} candidates",
            nav.generation,
            self.candidates().len()
        );
        true
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// The live candidate list, read straight from the result set.
    pub fn candidates(&self) -> &[Candidate] {
        self.results
            .as_ref()
            .map(|r| r.candidates.as_slice())
            .unwrap_or(&[])
    }

    pub fn filter(&self) -> VerdictFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: VerdictFilter) {
        self.filter = filter;
    }

    pub fn visible_candidates(&self) -> Vec<&Candidate> {
        self.filter.apply(self.candidates())
    }

    pub fn screen(&self) -> Screen<'_> {
        if self.loading {
            return Screen::Loading;
        }
        let results = match &self.results {
            Some(results) if results.has_candidates() => results,
            _ => {
                return Screen::Empty {
                    recovery: RecoveryAction::GoToScreener,
                }
            }
        };
        let tabs = VerdictFilter::CHOICES
            .iter()
            .map(|f| FilterTab {
                filter: *f,
                label: f.label(&results.candidates),
                active: *f == self.filter,
            })
            .collect();
        Screen::Results {
            summary: results.summary_line(),
            tabs,
            visible: self.filter.apply(&results.candidates),
        }
    }

    /// Exports the current filter's candidates as CSV.
    pub async fn export_csv(&mut self) -> Option<PathBuf> {
        let filter = self.filter;
        let file_name = format!(
            "candidates_{}_{}.csv",
            filter.as_str(),
            Utc::now().timestamp_millis()
        );
        let saved = match self.service.export_csv(filter.verdict()).await {
            Ok(bytes) => self.downloader.save(&file_name, &bytes),
            Err(e) => Err(e),
        };
        match saved {
            Ok(path) => {
                self.notifier
                    .notify(NoticeKind::Success, "CSV exported successfully!");
                Some(path)
            }
            Err(e) => {
                warn!("CSV export failed: {e}");
                self.notifier
                    .notify(NoticeKind::Failure, "Export failed. Please try again.");
                None
            }
        }
    }

    pub async fn download_summary(&mut self, email: &str) -> Option<PathBuf> {
        let file_name = format!("candidate_summary_{email}.pdf");
        let saved = match self.service.candidate_summary(email).await {
            Ok(bytes) => self.downloader.save(&file_name, &bytes),
            Err(e) => Err(e),
        };
        match saved {
            Ok(path) => {
                self.notifier
                    .notify(NoticeKind::Success, "Summary downloaded successfully!");
                Some(path)
            }
            Err(e) => {
                warn!("Summary download for {email} failed: {e}");
                self.notifier
                    .notify(NoticeKind::Failure, "Download failed. Please try again.");
                None
            }
        }
    }

    /// Sends the verdict-appropriate template to one candidate.
    pub async fn email_candidate(&mut self, email: &str) -> bool {
        let Some(draft) = self
            .results
            .as_ref()
            .and_then(|r| r.candidate(email))
            .map(compose_email)
        else {
            self.notifier.notify(
                NoticeKind::Failure,
                &format!("Failed to send email: no candidate with email {email}"),
            );
            return false;
        };

        match self
            .service
            .send_email(email, &draft.subject, &draft.body)
            .await
        {
            Ok(_) => {
                self.notifier
                    .notify(NoticeKind::Success, &format!("Email sent to {email}!"));
                true
            }
            Err(e) => {
                self.notifier.notify(
                    NoticeKind::Failure,
                    &format!("Failed to send email: {}", e.detail()),
                );
                false
            }
        }
    }

    /// Emails every candidate matching the current verdict filter.
    pub async fn email_filtered(&mut self, company_name: &str) -> bool {
        let Some(verdict) = self.filter.verdict() else {
            self.notifier.notify(
                NoticeKind::Failure,
                "Select a verdict filter before sending bulk email.",
            );
            return false;
        };
        let visible = self.visible_candidates();
        let role = visible
            .iter()
            .find_map(|c| c.jd_role.clone())
            .unwrap_or_else(|| "Position".to_string());
        let request = BulkEmailRequest {
            candidate_emails: visible.iter().map(|c| c.email.clone()).collect(),
            verdict,
            role,
            company_name: company_name.to_string(),
        };

        match self.service.send_bulk_email(&request).await {
            Ok(_) => {
                self.notifier.notify(
                    NoticeKind::Success,
                    &format!(
                        "Bulk email sent to {} candidates",
                        request.candidate_emails.len()
                    ),
                );
                true
            }
            Err(e) => {
                self.notifier.notify(
                    NoticeKind::Failure,
                    &format!("Bulk email failed: {}", e.detail()),
                );
                false
            }
        }
    }

    /// Saves recruiter notes. Memory and cache change only after the backend
    /// accepted the update.
    pub async fn update_notes(&mut self, email: &str, notes: &str) -> bool {
        let Some(results) = self.results.as_mut() else {
            self.notifier
                .notify(NoticeKind::Failure, "Failed to save notes.");
            return false;
        };
        let patch = CandidatePatch::notes(notes);

        match self
            .service
            .update_candidate_field(results, email, &patch)
            .await
        {
            Ok(_) => {
                self.notifier
                    .notify(NoticeKind::Success, "Notes saved successfully!");
                true
            }
            Err(e) => {
                warn!("Saving notes for {email} failed: {e}");
                self.notifier
                    .notify(NoticeKind::Failure, "Failed to save notes.");
                false
            }
        }
    }

    /// Reloads from the cache, ignoring whatever navigation carried.
    pub fn refresh(&mut self) {
        self.results = self.service.load_results(None);
        self.loading = false;
        self.notifier
            .notify(NoticeKind::Info, "Results refreshed from cache");
    }

    /// Clears the cache and resets the view, after confirmation.
    /// Returns false when the user declined or the store could not be cleared.
    pub fn clear_cache(&mut self) -> bool {
        if !self.notifier.confirm(CLEAR_CACHE_PROMPT) {
            return false;
        }
        if let Err(e) = self.service.clear_cache() {
            warn!("Clearing session cache failed: {e}");
            self.notifier
                .notify(NoticeKind::Failure, "Failed to clear cached results.");
            return false;
        }
        self.results = None;
        self.notifier.notify(
            NoticeKind::Success,
            "Cache cleared. Run a new analysis from the Screener page.",
        );
        true
    }
}
