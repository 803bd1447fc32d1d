use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::ScreenerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Shortlist,
    Review,
    Reject,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Shortlist, Verdict::Review, Verdict::Reject];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Shortlist => "shortlist",
            Verdict::Review => "review",
            Verdict::Reject => "reject",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Shortlist => "Shortlist",
            Verdict::Review => "Review",
            Verdict::Reject => "Reject",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shortlist" => Ok(Verdict::Shortlist),
            "review" => Ok(Verdict::Review),
            "reject" => Ok(Verdict::Reject),
            other => Err(ScreenerError::Validation(format!(
                "unknown verdict '{other}' (expected shortlist, review or reject)"
            ))),
        }
    }
}

/// One analyzed candidate. Identity is `email`.
///
/// Fields this client does not interpret (scores, match percentages, resume
/// file name, ...) are kept in `extra` so a cached copy round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_role: Option<String>,
    pub verdict: Verdict,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recruiter_notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Candidate {
    /// Shallow-merges `patch` into this candidate: keys present in the patch
    /// overwrite, everything else is left alone.
    pub fn apply_patch(&mut self, patch: &CandidatePatch) -> Result<(), ScreenerError> {
        let mut merged = serde_json::to_value(&*self)?;
        if let (Value::Object(target), Value::Object(updates)) =
            (&mut merged, serde_json::to_value(patch)?)
        {
            for (key, value) in updates {
                target.insert(key, value);
            }
        }
        *self = serde_json::from_value(merged)?;
        Ok(())
    }
}

/// Partial candidate update sent to the backend and merged locally on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

impl CandidatePatch {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            recruiter_notes: Some(notes.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Output of one analysis run.
///
/// The counts are whatever the backend reported; they are never recomputed
/// from `candidates` here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub total_processed: u32,
    #[serde(default)]
    pub shortlisted: u32,
    #[serde(default)]
    pub under_review: u32,
    #[serde(default)]
    pub rejected: u32,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultSet {
    pub fn session_id(&self) -> Option<&str> {
        self.metrics.session_id.as_deref()
    }

    pub fn candidate(&self, email: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.email == email)
    }

    pub fn candidate_mut(&mut self, email: &str) -> Option<&mut Candidate> {
        self.candidates.iter_mut().find(|c| c.email == email)
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// `N candidates analyzed • S shortlisted • R under review • X rejected`
    pub fn summary_line(&self) -> String {
        format!(
            "{} candidates analyzed • {} shortlisted • {} under review • {} rejected",
            self.total_processed, self.shortlisted, self.under_review, self.rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend_payload() -> Value {
        json!({
            "success": true,
            "total_processed": 2,
            "shortlisted": 1,
            "under_review": 0,
            "rejected": 1,
            "processing_time": 4.2,
            "candidates": [
                {
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "jd_role": "Backend Engineer",
                    "verdict": "shortlist",
                    "score": 91.5,
                    "skills_match": 88,
                    "recruiter_notes": ""
                },
                {
                    "name": "Bob",
                    "email": "bob@example.com",
                    "verdict": "reject",
                    "score": 31.0
                }
            ],
            "metrics": { "avg_time_per_resume": 2.1, "session_id": "analysis_1700000000" }
        })
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let rs: ResultSet = serde_json::from_value(backend_payload()).unwrap();
        assert_eq!(rs.extra.get("processing_time"), Some(&json!(4.2)));
        assert_eq!(rs.candidates[0].extra.get("score"), Some(&json!(91.5)));

        let back = serde_json::to_value(&rs).unwrap();
        let again: ResultSet = serde_json::from_value(back.clone()).unwrap();
        assert_eq!(rs, again);
        assert_eq!(back["metrics"]["avg_time_per_resume"], json!(2.1));
    }

    #[test]
    fn test_missing_candidates_reads_as_empty() {
        let rs: ResultSet = serde_json::from_value(json!({ "total_processed": 0 })).unwrap();
        assert!(!rs.has_candidates());
        assert_eq!(rs.session_id(), None);
    }

    #[test]
    fn test_counts_are_not_rederived() {
        let mut rs: ResultSet = serde_json::from_value(backend_payload()).unwrap();
        rs.candidates.pop();
        assert_eq!(rs.total_processed, 2);
        assert_eq!(rs.rejected, 1);
        assert!(!rs.candidates.iter().any(|c| c.verdict == Verdict::Reject));
    }

    #[test]
    fn test_null_text_fields_read_as_empty() {
        let rs: ResultSet = serde_json::from_value(json!({
            "candidates": [{
                "email": "a@x",
                "name": null,
                "verdict": "review",
                "recruiter_notes": null
            }]
        }))
        .unwrap();
        assert_eq!(rs.candidates[0].name, "");
        assert_eq!(rs.candidates[0].recruiter_notes, "");

        let mut a = rs.candidates[0].clone();
        a.apply_patch(&CandidatePatch::notes("phone screen")).unwrap();
        assert_eq!(a.recruiter_notes, "phone screen");
    }

    #[test]
    fn test_apply_patch_only_touches_present_keys() {
        let rs: ResultSet = serde_json::from_value(backend_payload()).unwrap();
        let mut ada = rs.candidates[0].clone();

        ada.apply_patch(&CandidatePatch::notes("strong systems background"))
            .unwrap();

        assert_eq!(ada.recruiter_notes, "strong systems background");
        assert_eq!(ada.verdict, Verdict::Shortlist);
        assert_eq!(ada.extra.get("score"), Some(&json!(91.5)));
        assert_eq!(ada.jd_role.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_apply_patch_can_change_verdict() {
        let rs: ResultSet = serde_json::from_value(backend_payload()).unwrap();
        let mut bob = rs.candidates[1].clone();
        let patch = CandidatePatch {
            verdict: Some(Verdict::Review),
            ..CandidatePatch::default()
        };
        bob.apply_patch(&patch).unwrap();
        assert_eq!(bob.verdict, Verdict::Review);
        assert_eq!(bob.recruiter_notes, "");
    }

    #[test]
    fn test_verdict_from_str() {
        assert_eq!("Shortlist".parse::<Verdict>().unwrap(), Verdict::Shortlist);
        assert_eq!(" reject ".parse::<Verdict>().unwrap(), Verdict::Reject);
        assert!("maybe".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_summary_line() {
        let rs: ResultSet = serde_json::from_value(backend_payload()).unwrap();
        assert_eq!(
            rs.summary_line(),
            "2 candidates analyzed • 1 shortlisted • 0 under review • 1 rejected"
        );
    }
}
