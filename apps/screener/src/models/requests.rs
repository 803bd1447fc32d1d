use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::results::{CandidatePatch, ResultSet, Verdict};

/// Job description and screening thresholds for one analysis run.
/// Unset thresholds fall back to the backend's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    pub jd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortlist_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub job_config: &'a JobConfig,
    pub load_from_blob: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateCandidateRequest<'a> {
    pub candidate_id: &'a str,
    #[serde(flatten)]
    pub updates: &'a CandidatePatch,
}

#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkEmailRequest {
    pub candidate_emails: Vec<String>,
    pub verdict: Verdict,
    pub role: String,
    pub company_name: String,
}

/// The backend's generic `{success, message, data}` acknowledgment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Decodes a session lookup, which comes back either bare or wrapped in the
/// ack envelope. An object carrying `data` is always treated as the envelope,
/// so a malformed `data` is an error rather than an empty result set.
pub(crate) fn decode_session_results(payload: Value) -> Result<ResultSet, serde_json::Error> {
    match payload {
        Value::Object(mut body) if body.contains_key("data") => {
            serde_json::from_value(body.remove("data").unwrap_or(Value::Null))
        }
        bare => serde_json::from_value(bare),
    }
}
