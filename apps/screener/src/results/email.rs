//! Candidate email templates. One for shortlisted candidates, one for
//! everyone else; both are filled with the candidate's name and role.

use crate::models::results::{Candidate, Verdict};

const DEFAULT_ROLE: &str = "Position";

const SHORTLIST_BODY: &str = "Dear {name},\n\n\
Congratulations! We are pleased to inform you that you have been shortlisted for the next round.\n\n\
Best regards,\nRecruitment Team";

const FOLLOW_UP_BODY: &str = "Dear {name},\n\n\
Thank you for your interest. We will review your application and get back to you.\n\n\
Best regards,\nRecruitment Team";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

pub fn compose_email(candidate: &Candidate) -> EmailDraft {
    let role = candidate
        .jd_role
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(DEFAULT_ROLE);
    let template = match candidate.verdict {
        Verdict::Shortlist => SHORTLIST_BODY,
        Verdict::Review | Verdict::Reject => FOLLOW_UP_BODY,
    };

    EmailDraft {
        subject: format!("Interview Opportunity - {role}"),
        body: template.replace("{name}", &candidate.name),
    }
}
