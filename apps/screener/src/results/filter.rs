use std::fmt;
use std::str::FromStr;

use crate::errors::ScreenerError;
use crate::models::results::{Candidate, Verdict};

/// Single-select verdict filter with a distinguished "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerdictFilter {
    #[default]
    All,
    Only(Verdict),
}

impl VerdictFilter {
    /// Filter bar order.
    pub const CHOICES: [VerdictFilter; 4] = [
        VerdictFilter::All,
        VerdictFilter::Only(Verdict::Shortlist),
        VerdictFilter::Only(Verdict::Review),
        VerdictFilter::Only(Verdict::Reject),
    ];

    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            VerdictFilter::All => None,
            VerdictFilter::Only(v) => Some(*v),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictFilter::All => "all",
            VerdictFilter::Only(v) => v.as_str(),
        }
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            VerdictFilter::All => true,
            VerdictFilter::Only(v) => candidate.verdict == *v,
        }
    }

    /// The matching candidates, in their original order.
    pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates.iter().filter(|c| self.matches(c)).collect()
    }

    /// Filter bar label: `All`, or the verdict with its live count.
    pub fn label(&self, candidates: &[Candidate]) -> String {
        match self {
            VerdictFilter::All => "All".to_string(),
            VerdictFilter::Only(v) => {
                let count = candidates.iter().filter(|c| c.verdict == *v).count();
                format!("{} ({count})", v.label())
            }
        }
    }
}

impl fmt::Display for VerdictFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerdictFilter {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(VerdictFilter::All);
        }
        s.parse().map(VerdictFilter::Only)
    }
}
