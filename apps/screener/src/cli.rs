use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use screener::models::requests::JobConfig;
use screener::models::results::Verdict;
use screener::results::VerdictFilter;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Resume screener results client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze resumes against a job description and show the results
    Analyze(AnalyzeArgs),

    /// Load a previous analysis session from the backend
    Fetch { session_id: String },

    /// Upload resumes (.pdf/.docx/.doc) to the temporary upload area
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show cached results
    Show {
        #[arg(short, long, default_value = "all")]
        filter: VerdictFilter,
    },

    /// Export candidates as CSV
    Export {
        #[arg(short, long, default_value = "all")]
        filter: VerdictFilter,
    },

    /// Download a candidate's PDF summary
    Summary { email: String },

    /// Email one candidate using the template for their verdict
    Email { email: String },

    /// Email every candidate with the given verdict
    BulkEmail {
        #[arg(long)]
        verdict: Verdict,

        #[arg(short, long)]
        company: String,
    },

    /// Save recruiter notes for a candidate
    Notes { email: String, notes: String },

    /// Reload the results from the session cache
    Refresh,

    /// Clear the session cache
    Clear,

    /// Clear the backend's temporary upload area
    ClearUploads,
}

impl Command {
    /// The verdict filter a command asks for, if any.
    pub fn filter(&self) -> Option<VerdictFilter> {
        match self {
            Command::Show { filter } | Command::Export { filter } => Some(*filter),
            Command::BulkEmail { verdict, .. } => Some(VerdictFilter::Only(*verdict)),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Job description text
    #[arg(long, conflicts_with = "jd_file")]
    pub jd: Option<String>,

    /// File containing the job description
    #[arg(long)]
    pub jd_file: Option<PathBuf>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub domain: Option<String>,

    /// Comma-separated required skills
    #[arg(long)]
    pub skills: Option<String>,

    /// e.g. "3-5"
    #[arg(long)]
    pub experience_range: Option<String>,

    /// Force-shortlist the N highest scores
    #[arg(long)]
    pub top_n: Option<u32>,

    #[arg(long)]
    pub shortlist_threshold: Option<f64>,

    #[arg(long)]
    pub reject_threshold: Option<f64>,

    /// Analyze manually uploaded resumes instead of blob storage
    #[arg(long)]
    pub uploaded: bool,
}

impl AnalyzeArgs {
    pub fn job_config(&self) -> Result<JobConfig> {
        let jd = match (&self.jd, &self.jd_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job description from {}", path.display()))?,
            (None, None) => bail!("provide the job description with --jd or --jd-file"),
        };
        if jd.trim().is_empty() {
            bail!("job description is empty");
        }

        Ok(JobConfig {
            jd,
            role: self.role.clone(),
            domain: self.domain.clone(),
            skills: self.skills.clone(),
            experience_range: self.experience_range.clone(),
            top_n: self.top_n,
            shortlist_threshold: self.shortlist_threshold,
            reject_threshold: self.reject_threshold,
            ..JobConfig::default()
        })
    }
}
