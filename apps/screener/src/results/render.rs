use std::fmt::Write;

use crate::models::results::Candidate;
use crate::results::view::Screen;

pub const CACHE_BANNER: &str =
    "Results cached - data persists until you clear the session cache";

/// Renders a screen as plain text for the terminal.
pub fn render_screen(screen: &Screen<'_>) -> String {
    let mut out = String::new();
    match screen {
        Screen::Loading => out.push_str("Loading results...\n"),
        Screen::Empty { recovery } => {
            out.push_str("No Results Available\n");
            out.push_str(
                "No analysis results found. Please run an analysis from the Resume Screener page.\n",
            );
            let _ = writeln!(out, "→ {} ({})", recovery.label(), recovery.route());
        }
        Screen::Results {
            summary,
            tabs,
            visible,
        } => {
            let _ = writeln!(out, "{CACHE_BANNER}\n");
            out.push_str("Screening Results\n");
            let _ = writeln!(out, "{summary}\n");

            let bar: Vec<String> = tabs
                .iter()
                .map(|t| {
                    if t.active {
                        format!("[{}]", t.label)
                    } else {
                        t.label.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "Filter: {}\n", bar.join("  "));

            if visible.is_empty() {
                out.push_str("No candidates match the selected filter.\n");
            }
            for candidate in visible {
                render_candidate(&mut out, candidate);
            }
        }
    }
    out
}

fn render_candidate(out: &mut String, c: &Candidate) {
    let _ = writeln!(out, "{} <{}> — {}", c.name, c.email, c.verdict.label());
    if let Some(role) = &c.jd_role {
        let _ = writeln!(out, "  role:  {role}");
    }
    if let Some(score) = c.extra.get("score").and_then(|v| v.as_f64()) {
        let _ = writeln!(out, "  score: {score:.1}");
    }
    if !c.recruiter_notes.is_empty() {
        let _ = writeln!(out, "  notes: {}", c.recruiter_notes);
    }
}
