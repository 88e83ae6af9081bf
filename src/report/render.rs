use std::fmt::Write;

use chrono::{DateTime, TimeZone};

use crate::constants::DESCRIPTION_SNIPPET_CHARS;
use crate::pipeline::{MatchReport, Recommendation};

const MISSING: &str = "N/A";

/// First `DESCRIPTION_SNIPPET_CHARS` characters of the description.
pub fn description_snippet(description: &str) -> String {
    let mut chars = description.chars();
    let snippet: String = chars.by_ref().take(DESCRIPTION_SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", snippet)
    } else {
        snippet
    }
}

fn field(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

fn fields(rec: &Recommendation) -> [(&'static str, String); 10] {
    let job = &rec.job;
    [
        ("Title", job.title.clone()),
        ("Company", field(job.company()).to_string()),
        ("Location", field(job.location()).to_string()),
        ("Job Type", field(job.job_type()).to_string()),
        ("Date Posted", field(job.date_posted()).to_string()),
        ("Similarity Score", format!("{:.2}", rec.similarity)),
        ("Description", description_snippet(&job.description)),
        ("Company URL", field(job.company_url()).to_string()),
        ("Job URL", field(job.job_url()).to_string()),
        ("Job Direct URL", field(job.job_url_direct()).to_string()),
    ]
}

/// Plain-text rendering for a terminal.
pub fn render_console(report: &MatchReport) -> String {
    let mut out = String::new();

    if report.recommendations.is_empty() {
        out.push_str("No recommendations.\n");
    }

    for rec in &report.recommendations {
        let _ = writeln!(out, "Recommendation {}:", rec.rank);
        for (name, value) in fields(rec) {
            let _ = writeln!(out, "{}: {}", name, value);
        }
        let _ = writeln!(out, "Recommendation Reason: {}", rec.explanation.narrative);
        let _ = writeln!(out, "Summary: {}", rec.explanation.summary());
        out.push('\n');
    }

    if !report.failures.is_empty() {
        let _ = writeln!(
            out,
            "Warning: {} job(s) could not be embedded and were ranked last:",
            report.failures.len()
        );
        for failure in &report.failures {
            let _ = writeln!(out, "  - {}: {}", failure.label, failure.error);
        }
    }

    out
}

/// Markdown document with one section per recommendation.
pub fn render_markdown<Tz>(report: &MatchReport, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Job Recommendations ({})\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    for rec in &report.recommendations {
        let _ = writeln!(out, "## Recommendation {}\n", rec.rank);
        for (name, value) in fields(rec) {
            let _ = writeln!(out, "**{}:** {}\n", name, value);
        }
        let _ = writeln!(
            out,
            "**Recommendation Reason:** {}\n",
            rec.explanation.narrative
        );
        let _ = writeln!(out, "**Summary:** {}\n", rec.explanation.summary());
        if !rec.explanation.category_buckets.is_empty() {
            for (category, keywords) in &rec.explanation.category_buckets {
                let _ = writeln!(out, "- {}: {}", category, keywords.join(", "));
            }
            out.push('\n');
        }
        out.push_str("---\n\n");
    }

    if !report.failures.is_empty() {
        out.push_str("## Degraded Jobs\n\n");
        for failure in &report.failures {
            let _ = writeln!(out, "- {}: {}", failure.label, failure.error);
        }
        out.push('\n');
    }

    out
}

/// `recommendations-YYYYMMDD-HHMMSS.md`
pub fn report_file_name<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "recommendations-{}.md",
        generated_at.format("%Y%m%d-%H%M%S")
    )
}
