//! lovelog - chat transcript affinity scoring
//!
//! This library parses exported two-person chat transcripts, extracts
//! statistical features, and combines them into a heuristic love score.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`error`] - Custom error types
//! - [`model`] - Data models for parsed transcripts and the final report
//! - [`parser`] - Transcript line grammar and message extraction
//! - [`features`] - Reply-latency, emoji, word, and hourly extractors
//! - [`score`] - The rule-table score aggregator
//! - [`report`] - Pipeline orchestration

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod parser;
pub mod report;
pub mod score;

pub use cli::*;
pub use error::{LovelogError, Result, ResultExt};
pub use model::*;
pub use parser::ParsedTranscript;
pub use report::analyze;
pub use score::{ScoreBreakdown, ScoreFactors, love_score};

/// Standard width for content dividers in CLI output
pub const CONTENT_DIVIDER_WIDTH: usize = 44;

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 60.0 * 24.0;

/// Format a reply time in minutes as a human-friendly duration.
///
/// - < 1 minute: seconds ("45 sec")
/// - < 1 hour: minutes with one decimal ("2.5 min")
/// - < 1 day: hours with one decimal ("1.5 hr")
/// - otherwise: days with one decimal ("2.0 days")
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 1.0 {
        format!("{} sec", (minutes * 60.0).round() as i64)
    } else if minutes < MINUTES_PER_HOUR {
        format!("{minutes:.1} min")
    } else if minutes < MINUTES_PER_DAY {
        format!("{:.1} hr", minutes / MINUTES_PER_HOUR)
    } else {
        format!("{:.1} days", minutes / MINUTES_PER_DAY)
    }
}

/// Format a usize with thousands separators.
#[must_use]
pub fn format_number(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Truncate text to approximately `max_len` characters at a word boundary.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_len).collect();
    truncated.rfind(' ').map_or_else(
        || format!("{truncated}..."),
        |last_space| format!("{}...", &truncated[..last_space]),
    )
}
