//! Chat transcript parser.
//!
//! Handles the bracketed-header text format produced by chat exports:
//!
//! ```text
//! [08/06/25, 10:47:07 PM] Alice: see you tomorrow
//! ```
//!
//! Lines that do not match the grammar are dropped silently. That policy
//! tolerates system notices, media placeholders, and the continuation
//! lines of multi-line messages; the continuation text is lost rather than
//! appended to the previous message. A known limitation, kept as-is.

use crate::error::{LovelogError, Result};
use crate::model::Message;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

/// Header grammar: `[D/M/YY, H:MM:SS AM] sender: body`.
///
/// Day and month are 1-2 digits, the year 2 or 4 digits, the clock
/// 12-hour with seconds. Sender is everything before the first colon
/// after the bracket.
static MESSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{1,2})/(\d{1,2})/(\d{2,4}),\s+(\d{1,2}):(\d{2}):(\d{2})\s+([AP]M)\]\s+([^:]+):\s*(.*)$")
        .expect("message pattern is valid")
});

/// Invisible left-to-right mark; exports prefix system/meta bodies with it.
const SYSTEM_MARKER: char = '\u{200E}';

/// A parsed transcript: ordered messages plus the participant set.
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    /// Messages sorted ascending by timestamp, reply times not yet set.
    pub messages: Vec<Message>,
    /// Distinct senders in first-appearance order (pre-sort input order).
    pub participants: Vec<String>,
}

impl ParsedTranscript {
    /// Parse raw transcript text.
    ///
    /// Blank and non-matching lines are skipped; system/meta lines are
    /// excluded entirely (they count toward nothing). Messages are sorted
    /// by timestamp afterwards because merged exports can interleave
    /// out-of-order lines.
    ///
    /// # Errors
    ///
    /// Returns [`LovelogError::EmptyTranscript`] when zero lines match the
    /// grammar.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        debug!("Parsing transcript with {} non-blank lines", lines.len());

        let mut messages = Vec::new();
        let mut participants: Vec<String> = Vec::new();
        let mut dropped = 0usize;
        let mut system = 0usize;

        for line in &lines {
            match parse_line(line) {
                LineOutcome::Message(msg) => {
                    if !participants.iter().any(|p| p == &msg.sender) {
                        participants.push(msg.sender.clone());
                    }
                    messages.push(msg);
                }
                LineOutcome::System => system += 1,
                LineOutcome::NoMatch => {
                    dropped += 1;
                    debug!("Dropped unmatched line: {}", truncate_for_log(line));
                }
            }
        }

        if messages.is_empty() {
            return Err(LovelogError::EmptyTranscript);
        }

        // Exported transcripts are not trusted to be chronological.
        messages.sort_by_key(|m| m.timestamp);

        info!(
            "Parsed {} messages from {} participants ({} dropped, {} system)",
            messages.len(),
            participants.len(),
            dropped,
            system
        );

        Ok(Self {
            messages,
            participants,
        })
    }
}

enum LineOutcome {
    Message(Message),
    System,
    NoMatch,
}

/// Match one physical line against the header grammar.
fn parse_line(line: &str) -> LineOutcome {
    let Some(caps) = MESSAGE_PATTERN.captures(line) else {
        return LineOutcome::NoMatch;
    };

    let body = &caps[9];
    if body.starts_with(SYSTEM_MARKER) {
        return LineOutcome::System;
    }

    let Some(timestamp) = build_timestamp(
        &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6], &caps[7],
    ) else {
        // Calendar-invalid dates (e.g. 31/02) fall under the same
        // drop-don't-fail policy as unmatched lines.
        return LineOutcome::NoMatch;
    };

    LineOutcome::Message(Message {
        timestamp,
        sender: caps[8].trim().to_string(),
        body: body.trim().to_string(),
        reply_time: 0.0,
    })
}

/// Resolve calendar fields to a naive local instant.
///
/// The first date field is the day, the second the month. Two-digit years
/// mean 2000+YY; the 12-hour clock converts as 12 AM -> 0, 12 PM -> 12,
/// N PM -> N+12.
fn build_timestamp(
    day: &str,
    month: &str,
    year: &str,
    hour: &str,
    minute: &str,
    second: &str,
    ampm: &str,
) -> Option<NaiveDateTime> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };

    let mut hour: u32 = hour.parse().ok()?;
    if ampm == "PM" && hour != 12 {
        hour += 12;
    } else if ampm == "AM" && hour == 12 {
        hour = 0;
    }

    let minute: u32 = minute.parse().ok()?;
    let second: u32 = second.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn truncate_for_log(line: &str) -> String {
    line.chars().take(60).collect()
}
