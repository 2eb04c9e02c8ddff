//! Feature extraction over the parsed message sequence.
//!
//! Four independent, order-insensitive passes: reply latency, emoji
//! frequency, word frequency, and hourly activity. Each pass aggregates
//! into a `BTreeMap` keyed by (value, sender) so output order is
//! deterministic across runs; it is not sorted by count. Consumers wanting
//! "top N" sort explicitly.

use crate::model::{EmojiEntry, HourlyActivityEntry, Message, ReplyTimePoint, WordEntry};
use chrono::Timelike;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Unicode ranges counted as emoji, scanned per code point: emoticons,
/// symbols and pictographs, transport, regional indicators (flags),
/// miscellaneous symbols, dingbats.
const EMOJI_RANGES: [(u32, u32); 6] = [
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F1E0, 0x1F1FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
];

/// Common English function words and pronouns excluded from word tallies.
/// Lookup data, not logic; swap the table without touching the extractor.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
        "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
        "would", "could", "should", "may", "might", "must", "can", "a", "an", "this", "that",
        "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her",
        "us", "them",
    ]
    .into_iter()
    .collect()
});

/// Everything that is neither a word character nor whitespace.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid pattern"));

/// Minimum token length kept by the word extractor (strictly greater than).
const MIN_WORD_LEN: usize = 2;

fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Fill in reply times over the timestamp-sorted message sequence.
///
/// A reply is registered only when the sender changed from the previous
/// message; same-sender runs ("double-texting") and the first message stay
/// at 0. Negative deltas clamp to 0.
#[allow(clippy::cast_precision_loss)]
pub fn assign_reply_times(messages: &mut [Message]) {
    if let Some(first) = messages.first_mut() {
        first.reply_time = 0.0;
    }
    for i in 1..messages.len() {
        let delta = if messages[i].sender == messages[i - 1].sender {
            0.0
        } else {
            let millis = (messages[i].timestamp - messages[i - 1].timestamp).num_milliseconds();
            (millis as f64 / 60_000.0).max(0.0)
        };
        messages[i].reply_time = delta;
    }
}

/// Build the chart-facing reply-time sequence: filter to strictly positive
/// reply times and re-index 1..k in filtered order. The original message
/// position is deliberately discarded.
#[must_use]
pub fn reply_time_points(messages: &[Message]) -> Vec<ReplyTimePoint> {
    messages
        .iter()
        .filter(|m| m.reply_time > 0.0)
        .enumerate()
        .map(|(i, m)| ReplyTimePoint {
            message_index: i + 1,
            reply_time: m.reply_time,
            sender: m.sender.clone(),
        })
        .collect()
}

/// Average reply time in minutes over the measured points; 0 when none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_reply_time(points: &[ReplyTimePoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.reply_time).sum::<f64>() / points.len() as f64
}

/// Tally emoji code points per (emoji, sender).
#[must_use]
pub fn emoji_frequency(messages: &[Message]) -> Vec<EmojiEntry> {
    let mut tally: BTreeMap<(String, String), u64> = BTreeMap::new();
    for msg in messages {
        for c in msg.body.chars().filter(|&c| is_emoji(c)) {
            *tally
                .entry((c.to_string(), msg.sender.clone()))
                .or_insert(0) += 1;
        }
    }
    debug!("Tallied {} distinct (emoji, sender) pairs", tally.len());
    tally
        .into_iter()
        .map(|((emoji, sender), count)| EmojiEntry {
            emoji,
            count,
            sender,
        })
        .collect()
}

/// Tally words per (word, sender): lower-cased, punctuation replaced with
/// spaces, tokens of length <= 2 and stop words dropped.
#[must_use]
pub fn word_frequency(messages: &[Message]) -> Vec<WordEntry> {
    let mut tally: BTreeMap<(String, String), u64> = BTreeMap::new();
    for msg in messages {
        let lowered = msg.body.to_lowercase();
        let cleaned = NON_WORD.replace_all(&lowered, " ");
        for word in cleaned
            .split_whitespace()
            .filter(|w| w.chars().count() > MIN_WORD_LEN && !STOP_WORDS.contains(w))
        {
            *tally
                .entry((word.to_string(), msg.sender.clone()))
                .or_insert(0) += 1;
        }
    }
    debug!("Tallied {} distinct (word, sender) pairs", tally.len());
    tally
        .into_iter()
        .map(|((word, sender), count)| WordEntry {
            word,
            count,
            sender,
        })
        .collect()
}

/// Bucket messages by (hour-of-day, sender) across the whole date range.
/// Days are not distinguished; absent buckets are simply not emitted.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hourly_activity(messages: &[Message]) -> Vec<HourlyActivityEntry> {
    let mut tally: BTreeMap<(u8, String), u64> = BTreeMap::new();
    for msg in messages {
        let hour = msg.timestamp.hour() as u8;
        *tally.entry((hour, msg.sender.clone())).or_insert(0) += 1;
    }
    tally
        .into_iter()
        .map(|((hour, sender), count)| HourlyActivityEntry {
            hour,
            count,
            sender,
        })
        .collect()
}

/// Generate an ASCII sparkline from a slice of values.
///
/// Uses Unicode block characters: ▁▂▃▄▅▆▇█
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sparkline(values: &[u64]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let blocks = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let max = *values.iter().max().unwrap_or(&1);
    if max == 0 {
        return "▁".repeat(values.len());
    }

    values
        .iter()
        .map(|&v| {
            let idx = ((v as f64 / max as f64) * 7.0) as usize;
            blocks[idx.min(7)]
        })
        .collect()
}

/// Render one sender's 24-hour activity as a fixed-width sparkline.
#[must_use]
pub fn hourly_sparkline(entries: &[HourlyActivityEntry], sender: &str) -> String {
    let mut buckets = [0u64; 24];
    for entry in entries.iter().filter(|e| e.sender == sender) {
        if let Some(slot) = buckets.get_mut(usize::from(entry.hour)) {
            *slot = entry.count;
        }
    }
    sparkline(&buckets)
}
