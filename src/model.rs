//! Data models for parsed chat transcripts.
//!
//! These structures represent the normalized form of a chat export after
//! parsing, plus the aggregate report produced by the analysis pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One parsed chat message.
///
/// Timestamps are naive local instants: the export carries no timezone, so
/// values are only ever compared to each other within one local calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub timestamp: NaiveDateTime,
    /// Trimmed display name, used verbatim as the grouping key downstream.
    pub sender: String,
    /// Message text with the header stripped, trimmed.
    pub body: String,
    /// Minutes since the previous message when the sender changed; 0 for
    /// the first message and for consecutive same-sender messages.
    pub reply_time: f64,
}

/// Count of one emoji code point used by one sender over the whole
/// transcript. Sender is part of the aggregation key, not a sub-count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    pub emoji: String,
    pub count: u64,
    pub sender: String,
}

/// Count of one word used by one sender, same aggregation shape as
/// [`EmojiEntry`]. Words are lower-cased, punctuation-stripped tokens
/// longer than 2 characters, stop words excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub count: u64,
    pub sender: String,
}

/// One chart point per message with a strictly positive reply time.
///
/// `message_index` is a 1-based sequence number over the filtered
/// positive-reply-time subsequence, not the original message position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTimePoint {
    pub message_index: usize,
    pub reply_time: f64,
    pub sender: String,
}

/// Messages sent by one sender in one hour-of-day bucket, aggregated
/// across all days in the transcript. Absent buckets are zero, not
/// emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyActivityEntry {
    pub hour: u8,
    pub count: u64,
    pub sender: String,
}

/// The final immutable aggregate for one analyzed transcript.
///
/// Every collection is always present; an empty list is valid, a missing
/// field is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReport {
    /// All parsed messages in timestamp order, reply times populated.
    pub messages: Vec<Message>,
    /// Distinct senders in first-appearance order.
    pub participants: Vec<String>,
    pub total_messages: usize,
    /// Average reply time in minutes over the positive-reply-time
    /// subsequence, rounded to one decimal; 0 if no replies were measured.
    pub avg_reply_time: f64,
    pub total_emojis: u64,
    /// Deterministic heuristic in [0, 100]; not a statistical model.
    pub love_score: u8,
    pub reply_times: Vec<ReplyTimePoint>,
    pub emoji_frequency: Vec<EmojiEntry>,
    pub word_frequency: Vec<WordEntry>,
    pub hourly_activity: Vec<HourlyActivityEntry>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl ChatReport {
    /// Number of messages sent by one participant.
    #[must_use]
    pub fn messages_by(&self, sender: &str) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }

    /// Total span of the transcript in whole days, floored to 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn span_days(&self) -> i64 {
        let minutes = (self.end_date - self.start_date).num_minutes();
        let days = (minutes as f64 / (60.0 * 24.0)).ceil() as i64;
        days.max(1)
    }
}
