//! The love-score aggregator.
//!
//! Deterministic rule-based scoring over the feature aggregates. The
//! thresholds and adjustments below are the behavioral contract, not
//! tunable placeholders: base 50, then reply-speed, emoji-density,
//! balance, and consistency adjustments in that order, clamped to
//! [0, 100].

use crate::model::{Message, ReplyTimePoint};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

/// Base score before any adjustment.
const BASE_SCORE: f64 = 50.0;

/// The four summary statistics the score is a pure function of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFactors {
    /// Average reply time in minutes over the positive subsequence
    /// (unrounded); 0 when no replies were measured.
    pub avg_reply_time: f64,
    /// Total emoji count divided by total message count.
    pub emoji_ratio: f64,
    /// For exactly two participants, the smaller share of total messages
    /// (0.5 = perfectly even); fixed at 0.5 otherwise.
    pub message_ratio: f64,
    /// Distinct calendar dates with activity divided by the day span.
    pub consistency_ratio: f64,
}

impl ScoreFactors {
    /// Derive the factors from the parsed sequence and its aggregates.
    ///
    /// `messages` must already be timestamp-sorted with reply times
    /// assigned.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(
        messages: &[Message],
        participants: &[String],
        reply_points: &[ReplyTimePoint],
        total_emojis: u64,
    ) -> Self {
        let total = messages.len();

        let avg_reply_time = crate::features::average_reply_time(reply_points);

        let emoji_ratio = if total == 0 {
            0.0
        } else {
            total_emojis as f64 / total as f64
        };

        let message_ratio = if participants.len() == 2 {
            let first = messages
                .iter()
                .filter(|m| m.sender == participants[0])
                .count();
            let second = messages
                .iter()
                .filter(|m| m.sender == participants[1])
                .count();
            first.min(second) as f64 / total as f64
        } else {
            0.5
        };

        let consistency_ratio = consistency(messages);

        Self {
            avg_reply_time,
            emoji_ratio,
            message_ratio,
            consistency_ratio,
        }
    }
}

/// Per-factor adjustments plus the final clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub reply_speed: i32,
    pub emoji_density: i32,
    pub balance: i32,
    pub consistency: i32,
    /// Final integer score in [0, 100].
    pub total: u8,
}

/// Apply the rule table to the four factors.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn love_score(factors: &ScoreFactors) -> ScoreBreakdown {
    let reply_speed = if factors.avg_reply_time < 5.0 {
        20
    } else if factors.avg_reply_time < 15.0 {
        10
    } else if factors.avg_reply_time < 60.0 {
        5
    } else {
        -10
    };

    let emoji_density = if factors.emoji_ratio > 0.3 {
        15
    } else if factors.emoji_ratio > 0.1 {
        10
    } else if factors.emoji_ratio > 0.05 {
        5
    } else {
        0
    };

    let balance = if factors.message_ratio > 0.4 {
        10
    } else if factors.message_ratio > 0.3 {
        5
    } else {
        -5
    };

    let consistency = if factors.consistency_ratio > 0.5 {
        10
    } else if factors.consistency_ratio > 0.3 {
        5
    } else {
        0
    };

    let raw =
        BASE_SCORE + f64::from(reply_speed + emoji_density + balance + consistency);
    let total = raw.clamp(0.0, 100.0).round() as u8;

    debug!(
        reply_speed,
        emoji_density, balance, consistency, total, "Score computed"
    );

    ScoreBreakdown {
        reply_speed,
        emoji_density,
        balance,
        consistency,
        total,
    }
}

/// Active days over the day span of the transcript.
///
/// Active days are distinct calendar dates carrying at least one message;
/// the span is the ceiling of the first-to-last distance in days, floored
/// to 1 so single-day chats divide cleanly.
#[allow(clippy::cast_precision_loss)]
fn consistency(messages: &[Message]) -> f64 {
    let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
        return 0.0;
    };

    let active_days: HashSet<NaiveDate> =
        messages.iter().map(|m| m.timestamp.date()).collect();

    let millis = (last.timestamp - first.timestamp).num_milliseconds();
    let total_days = (millis as f64 / 86_400_000.0).ceil().max(1.0);

    active_days.len() as f64 / total_days
}
