//! Pipeline orchestration: raw transcript text in, [`ChatReport`] out.
//!
//! Data flows strictly forward through the four stages (tokenize/parse,
//! extract, score, assemble). Each invocation allocates fresh aggregation
//! state; either a complete report comes back or the whole run fails.

use crate::error::Result;
use crate::features;
use crate::model::ChatReport;
use crate::parser::ParsedTranscript;
use crate::score::{self, ScoreFactors};
use tracing::info;

/// Run the full analysis pipeline over raw transcript text.
///
/// # Errors
///
/// Returns [`crate::LovelogError::EmptyTranscript`] when no lines match
/// the message grammar; no partial report is ever produced.
pub fn analyze(text: &str) -> Result<ChatReport> {
    let ParsedTranscript {
        mut messages,
        participants,
    } = ParsedTranscript::parse(text)?;

    features::assign_reply_times(&mut messages);

    let reply_times = features::reply_time_points(&messages);
    let emoji_frequency = features::emoji_frequency(&messages);
    let word_frequency = features::word_frequency(&messages);
    let hourly_activity = features::hourly_activity(&messages);

    let total_emojis: u64 = emoji_frequency.iter().map(|e| e.count).sum();
    let avg_reply_time = features::average_reply_time(&reply_times);

    let factors = ScoreFactors::compute(&messages, &participants, &reply_times, total_emojis);
    let breakdown = score::love_score(&factors);

    // Parse guarantees at least one message, sorted ascending.
    let start_date = messages[0].timestamp;
    let end_date = messages[messages.len() - 1].timestamp;
    let total_messages = messages.len();

    info!(
        messages = total_messages,
        participants = participants.len(),
        score = breakdown.total,
        "Analysis complete"
    );

    Ok(ChatReport {
        messages,
        participants,
        total_messages,
        avg_reply_time: round_tenth(avg_reply_time),
        total_emojis,
        love_score: breakdown.total,
        reply_times,
        emoji_frequency,
        word_frequency,
        hourly_activity,
        start_date,
        end_date,
    })
}

/// Round to one decimal place, matching the report contract.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LovelogError;

    const SAMPLE: &str = "\
[01/01/25, 09:00:00 AM] Alice: hey love you!! \u{2764}\u{FE0F}
[01/01/25, 09:02:00 AM] Bob: haha same \u{1F602}
[01/01/25, 09:05:00 AM] Alice: good morning";

    #[test]
    fn sample_transcript_matches_expected_aggregates() {
        let report = analyze(SAMPLE).unwrap();

        assert_eq!(report.total_messages, 3);
        assert_eq!(report.participants, vec!["Alice", "Bob"]);

        assert_eq!(report.messages[0].reply_time, 0.0);
        assert_eq!(report.messages[1].reply_time, 2.0);
        assert_eq!(report.messages[2].reply_time, 3.0);

        assert_eq!(report.total_emojis, 2);
        let heart = report
            .emoji_frequency
            .iter()
            .find(|e| e.emoji == "\u{2764}")
            .unwrap();
        assert_eq!((heart.count, heart.sender.as_str()), (1, "Alice"));
        let laugh = report
            .emoji_frequency
            .iter()
            .find(|e| e.emoji == "\u{1F602}")
            .unwrap();
        assert_eq!((laugh.count, laugh.sender.as_str()), (1, "Bob"));

        let words: Vec<(&str, &str)> = report
            .word_frequency
            .iter()
            .map(|w| (w.word.as_str(), w.sender.as_str()))
            .collect();
        assert!(words.contains(&("good", "Alice")));
        assert!(words.contains(&("morning", "Alice")));
        assert!(words.contains(&("hey", "Alice")));
        assert!(!words.iter().any(|(w, _)| *w == "you"));

        assert_eq!(report.avg_reply_time, 2.5);
        assert!(report.love_score <= 100);
    }

    #[test]
    fn report_is_deterministic() {
        let a = analyze(SAMPLE).unwrap();
        let b = analyze(SAMPLE).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn empty_transcript_produces_no_report() {
        let err = analyze("nothing to see").unwrap_err();
        assert!(matches!(err, LovelogError::EmptyTranscript));
    }

    #[test]
    fn start_and_end_span_the_sorted_messages() {
        let text = "\
[03/01/25, 09:00:00 AM] Alice: last
[01/01/25, 09:00:00 AM] Bob: first";
        let report = analyze(text).unwrap();
        assert!(report.start_date < report.end_date);
        assert_eq!(report.messages[0].sender, "Bob");
    }

    #[test]
    fn single_message_report_is_complete() {
        let report = analyze("[01/01/25, 09:00:00 AM] Alice: solo").unwrap();
        assert_eq!(report.total_messages, 1);
        assert_eq!(report.avg_reply_time, 0.0);
        assert!(report.reply_times.is_empty());
        assert_eq!(report.start_date, report.end_date);
        assert_eq!(report.hourly_activity.len(), 1);
    }
}
