//! lovelog - chat transcript affinity scoring CLI
//!
//! Main entry point for the lovelog command-line tool.

// Count fields are u64 for aggregation; display formatting narrows them.
#![allow(clippy::cast_possible_truncation)]

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use itertools::Itertools;
use std::io;
use std::path::Path;

use lovelog::config::Config;
use lovelog::logging::init_cli_logging;
use lovelog::score::{ScoreFactors, love_score};
use lovelog::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_cli_logging(cli.quiet, cli.verbose);

    let config = Config::load();

    let result = match &cli.command {
        Commands::Analyze(args) => cmd_analyze(&cli, &config, args),
        Commands::Score(args) => cmd_score(&cli, args),
        Commands::Config(args) => cmd_config(args),
        Commands::Completions(args) => cmd_completions(args.clone()),
    };

    if let Err(err) = &result {
        if let Some(hint) = err
            .downcast_ref::<LovelogError>()
            .and_then(LovelogError::suggestion)
        {
            eprintln!("{}", format!("hint: {hint}").yellow());
        }
    }

    result
}

/// Read the transcript file, surfacing a friendly error for bad paths.
fn read_transcript(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(LovelogError::transcript_not_found(path).into());
    }
    std::fs::read_to_string(path).map_err(|e| LovelogError::path_error("read", path, e).into())
}

fn cmd_analyze(cli: &Cli, config: &Config, args: &cli::AnalyzeArgs) -> Result<()> {
    let text = read_transcript(&args.transcript)?;
    let report = analyze(&text)?;

    let top_n = args.top.unwrap_or(config.analysis.top_items);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Compact => print_compact(&report),
        OutputFormat::Text => print_report(&report, top_n),
    }

    Ok(())
}

fn cmd_score(cli: &Cli, args: &cli::ScoreArgs) -> Result<()> {
    let text = read_transcript(&args.transcript)?;
    let report = analyze(&text)?;

    // Recompute the factor breakdown for display; the pipeline only
    // stores the final score.
    let reply_points = lovelog::features::reply_time_points(&report.messages);
    let factors = ScoreFactors::compute(
        &report.messages,
        &report.participants,
        &reply_points,
        report.total_emojis,
    );
    let breakdown = love_score(&factors);

    match cli.format {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::json!({
                "love_score": breakdown.total,
                "reply_speed": breakdown.reply_speed,
                "emoji_density": breakdown.emoji_density,
                "balance": breakdown.balance,
                "consistency": breakdown.consistency,
            });
            if cli.format == OutputFormat::JsonPretty {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{value}");
            }
        }
        OutputFormat::Compact => println!("{}", breakdown.total),
        OutputFormat::Text => {
            println!("{}", "Love Score".bold().cyan());
            println!("{}", "─".repeat(CONTENT_DIVIDER_WIDTH));
            println!(
                "  {:<24} {:>6}",
                "Base:",
                "50",
            );
            print_adjustment("Reply speed:", breakdown.reply_speed);
            print_adjustment("Emoji density:", breakdown.emoji_density);
            print_adjustment("Balance:", breakdown.balance);
            print_adjustment("Consistency:", breakdown.consistency);
            println!("{}", "─".repeat(CONTENT_DIVIDER_WIDTH));
            println!(
                "  {:<24} {}",
                "Total:",
                format!("{:>4} / 100", breakdown.total).bold()
            );
            println!();
            print_verdict(breakdown.total);
        }
    }

    Ok(())
}

fn print_adjustment(label: &str, value: i32) {
    let rendered = if value >= 0 {
        format!("+{value}").green()
    } else {
        value.to_string().red()
    };
    println!("  {label:<24} {rendered:>6}");
}

fn print_compact(report: &ChatReport) {
    println!(
        "score={} messages={} participants={} avg_reply={} emojis={}",
        report.love_score,
        report.total_messages,
        report.participants.len(),
        format_minutes(report.avg_reply_time),
        report.total_emojis
    );
}

fn print_report(report: &ChatReport, top_n: usize) {
    println!("{}", "Chat Analysis".bold().cyan());
    println!("{}", "─".repeat(CONTENT_DIVIDER_WIDTH));
    println!(
        "  {:<18} {}",
        "Participants:",
        report.participants.join(", ")
    );
    println!(
        "  {:<18} {}",
        "Messages:",
        format_number(report.total_messages)
    );
    println!(
        "  {:<18} {} → {}",
        "Period:",
        report.start_date.format("%Y-%m-%d %H:%M"),
        report.end_date.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  {:<18} {} over {} replies",
        "Avg reply time:",
        format_minutes(report.avg_reply_time),
        report.reply_times.len()
    );
    println!(
        "  {:<18} {}",
        "Emojis:",
        format_number(report.total_emojis as usize)
    );
    println!("{}", "─".repeat(CONTENT_DIVIDER_WIDTH));
    println!(
        "  {:<18} {}",
        "Love score:",
        format!("{} / 100", report.love_score).bold().magenta()
    );
    println!();

    if !report.emoji_frequency.is_empty() {
        println!("{}", "Top emojis".bold());
        for entry in top_emojis(report, top_n) {
            println!(
                "  {}  {:>5}  {}",
                entry.emoji,
                format_number(entry.count as usize),
                entry.sender.dimmed()
            );
        }
        println!();
    }

    if !report.word_frequency.is_empty() {
        println!("{}", "Top words".bold());
        for entry in top_words(report, top_n) {
            println!(
                "  {:<14} {:>5}  {}",
                entry.word,
                format_number(entry.count as usize),
                entry.sender.dimmed()
            );
        }
        println!();
    }

    println!("{}", "Hourly activity (00-23)".bold());
    for participant in &report.participants {
        println!(
            "  {:<12} {}",
            participant,
            lovelog::features::hourly_sparkline(&report.hourly_activity, participant)
        );
    }
    println!();

    if let Some((fastest, slowest)) = reply_extremes(report) {
        println!("{}", "Reply times".bold());
        println!(
            "  fastest {}, slowest {}",
            format_minutes(fastest).green(),
            format_minutes(slowest).yellow()
        );
        println!();
    }

    print_verdict(report.love_score);
}

/// Top-N selection sorted by count descending. Ties break on the entry
/// key so output stays deterministic.
fn top_emojis(report: &ChatReport, n: usize) -> Vec<&EmojiEntry> {
    report
        .emoji_frequency
        .iter()
        .sorted_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.emoji.cmp(&b.emoji))
                .then_with(|| a.sender.cmp(&b.sender))
        })
        .take(n)
        .collect()
}

fn top_words(report: &ChatReport, n: usize) -> Vec<&WordEntry> {
    report
        .word_frequency
        .iter()
        .sorted_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.word.cmp(&b.word))
                .then_with(|| a.sender.cmp(&b.sender))
        })
        .take(n)
        .collect()
}

fn reply_extremes(report: &ChatReport) -> Option<(f64, f64)> {
    if report.reply_times.is_empty() {
        return None;
    }
    let times = report.reply_times.iter().map(|p| p.reply_time);
    let fastest = times.clone().fold(f64::INFINITY, f64::min);
    let slowest = times.fold(0.0, f64::max);
    Some((fastest, slowest))
}

fn print_verdict(score: u8) {
    let (headline, detail) = verdict(score);
    println!("{}", headline.bold());
    for line in textwrap::wrap(detail, 60) {
        println!("  {}", line.dimmed());
    }
}

/// Verdict copy per score band.
const fn verdict(score: u8) -> (&'static str, &'static str) {
    if score >= 80 {
        (
            "They're totally into you!",
            "Quick replies, lots of emojis, and consistent engagement - \
             all the signs are there!",
        )
    } else if score >= 60 {
        (
            "Strong romantic potential!",
            "They're showing genuine interest with their communication patterns.",
        )
    } else if score >= 40 {
        (
            "There's definitely something there...",
            "Some positive indicators, but the signals are mixed.",
        )
    } else if score >= 20 {
        (
            "Mixed signals detected",
            "Limited engagement patterns suggest lukewarm interest.",
        )
    } else {
        (
            "Time to move on, friend",
            "The data suggests they might not be as invested as you are.",
        )
    }
}

fn cmd_config(args: &cli::ConfigArgs) -> Result<()> {
    if args.init {
        print!("{}", Config::default_config_content());
        return Ok(());
    }

    // Default to --show behavior.
    let config = Config::load();
    println!("{}", "Current Configuration".bold().cyan());
    if let Some(path) = Config::user_config_path() {
        println!("  Config file: {}", path.display());
    }
    println!("  Format: {}", config.output.format);
    println!("  Colors: {}", config.output.colors);
    println!("  Top items: {}", config.analysis.top_items);
    Ok(())
}

fn cmd_completions(args: cli::CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "lovelog", &mut io::stdout());
    Ok(())
}
