//! CLI definitions for lovelog.
//!
//! Uses clap for argument parsing with derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// lovelog - chat transcript affinity scoring
#[derive(Parser, Debug)]
#[command(name = "lovelog")]
#[command(version)]
#[command(about = "Score two-person chat transcripts from text exports")]
#[command(long_about = r"
lovelog - a command-line tool that parses an exported chat transcript,
derives reply-latency, emoji, word, and hourly-activity statistics, and
combines them into a 0-100 love score.

The score is a deterministic heuristic, not a validated prediction.
Take the output in the spirit it is offered.

Quick start:
  1. Export a chat as a text file (without media)
  2. Run: lovelog analyze chat.txt
  3. Or just the number: lovelog score chat.txt
")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Be verbose (show debug info)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Be quiet (suppress non-error output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a transcript and print the full report
    Analyze(AnalyzeArgs),

    /// Print only the love score with its factor breakdown
    Score(ScoreArgs),

    /// Show or manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the exported chat transcript (.txt)
    pub transcript: PathBuf,

    /// Number of top emoji/word entries to show
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the exported chat transcript (.txt)
    pub transcript: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Print a default config file to stdout
    #[arg(long)]
    pub init: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_parses_top_flag() {
        let cli = Cli::parse_from(["lovelog", "analyze", "chat.txt", "--top", "5"]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.transcript, PathBuf::from("chat.txt"));
                assert_eq!(args.top, Some(5));
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn global_format_flag() {
        let cli = Cli::parse_from(["lovelog", "-f", "json", "score", "chat.txt"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
