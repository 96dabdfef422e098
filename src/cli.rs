//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "verdict",
    version,
    about = "Verdict (validation report renderer)",
    long_about = "Verdict — a tiny, fast CLI to render add-on validation reports into tiered, human- or machine-readable output.\n\nConfiguration precedence: CLI > verdict.toml > defaults.",
    after_help = "Examples:\n  verdict render --report upload/validation.json\n  verdict render --report upload/validation.json --output json --tiers 5\n  cat validation.json | verdict render\n  verdict check 'uploads/*.json' --filter '^testcases_'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for rendering and batch-checking reports.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current verdict version."
    )]
    Version,
    /// Render a single validation report
    #[command(
        about = "Render a validation report",
        long_about = "Parse a validation document and render its tiered report. Reads --report (repo-root relative) or stdin. Exits 1 when validation failed, 2 when the document cannot be read or parsed.",
        after_help = "Examples:\n  verdict render --report upload/validation.json\n  verdict render --report upload/validation.json --output json\n  cat validation.json | verdict render --hide-ignored"
    )]
    Render {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Path to the validation JSON document (default: stdin)")]
        report: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Minimum number of general tiers to show")]
        tiers: Option<u32>,
        #[arg(long, help = "Regex over dotted rule ids; non-matching messages are dropped")]
        filter: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Drop messages flagged as ignored")]
        hide_ignored: bool,
    },
    /// Render many reports and summarize pass/fail
    #[command(
        about = "Batch-check validation reports",
        long_about = "Expand glob patterns, render each matched document in parallel, and summarize pass/fail per file. Exits 2 when no files match or any file is unreadable, 1 when any report failed.",
        after_help = "Examples:\n  verdict check 'uploads/*.json'\n  verdict check 'a/*.json' 'b/*.json' --output json"
    )]
    Check {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Minimum number of general tiers to show")]
        tiers: Option<u32>,
        #[arg(long, help = "Regex over dotted rule ids; non-matching messages are dropped")]
        filter: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Drop messages flagged as ignored")]
        hide_ignored: bool,
        #[arg(required = true, help = "Glob patterns of validation JSON documents")]
        patterns: Vec<String>,
    },
}
