//! Verdict CLI binary entry point.
//! Delegates to library modules for report building and printing.

use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use verdict::cli::{Cli, Commands};
use verdict::models::document::ValidationDocument;
use verdict::output::{self, CheckOutcome};
use verdict::report::{build_report, BuildOptions};
use verdict::{config, models::Counts};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Render {
            repo_root,
            report,
            output,
            tiers,
            filter,
            hide_ignored,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                report.as_deref(),
                output.as_deref(),
                tiers,
                filter.as_deref(),
                if hide_ignored { Some(true) } else { None },
            );
            if config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    output::note_prefix(),
                    "No verdict.toml found; using defaults."
                );
            }
            let opts = match build_options(&eff) {
                Ok(o) => o,
                Err(msg) => {
                    eprintln!("{} {}", output::error_prefix(), msg);
                    std::process::exit(2);
                }
            };
            let text = match &eff.report {
                Some(rel) => {
                    let path = eff.repo_root.join(rel);
                    match fs::read_to_string(&path) {
                        Ok(s) => s,
                        Err(e) => {
                            eprintln!(
                                "{} {}",
                                output::error_prefix(),
                                format!("cannot read {}: {}", path.to_string_lossy(), e)
                            );
                            std::process::exit(2);
                        }
                    }
                }
                None => match std::io::read_to_string(std::io::stdin()) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!(
                            "{} {}",
                            output::error_prefix(),
                            format!("cannot read stdin: {}", e)
                        );
                        std::process::exit(2);
                    }
                },
            };
            let doc: ValidationDocument = match serde_json::from_str(&text) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!(
                        "{} {}",
                        output::error_prefix(),
                        format!("invalid validation document: {}", e)
                    );
                    std::process::exit(2);
                }
            };
            let rep = build_report(&doc, &opts);
            output::print_report(&rep, &eff.output);
            if !rep.overall_passed {
                std::process::exit(1);
            }
        }
        Commands::Check {
            repo_root,
            output,
            tiers,
            filter,
            hide_ignored,
            patterns,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                None,
                output.as_deref(),
                tiers,
                filter.as_deref(),
                if hide_ignored { Some(true) } else { None },
            );
            let opts = match build_options(&eff) {
                Ok(o) => o,
                Err(msg) => {
                    eprintln!("{} {}", output::error_prefix(), msg);
                    std::process::exit(2);
                }
            };
            let mut files: Vec<String> = Vec::new();
            for pat in &patterns {
                let full = eff.repo_root.join(pat);
                let matches = match glob::glob(&full.to_string_lossy()) {
                    Ok(m) => m,
                    Err(e) => {
                        eprintln!(
                            "{} {}",
                            output::error_prefix(),
                            format!("invalid pattern {}: {}", pat, e)
                        );
                        std::process::exit(2);
                    }
                };
                for entry in matches.flatten() {
                    if entry.is_file() {
                        files.push(entry.to_string_lossy().to_string());
                    }
                }
            }
            files.sort();
            files.dedup();
            if files.is_empty() {
                eprintln!(
                    "{} {}",
                    output::error_prefix(),
                    "no files matched the given patterns"
                );
                std::process::exit(2);
            }
            let outcomes: Vec<CheckOutcome> = files
                .par_iter()
                .map(|file| check_one(file, &opts))
                .collect();
            output::print_check(&outcomes, &eff.output);
            if outcomes.iter().any(|o| o.error.is_some()) {
                std::process::exit(2);
            }
            if outcomes.iter().any(|o| !o.passed) {
                std::process::exit(1);
            }
        }
    }
}

/// Turn resolved settings into `BuildOptions`, compiling the rule filter.
fn build_options(eff: &config::Effective) -> Result<BuildOptions, String> {
    let filter = match &eff.filter {
        Some(pat) => match regex::Regex::new(pat) {
            Ok(re) => Some(re),
            Err(e) => return Err(format!("invalid filter regex {}: {}", pat, e)),
        },
        None => None,
    };
    Ok(BuildOptions {
        total_tiers: eff.tiers,
        hide_ignored: eff.hide_ignored,
        filter,
    })
}

/// Render one file into a pass/fail outcome; IO and parse errors are captured.
fn check_one(file: &str, opts: &BuildOptions) -> CheckOutcome {
    let name = Path::new(file).to_string_lossy().to_string();
    let text = match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            return CheckOutcome {
                file: name,
                passed: false,
                counts: Counts::default(),
                error: Some(format!("read error: {}", e)),
            }
        }
    };
    let doc: ValidationDocument = match serde_json::from_str(&text) {
        Ok(d) => d,
        Err(e) => {
            return CheckOutcome {
                file: name,
                passed: false,
                counts: Counts::default(),
                error: Some(format!("parse error: {}", e)),
            }
        }
    };
    let rep = build_report(&doc, opts);
    CheckOutcome {
        file: name,
        passed: rep.overall_passed,
        counts: rep.totals,
        error: None,
    }
}
