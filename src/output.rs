//! Output rendering for the `render` and `check` commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries
//! per-tier fields plus a top-level summary and is composed by pure
//! functions so tests can snapshot it.

use crate::models::{Counts, Severity, TierStatus};
use crate::report::Report;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal CLI errors printed to stderr.
pub fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Prefix for friendly notes printed to stderr.
pub fn note_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}

fn severity_tag(sev: Severity, color: bool) -> String {
    match sev {
        Severity::Error => {
            if color {
                "⟦error⟧".red().bold().to_string()
            } else {
                "⟦error⟧".to_string()
            }
        }
        Severity::Warning => {
            if color {
                "⟦warn⟧".yellow().bold().to_string()
            } else {
                "⟦warn⟧".to_string()
            }
        }
        Severity::Notice => {
            if color {
                "⟦notice⟧".blue().bold().to_string()
            } else {
                "⟦notice⟧".to_string()
            }
        }
    }
}

fn severity_icon(sev: Severity, color: bool) -> String {
    let icon = match sev {
        Severity::Error => "✖",
        Severity::Warning => "▲",
        Severity::Notice => "◆",
    };
    if color {
        match sev {
            Severity::Error => icon.red().to_string(),
            Severity::Warning => icon.yellow().to_string(),
            Severity::Notice => icon.blue().to_string(),
        }
    } else {
        icon.to_string()
    }
}

fn status_line(title: &str, status: TierStatus, summary: &str, color: bool) -> String {
    let line = format!("{} — {}", title, summary);
    if !color {
        return line;
    }
    match status {
        TierStatus::Failed => line.red().bold().to_string(),
        TierStatus::PassedWithWarnings => line.yellow().bold().to_string(),
        TierStatus::PassedWithNotices => line.blue().bold().to_string(),
        TierStatus::Passed => line.green().bold().to_string(),
        TierStatus::NotRun => line.bright_black().to_string(),
    }
}

/// Print a full report in the requested format.
pub fn print_report(report: &Report, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for tier in &report.tiers {
                println!(
                    "{}",
                    status_line(&tier.title(), tier.status(), &tier.summary_text(), color)
                );
                for msg in &tier.messages {
                    let rule = if msg.rule.is_empty() {
                        String::new()
                    } else {
                        format!(" ❲{}❳", msg.rule)
                    };
                    println!(
                        "  {} {} {}{}",
                        severity_icon(msg.severity, color),
                        severity_tag(msg.severity, color),
                        msg.heading,
                        rule
                    );
                    for (i, para) in msg.description.iter().enumerate() {
                        if i == 0 {
                            println!("    {}: {}", msg.severity.label(), para);
                        } else {
                            println!("    {}", para);
                        }
                    }
                    if let Some(file) = &msg.file {
                        match (msg.line, msg.column) {
                            (Some(l), Some(c)) => {
                                println!("    at {} line {} column {}", file, l, c)
                            }
                            (Some(l), None) => println!("    at {} line {}", file, l),
                            _ => println!("    at {}", file),
                        }
                    }
                    if let Some(ctx) = &msg.context {
                        for cl in &ctx.lines {
                            println!("      {:>5} | {}", cl.number, cl.code);
                        }
                    }
                }
            }
            let summary = format!(
                "{} — errors={} warnings={} notices={}",
                report.verdict_text(),
                report.totals.error,
                report.totals.warning,
                report.totals.notice
            );
            if color {
                if report.overall_passed {
                    println!("{}", summary.green().bold());
                } else {
                    println!("{}", summary.red().bold());
                }
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Outcome of checking one report file.
pub struct CheckOutcome {
    pub file: String,
    pub passed: bool,
    pub counts: Counts,
    /// Load/parse failure; such files always count as failed.
    pub error: Option<String>,
}

/// Print per-file pass/fail lines for the `check` command.
pub fn print_check(outcomes: &[CheckOutcome], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_check_json(outcomes)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for oc in outcomes {
                if let Some(err) = &oc.error {
                    if color {
                        println!(
                            "{} {} — {}",
                            "✖ unreadable:".red().bold(),
                            oc.file.bold(),
                            err
                        );
                    } else {
                        println!("✖ unreadable: {} — {}", oc.file, err);
                    }
                } else if oc.passed {
                    if color {
                        println!("{} {}", "✔ passed:".green().bold(), oc.file.bold());
                    } else {
                        println!("✔ passed: {}", oc.file);
                    }
                } else if color {
                    println!(
                        "{} {} ({} errors, {} warnings)",
                        "✖ failed:".red().bold(),
                        oc.file.bold(),
                        oc.counts.error,
                        oc.counts.warning
                    );
                } else {
                    println!(
                        "✖ failed: {} ({} errors, {} warnings)",
                        oc.file, oc.counts.error, oc.counts.warning
                    );
                }
            }
            let failed = outcomes.iter().filter(|o| !o.passed).count();
            let summary = format!(
                "— Summary — passed={} failed={} total={}",
                outcomes.len() - failed,
                failed,
                outcomes.len()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    let tiers: Vec<JsonVal> = report
        .tiers
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "title": t.title(),
                "status": t.status(),
                "tests_were_run": t.tests_were_run,
                "counts": t.counts,
                "summary": t.summary_text(),
                "messages": t.messages,
            })
        })
        .collect();
    json!({
        "tiers": tiers,
        "summary": {
            "errors": report.totals.error,
            "warnings": report.totals.warning,
            "notices": report.totals.notice,
            "passed": report.overall_passed,
        }
    })
}

/// Compose the check JSON object (pure) for testing/snapshot purposes.
pub fn compose_check_json(outcomes: &[CheckOutcome]) -> JsonVal {
    let items: Vec<JsonVal> = outcomes
        .iter()
        .map(|oc| {
            json!({
                "file": oc.file,
                "passed": oc.passed,
                "errors": oc.counts.error,
                "warnings": oc.counts.warning,
                "notices": oc.counts.notice,
                "error": oc.error,
            })
        })
        .collect();
    let failed = outcomes.iter().filter(|o| !o.passed).count();
    json!({
        "results": items,
        "summary": {
            "passed": outcomes.len() - failed,
            "failed": failed,
            "total": outcomes.len(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_report, BuildOptions};
    use serde_json::json;

    #[test]
    fn test_compose_report_json_shape() {
        let doc = serde_json::from_value(json!({
            "validation": {
                "errors": 1, "ending_tier": 2,
                "messages": [{"uid": "a", "type": "error", "tier": 1, "message": "boom"}]
            }
        }))
        .unwrap();
        let report = build_report(&doc, &BuildOptions::default());
        let out = compose_report_json(&report);
        assert_eq!(out["summary"]["passed"], false);
        assert_eq!(out["summary"]["errors"], 1);
        assert_eq!(out["tiers"][0]["id"], 1);
        assert_eq!(out["tiers"][0]["status"], "failed");
        assert_eq!(out["tiers"][0]["messages"][0]["uid"], "a");
        assert_eq!(out["tiers"][1]["status"], "passed");
    }

    #[test]
    fn test_compose_report_json_compat_tier_id_is_string() {
        let doc = serde_json::from_value(json!({
            "validation": {
                "errors": 0, "ending_tier": 1,
                "messages": [{
                    "uid": "a", "type": "warning", "compatibility_type": "error",
                    "tier": 1, "for_appversions": {"G": ["6.*"]}
                }]
            }
        }))
        .unwrap();
        let report = build_report(&doc, &BuildOptions::default());
        let out = compose_report_json(&report);
        assert_eq!(out["tiers"][1]["id"], "G-6.*");
        assert_eq!(out["tiers"][1]["counts"]["error"], 1);
        assert_eq!(out["tiers"][1]["title"], "G 6.* Tests");
    }

    #[test]
    fn test_compose_check_json_shape() {
        let outcomes = vec![
            CheckOutcome {
                file: "a.json".into(),
                passed: true,
                counts: Counts::default(),
                error: None,
            },
            CheckOutcome {
                file: "b.json".into(),
                passed: false,
                counts: Counts {
                    error: 2,
                    warning: 0,
                    notice: 0,
                },
                error: None,
            },
        ];
        let out = compose_check_json(&outcomes);
        assert_eq!(out["summary"]["passed"], 1);
        assert_eq!(out["summary"]["failed"], 1);
        assert_eq!(out["results"][1]["errors"], 2);
    }
}
