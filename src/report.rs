//! Report building: stable message ordering, uid dedup, tier grouping,
//! and the overall pass/fail verdict.
//!
//! `build_report` is pure and synchronous: one input document in, one
//! `Report` out, with no shared state across invocations. Malformed input
//! never raises; the only fallback is the synthetic tier-1 error produced
//! when the validator process itself crashed.

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;
use serde_json::Value as Json;

use crate::classify::{effective_severity, sort_rank};
use crate::context;
use crate::models::document::{
    FileRef, TextOrList, ValidationBlock, ValidationDocument, ValidationMessage,
};
use crate::models::{AppVersion, Counts, RenderedMessage, Severity};
use crate::tier::Tier;

#[derive(Debug, Default)]
/// Build-time knobs resolved from CLI flags and config.
pub struct BuildOptions {
    /// Force at least this many general tiers in the output. The suite
    /// layout historically showed five; by default the count is derived
    /// from `ending_tier` and the messages themselves.
    pub total_tiers: Option<u32>,
    /// Drop messages annotated as ignored by a reviewer.
    pub hide_ignored: bool,
    /// Keep only messages whose dotted rule id matches.
    pub filter: Option<Regex>,
}

#[derive(Debug)]
/// Final rendered report: ordered tiers plus the overall verdict.
pub struct Report {
    /// General tiers in ascending numeric order, then compatibility
    /// pseudo-tiers in first-encounter order.
    pub tiers: Vec<Tier>,
    /// Tallies across all run tiers. A message expanded into several
    /// pseudo-tiers contributes once per placement.
    pub totals: Counts,
    pub overall_passed: bool,
}

impl Report {
    pub fn verdict_text(&self) -> &'static str {
        if self.overall_passed {
            "Add-on passed validation."
        } else {
            "Add-on failed validation."
        }
    }
}

/// Build a report from a raw validator response.
///
/// A non-null `error` or an empty `validation` field means the validator
/// crashed before producing results; both degrade to a single synthetic
/// tier-1 error so the output is never blank.
pub fn build_report(doc: &ValidationDocument, opts: &BuildOptions) -> Report {
    match (doc.error.as_ref(), doc.validation.block()) {
        (None, Some(block)) => build_from_block(block, opts),
        _ => build_from_block(&crash_block(), opts),
    }
}

/// Report shown when the validation document could not be fetched at all.
pub fn transport_error_report(opts: &BuildOptions) -> Report {
    build_from_block(&synthetic_block("Internal server error"), opts)
}

fn crash_block() -> ValidationBlock {
    synthetic_block("Validation task could not complete or completed with errors")
}

fn synthetic_block(description: &str) -> ValidationBlock {
    ValidationBlock {
        ending_tier: Some(1),
        messages: vec![ValidationMessage {
            uid: "__global_error__".to_string(),
            raw_type: Some("error".to_string()),
            tier: 1,
            message: "Error".to_string(),
            description: TextOrList::Many(vec![description.to_string()]),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn build_from_block(block: &ValidationBlock, opts: &BuildOptions) -> Report {
    let compat_signal = block.compatibility_summary.is_some();
    let ending = block.ending_tier.unwrap_or(0);
    let tier_was_run = |n: u32| ending == 0 || n <= ending;

    // Stable severity ordering: errors, warnings, notices, untyped; ties
    // keep the source order.
    let mut order: Vec<&ValidationMessage> = block.messages.iter().collect();
    order.sort_by_key(|m| sort_rank(m));

    let mut numeric: BTreeMap<u32, Tier> = BTreeMap::new();
    let mut compat: Vec<Tier> = Vec::new();
    let mut compat_slot: HashMap<String, usize> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for msg in order {
        // First occurrence of a uid wins, even when a later filter leaves
        // it with zero placements. Messages without a uid are exempt.
        if !msg.uid.is_empty() && !seen.insert(msg.uid.as_str()) {
            continue;
        }
        if opts.hide_ignored && msg.ignored {
            continue;
        }
        if let Some(re) = &opts.filter {
            if !re.is_match(&msg.id.join(".")) {
                continue;
            }
        }

        let appversions = msg.for_appversions.as_ref().filter(|m| !m.is_empty());
        let compat_placement =
            appversions.is_some() && !(compat_signal && msg.compatibility_type.is_none());
        if compat_placement {
            // One placement per listed (guid, version) pair; the message
            // is never broadcast beyond the versions it enumerates.
            let sev = effective_severity(msg, true);
            for (guid, versions) in appversions.into_iter().flatten() {
                for version in version_list(versions) {
                    let app = AppVersion {
                        guid: guid.clone(),
                        version: version.to_string(),
                    };
                    let slot = *compat_slot.entry(app.tier_key()).or_insert_with(|| {
                        compat.push(Tier::compat(app));
                        compat.len() - 1
                    });
                    compat[slot].push(render_message(msg, sev));
                }
            }
        } else {
            let sev = effective_severity(msg, compat_signal);
            if compat_signal
                && appversions.is_none()
                && msg.compatibility_type.is_none()
                && sev != Severity::Error
            {
                // Compatibility runs ignore plain warnings and notices.
                continue;
            }
            let id = msg.tier.max(1);
            let tier = numeric
                .entry(id)
                .or_insert_with(|| Tier::general(id, tier_was_run(id)));
            tier.push(render_message(msg, sev));
        }
    }

    // The full sequence 1..=total is always present: empty reached tiers
    // render as passed, tiers past ending_tier as not run.
    let highest = numeric.keys().next_back().copied().unwrap_or(0);
    let total = highest.max(ending).max(opts.total_tiers.unwrap_or(0)).max(1);
    for n in 1..=total {
        numeric
            .entry(n)
            .or_insert_with(|| Tier::general(n, tier_was_run(n)));
    }

    let mut totals = Counts::default();
    for tier in numeric.values().chain(compat.iter()) {
        if tier.tests_were_run {
            totals.merge(&tier.counts);
        }
    }
    let overall_passed = match block.errors {
        Some(n) => n == 0,
        None => totals.error == 0,
    };

    let mut tiers: Vec<Tier> = numeric.into_values().collect();
    tiers.extend(compat);
    Report {
        tiers,
        totals,
        overall_passed,
    }
}

fn version_list(value: &Json) -> Vec<&str> {
    match value {
        Json::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .collect(),
        Json::String(s) if !s.is_empty() => vec![s.as_str()],
        _ => Vec::new(),
    }
}

fn render_message(msg: &ValidationMessage, severity: Severity) -> RenderedMessage {
    let file = match &msg.file {
        FileRef::Path(p) if !p.is_empty() => Some(p.clone()),
        FileRef::Nested(parts) => {
            let joined = context::join_paths(parts);
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    };
    let line = msg.line.filter(|&n| n > 0);
    let column = msg.column.filter(|&n| n > 0);
    let ctx = match (&msg.context, line) {
        (Some(lines), Some(ln)) if !lines.is_empty() => Some(context::context_block(lines, ln)),
        _ => None,
    };
    RenderedMessage {
        uid: msg.uid.clone(),
        severity,
        heading: msg.message.clone(),
        description: msg.description.items(),
        rule: msg.id.join("."),
        file,
        line,
        column,
        context: ctx,
    }
}
