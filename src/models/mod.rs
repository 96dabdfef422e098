//! Shared data models for report output and the input document module.

pub mod document;

use serde::Serialize;
use std::fmt;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
/// Effective severity of one rendered message.
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
        }
    }

    /// Capitalized label used as the description prefix, e.g. "Error: ...".
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Notice => "Notice",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
/// Per-tier (or overall) message tallies.
pub struct Counts {
    pub error: usize,
    pub warning: usize,
    pub notice: usize,
}

impl Counts {
    pub fn add(&mut self, sev: Severity) {
        match sev {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Notice => self.notice += 1,
        }
    }

    pub fn merge(&mut self, other: &Counts) {
        self.error += other.error;
        self.warning += other.warning;
        self.notice += other.notice;
    }

    pub fn total(&self) -> usize {
        self.error + self.warning + self.notice
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
/// Derived pass/fail state of one tier.
pub enum TierStatus {
    Passed,
    PassedWithWarnings,
    PassedWithNotices,
    Failed,
    NotRun,
}

impl TierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierStatus::Passed => "passed",
            TierStatus::PassedWithWarnings => "passed-with-warnings",
            TierStatus::PassedWithNotices => "passed-with-notices",
            TierStatus::Failed => "failed",
            TierStatus::NotRun => "not-run",
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(untagged)]
/// Identifier of a tier: a small integer for general tiers, or the
/// synthetic `"<guid>-<version>"` key for compatibility pseudo-tiers.
pub enum TierId {
    General(u32),
    Compat(String),
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierId::General(n) => write!(f, "{}", n),
            TierId::Compat(key) => f.write_str(key),
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
/// The (application, version) pair a compatibility pseudo-tier covers.
pub struct AppVersion {
    pub guid: String,
    pub version: String,
}

impl AppVersion {
    /// Synthetic tier key. The version string is kept verbatim so keys
    /// like `guid-6.*` and `guid-6.0a1` never collide.
    pub fn tier_key(&self) -> String {
        format!("{}-{}", self.guid, self.version)
    }

    /// Display name of the application, falling back to the raw GUID.
    pub fn app_name(&self) -> &str {
        app_display_name(&self.guid).unwrap_or(&self.guid)
    }
}

/// Known application GUIDs for tier titles.
pub fn app_display_name(guid: &str) -> Option<&'static str> {
    match guid {
        "{ec8030f7-c20a-464f-9b0e-13a3a9e97384}" => Some("Firefox"),
        "{3550f703-e582-4d05-9a08-453d09bdfdc6}" => Some("Thunderbird"),
        "{92650c4d-4b8e-4d2a-b7eb-24ecf4f6b63a}" => Some("SeaMonkey"),
        "{a23983c0-fd0e-11dc-95ff-0800200c9a66}" => Some("Firefox for Android"),
        _ => None,
    }
}

#[derive(Serialize, Clone, Debug)]
/// A dedented source-context line with its resolved line number.
pub struct ContextLine {
    pub number: u64,
    pub code: String,
}

#[derive(Serialize, Clone, Debug)]
/// Source context around a message, ready for display.
pub struct ContextBlock {
    pub lines: Vec<ContextLine>,
}

#[derive(Serialize, Clone, Debug)]
/// One message placement inside a tier, renderable without the source
/// document. `heading` and `description` arrive pre-sanitized from the
/// validator and are passed through untouched.
pub struct RenderedMessage {
    pub uid: String,
    pub severity: Severity,
    pub heading: String,
    pub description: Vec<String>,
    /// Dotted rule identifier; empty when the validator gave none.
    pub rule: String,
    pub file: Option<String>,
    pub line: Option<u64>,
    pub column: Option<u64>,
    pub context: Option<ContextBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_add_and_total() {
        let mut c = Counts::default();
        c.add(Severity::Error);
        c.add(Severity::Warning);
        c.add(Severity::Warning);
        c.add(Severity::Notice);
        assert_eq!((c.error, c.warning, c.notice), (1, 2, 1));
        assert_eq!(c.total(), 4);
    }

    #[test]
    fn test_tier_key_keeps_versions_distinct() {
        let a = AppVersion {
            guid: "G".into(),
            version: "6.*".into(),
        };
        let b = AppVersion {
            guid: "G".into(),
            version: "6.0a1".into(),
        };
        assert_ne!(a.tier_key(), b.tier_key());
        assert_eq!(a.tier_key(), "G-6.*");
    }

    #[test]
    fn test_app_display_name_fallback() {
        let av = AppVersion {
            guid: "{ec8030f7-c20a-464f-9b0e-13a3a9e97384}".into(),
            version: "6.*".into(),
        };
        assert_eq!(av.app_name(), "Firefox");
        let unknown = AppVersion {
            guid: "{dead-beef}".into(),
            version: "1".into(),
        };
        assert_eq!(unknown.app_name(), "{dead-beef}");
    }
}
