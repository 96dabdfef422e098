//! Input schema for validator-service JSON documents.
//!
//! The validator endpoint returns `{error, validation}` where `validation`
//! is either a result object or the empty string when the validation task
//! crashed before producing one. Every optional message field defaults to
//! its identity element so a well-formed document never fails to load.

use serde::Deserialize;
use serde_json::{Map, Value as Json};

#[derive(Deserialize, Debug, Default)]
/// Top-level response from the validation service.
pub struct ValidationDocument {
    /// Fatal validator-process error text (a traceback), if any.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub validation: ValidationField,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
/// The `validation` field: a result block, or `""` when the task crashed.
pub enum ValidationField {
    Block(Box<ValidationBlock>),
    /// Empty string, null, or anything else that is not a result object.
    Other(Json),
}

impl Default for ValidationField {
    fn default() -> Self {
        ValidationField::Other(Json::Null)
    }
}

impl ValidationField {
    /// The result block, or `None` when validation never produced one.
    pub fn block(&self) -> Option<&ValidationBlock> {
        match self {
            ValidationField::Block(b) => Some(b),
            ValidationField::Other(_) => None,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
/// A completed validation run: totals, ending tier, and raw messages.
pub struct ValidationBlock {
    #[serde(default)]
    pub errors: Option<u64>,
    #[serde(default)]
    pub warnings: Option<u64>,
    #[serde(default)]
    pub notices: Option<u64>,
    /// Last tier the validator actually ran. Tiers above it were not run.
    #[serde(default)]
    pub ending_tier: Option<u32>,
    #[serde(default)]
    pub detected_type: Option<String>,
    #[serde(default)]
    pub messages: Vec<ValidationMessage>,
    /// Present only when the run carried compatibility checks.
    #[serde(default)]
    pub compatibility_summary: Option<CompatibilitySummary>,
    #[serde(default)]
    pub metadata: Json,
}

#[derive(Deserialize, Debug, Default, Clone)]
/// Compatibility-specific totals reported at the document level.
pub struct CompatibilitySummary {
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub warnings: u64,
    #[serde(default)]
    pub notices: u64,
}

fn default_tier() -> u32 {
    1
}

#[derive(Deserialize, Debug, Default, Clone)]
/// One raw finding as emitted by the validator.
pub struct ValidationMessage {
    /// Globally unique message id; duplicates are rendered once.
    #[serde(default)]
    pub uid: String,
    /// Raw severity: error|warning|notice.
    #[serde(default, rename = "type")]
    pub raw_type: Option<String>,
    /// Severity override for compatibility-specific findings.
    #[serde(default)]
    pub compatibility_type: Option<String>,
    #[serde(default = "default_tier")]
    pub tier: u32,
    /// Pre-sanitized HTML heading; passed through untouched.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub description: TextOrList,
    #[serde(default)]
    pub file: FileRef,
    /// 1-based; 0 or null mean unknown.
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default)]
    pub column: Option<u64>,
    /// Source lines around the finding; the message's own line is the
    /// middle element. Edge lines may be null.
    #[serde(default)]
    pub context: Option<Vec<Option<String>>>,
    /// App GUID -> affected version ranges. Insertion order is preserved.
    #[serde(default)]
    pub for_appversions: Option<Map<String, Json>>,
    /// Dotted rule identifier, e.g. ["testcases_scripting", "regex_tests"].
    #[serde(default)]
    pub id: Vec<String>,
    /// Marked ignored by a reviewer annotation.
    #[serde(default)]
    pub ignored: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
/// The validator emits `description` as a string or an array of strings.
pub enum TextOrList {
    Many(Vec<String>),
    One(String),
    Missing,
}

impl Default for TextOrList {
    fn default() -> Self {
        TextOrList::Missing
    }
}

impl TextOrList {
    /// Normalize to a list of paragraphs; empty strings are dropped.
    pub fn items(&self) -> Vec<String> {
        match self {
            TextOrList::Many(v) => v.iter().filter(|s| !s.is_empty()).cloned().collect(),
            TextOrList::One(s) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
/// A file path, or a nested-archive path such as
/// `["outer.xpi", "inner.jar", "file.js"]`.
pub enum FileRef {
    Path(String),
    Nested(Vec<Option<String>>),
    Missing,
}

impl Default for FileRef {
    fn default() -> Self {
        FileRef::Missing
    }
}
