//! Message severity classification.
//!
//! A message's effective severity depends on where it is placed: inside a
//! compatibility context the `compatibility_type` override wins, otherwise
//! the raw `type` stands. The same message can therefore carry different
//! severities across placements, so classification is re-run per placement
//! and never cached on the message.

use crate::models::document::ValidationMessage;
use crate::models::Severity;

/// Parse a raw severity string. Empty strings count as absent.
pub fn parse_severity(raw: Option<&str>) -> Option<Severity> {
    match raw {
        Some("error") => Some(Severity::Error),
        Some("warning") => Some(Severity::Warning),
        Some("notice") => Some(Severity::Notice),
        _ => None,
    }
}

/// Stable-sort rank over the raw message type: errors first, then
/// warnings, then notices, then anything unrecognized or absent.
pub fn sort_rank(msg: &ValidationMessage) -> u8 {
    match parse_severity(msg.raw_type.as_deref()) {
        Some(Severity::Error) => 0,
        Some(Severity::Warning) => 1,
        Some(Severity::Notice) => 2,
        None => 3,
    }
}

/// Effective severity of one placement.
///
/// In a compatibility context a non-empty `compatibility_type` overrides
/// the raw `type`. Unrecognized severities are coerced to `notice` so
/// tallying never fails.
pub fn effective_severity(msg: &ValidationMessage, compat_context: bool) -> Severity {
    let raw = if compat_context {
        msg.compatibility_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(msg.raw_type.as_deref())
    } else {
        msg.raw_type.as_deref()
    };
    parse_severity(raw).unwrap_or(Severity::Notice)
}
