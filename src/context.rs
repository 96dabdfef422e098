//! Presentation helpers for message locations: nested-archive path
//! joining and source-context dedentation.

use crate::models::{ContextBlock, ContextLine};

const TABSTOP: usize = 4;

/// Join nested-archive path segments into one display path, e.g.
/// `["outer.xpi", "inner.jar", "file.js"]` -> `outer.xpi/inner.jar/file.js`.
/// Null and empty segments are skipped and double slashes are collapsed.
pub fn join_paths(parts: &[Option<String>]) -> String {
    let mut joined = String::new();
    for part in parts.iter().flatten() {
        if part.is_empty() {
            continue;
        }
        let mut part = part.as_str();
        if !joined.is_empty() {
            joined.push('/');
            part = part.strip_prefix('/').unwrap_or(part);
        }
        joined.push_str(part);
    }
    joined
}

/// Expand leading tabs to spaces at fixed tab stops. Only the indent is
/// rewritten; the rest of the line is kept verbatim.
fn expand_leading_tabs(line: &str) -> String {
    let mut out = String::new();
    let mut pos = 0usize;
    for (i, ch) in line.char_indices() {
        match ch {
            ' ' => {
                out.push(' ');
                pos += 1;
            }
            '\t' => {
                let advance = TABSTOP - pos % TABSTOP;
                out.push_str(&" ".repeat(advance));
                pos += advance;
            }
            _ => {
                out.push_str(&line[i..]);
                break;
            }
        }
    }
    out
}

/// Retab all lines and trim the smallest common indentation. Null lines
/// (edge padding when the context sits at the start or end of a file)
/// are preserved as null.
pub fn dedent(lines: &[Option<String>]) -> Vec<Option<String>> {
    let expanded: Vec<Option<String>> = lines
        .iter()
        .map(|l| l.as_deref().map(expand_leading_tabs))
        .collect();
    let indent = expanded
        .iter()
        .flatten()
        .map(|s| s.len() - s.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);
    expanded
        .into_iter()
        .map(|l| l.map(|s| s[indent..].to_string()))
        .collect()
}

/// Build a displayable context block. The message's own line is the
/// middle element of the window, so surrounding lines are numbered
/// relative to `floor(len / 2)`.
pub fn context_block(lines: &[Option<String>], line: u64) -> ContextBlock {
    let offset = lines.len() as i64 / 2;
    let mut out = Vec::new();
    for (idx, code) in dedent(lines).into_iter().enumerate() {
        let Some(code) = code else { continue };
        let number = line as i64 + idx as i64 - offset;
        if number < 1 {
            // Guards malformed windows that reach above the first line.
            continue;
        }
        out.push(ContextLine {
            number: number as u64,
            code,
        });
    }
    ContextBlock { lines: out }
}
