use regex::bytes::{NoExpand, Regex};

use crate::error::{EditError, Result};
use crate::types::Mode;

const CLOSING_TAG: &[u8] = b"?>";
const NEWLINE: &[u8] = b"\n";

/// Produces the new file content for `mode`, leaving `text` untouched.
///
/// Works on raw bytes so files in any ASCII-compatible encoding pass through
/// unchanged outside the insertion point.
///
/// # Arguments
///
/// * `text` - The current file content.
/// * `mode` - Which transform to apply.
/// * `wrapped` - The snippet, already wrapped in its markers if any.
/// * `anchor` - The compiled `--pattern`, required by after/before/replace.
///
pub fn insert_snippet(
    text: &[u8],
    mode: Mode,
    wrapped: &[u8],
    anchor: Option<&Regex>,
) -> Result<Vec<u8>> {
    match mode {
        Mode::Append => Ok(append(text, wrapped)),
        Mode::Prepend => Ok([wrapped, NEWLINE, text].concat()),
        Mode::After => {
            let pos = first_match(text, mode, anchor)?.end();
            Ok([&text[..pos], NEWLINE, wrapped, &text[pos..]].concat())
        }
        Mode::Before => {
            let pos = first_match(text, mode, anchor)?.start();
            Ok([&text[..pos], wrapped, NEWLINE, &text[pos..]].concat())
        }
        Mode::Replace => {
            let anchor = require_anchor(mode, anchor)?;
            if !anchor.is_match(text) {
                return Err(EditError::PatternNotFound(anchor.as_str().to_string()));
            }
            // NoExpand: `$var` in a snippet is text, not a capture reference.
            Ok(anchor.replacen(text, 1, NoExpand(wrapped)).into_owned())
        }
    }
}

fn append(text: &[u8], wrapped: &[u8]) -> Vec<u8> {
    match text.strip_suffix(CLOSING_TAG) {
        Some(body) => [body, NEWLINE, wrapped, NEWLINE, CLOSING_TAG].concat(),
        None => [text, NEWLINE, wrapped, NEWLINE].concat(),
    }
}

fn require_anchor(mode: Mode, anchor: Option<&Regex>) -> Result<&Regex> {
    anchor.ok_or(EditError::MissingPattern(mode.as_str()))
}

fn first_match<'t>(
    text: &'t [u8],
    mode: Mode,
    anchor: Option<&Regex>,
) -> Result<regex::bytes::Match<'t>> {
    let anchor = require_anchor(mode, anchor)?;
    anchor
        .find(text)
        .ok_or_else(|| EditError::PatternNotFound(anchor.as_str().to_string()))
}
