// Tolerant JSON decoding for the device-status endpoint
//
// Some firmware versions emit structurally invalid JSON (stray commas).
// Decoding is strict-first: repairs run only after a strict parse has
// already failed, and the repair set is a short, ordered, test-pinned
// list of text transforms so it cannot silently grow in scope.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Longest body prefix embedded in a decode error message.
const ERROR_PREVIEW_CHARS: usize = 200;

static COMMA_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*,)+").expect("comma-run pattern"));
static LEADING_ARRAY_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*,").expect("leading-comma pattern"));

/// Remove a comma immediately preceding a closing `]` or `}`.
fn strip_comma_before_close(s: &str) -> String {
    s.replace(",]", "]").replace(",}", "}")
}

/// Collapse any run of two or more commas (whitespace between them allowed)
/// into a single comma.
fn collapse_comma_runs(s: &str) -> String {
    COMMA_RUN.replace_all(s, ",").into_owned()
}

/// Remove a comma immediately following an opening `[`.
fn strip_comma_after_open(s: &str) -> String {
    LEADING_ARRAY_COMMA.replace_all(s, "[").into_owned()
}

/// Apply the full repair pipeline, in order.
fn repair(s: &str) -> String {
    strip_comma_after_open(&collapse_comma_runs(&strip_comma_before_close(s)))
}

/// Strict-then-repair decoding of a telemetry body.
///
/// A strictly valid body is returned from the first pass untouched. On
/// failure the repaired body gets exactly one more strict attempt; if that
/// also fails, the error embeds at most the first 200 characters of the
/// repaired body so the output stays bounded while remaining diagnosable.
pub fn decode_tolerant<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let trimmed = body.trim();

    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Ok(value);
    }

    let repaired = repair(trimmed);
    serde_json::from_str::<T>(&repaired).map_err(|e| {
        let preview: String = repaired.chars().take(ERROR_PREVIEW_CHARS).collect();
        Error::Decode {
            message: format!("{e} (content starts with: {preview})"),
        }
    })
}
