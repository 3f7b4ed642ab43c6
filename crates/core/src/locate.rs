//! Locating the call expression that renders the marker.
//!
//! Everything here is plain byte scanning over an immutable buffer:
//! - a forward search for the marker,
//! - a backward search for the closest `<name>(` prefix,
//! - parenthesis-depth matching to find where the call ends,
//! - a bounded backward search for a `return` keyword.
//!
//! Parentheses inside string literals are counted like any other, so a
//! stray `(` or `)` inside a quoted argument throws the match off.

use serde::Serialize;

use crate::error::{PatchError, PatchResult};

const RETURN_KEYWORD: &[u8] = b"return";

/// Byte offsets derived from one scan of the source text.
///
/// Invariant: `call_start <= marker_pos < call_end`, and `return_start`,
/// when present, lies inside the lookback window before `call_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Located {
    pub marker_pos: usize,
    pub call_start: usize,
    /// One past the call's closing parenthesis.
    pub call_end: usize,
    pub return_start: Option<usize>,
}

/// Position of the first occurrence of `needle` in `haystack`.
///
/// An empty needle never matches.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Run the full locate pass: marker, enclosing call, its end, and `return`.
pub fn locate(
    text: &[u8],
    marker: &str,
    call_name: &str,
    return_lookback: usize,
) -> PatchResult<Located> {
    let marker_pos = find_bytes(text, marker.as_bytes())
        .ok_or_else(|| PatchError::MarkerNotFound(marker.to_string()))?;

    let prefix = call_prefix(call_name);
    let (call_start, call_end) = find_enclosing_call(text, prefix.as_bytes(), marker_pos)?;

    let return_start = find_return_start(text, call_start, return_lookback);
    tracing::debug!(marker_pos, call_start, call_end, ?return_start, "located call expression");

    Ok(Located { marker_pos, call_start, call_end, return_start })
}

/// The literal `<call_name>(` searched for before the marker.
pub fn call_prefix(call_name: &str) -> String {
    format!("{call_name}(")
}

/// Closest `prefix` occurrence at or before `from`, scanning backward.
pub fn find_prefix_before(text: &[u8], prefix: &[u8], from: usize) -> Option<usize> {
    let last = from.min(text.len());
    (0..=last).rev().find(|&i| text[i..].starts_with(prefix))
}

/// Find the closest call starting with `prefix` whose argument list covers
/// `marker_pos`. Returns `(call_start, call_end)`.
///
/// A candidate that closes before the marker is a sibling, not the enclosing
/// call, so the search moves further back.
pub fn find_enclosing_call(
    text: &[u8],
    prefix: &[u8],
    marker_pos: usize,
) -> PatchResult<(usize, usize)> {
    let not_found = || PatchError::CallPrefixNotFound(String::from_utf8_lossy(prefix).into());

    let mut from = marker_pos;
    loop {
        let call_start = find_prefix_before(text, prefix, from).ok_or_else(not_found)?;
        let call_end = find_call_end(text, call_start + prefix.len())
            .ok_or(PatchError::UnmatchedDelimiter { call_start })?;

        if call_end > marker_pos {
            return Ok((call_start, call_end));
        }
        tracing::debug!(call_start, call_end, "candidate call closes before marker; skipping");
        if call_start == 0 {
            return Err(not_found());
        }
        from = call_start - 1;
    }
}

/// Given the index just past an opening `(`, return one past its matching `)`.
pub fn find_call_end(text: &[u8], args_start: usize) -> Option<usize> {
    let mut depth: usize = 0;
    for (offset, &byte) in text.get(args_start..)?.iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' if depth == 0 => return Some(args_start + offset + 1),
            b')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Closest `return` keyword in the `lookback` bytes before `call_start`.
///
/// Matches `return ` literally, or a bare `return` followed by a byte that
/// cannot continue an identifier.
pub fn find_return_start(text: &[u8], call_start: usize, lookback: usize) -> Option<usize> {
    if call_start == 0 {
        return None;
    }
    let floor = call_start.saturating_sub(lookback);
    (floor..call_start).rev().find(|&i| is_return_at(text, i))
}

fn is_return_at(text: &[u8], i: usize) -> bool {
    let rest = &text[i..];
    if !rest.starts_with(RETURN_KEYWORD) {
        return false;
    }
    match rest.get(RETURN_KEYWORD.len()) {
        Some(&b' ') | None => true,
        Some(&next) => !is_identifier_byte(next),
    }
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
