//! Replacing the located call with a neutral equivalent.

use std::ops::Range;

use serde::Serialize;

use crate::locate::Located;

/// Bytes of surrounding text shown on each side of the call in excerpts.
pub const CONTEXT_RADIUS: usize = 50;

/// Which replacement was chosen for the located call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpliceKind {
    /// `return ...call(...);` became `return;`.
    ReturnConsumingSemicolon,
    /// `return ...call(...)` became `return;`.
    Return,
    /// No `return` nearby; the call itself became `null`.
    Null,
}

impl SpliceKind {
    pub fn replacement(self) -> &'static str {
        match self {
            SpliceKind::ReturnConsumingSemicolon | SpliceKind::Return => "return;",
            SpliceKind::Null => "null",
        }
    }
}

/// A single contiguous replacement: `range` of the original becomes
/// `kind.replacement()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Splice {
    pub kind: SpliceKind,
    pub range: Range<usize>,
}

impl Splice {
    pub fn replacement(&self) -> &'static str {
        self.kind.replacement()
    }
}

/// Choose the replacement for a located call.
pub fn plan(text: &[u8], located: &Located) -> Splice {
    match located.return_start {
        Some(return_start) if text.get(located.call_end) == Some(&b';') => Splice {
            kind: SpliceKind::ReturnConsumingSemicolon,
            range: return_start..located.call_end + 1,
        },
        Some(return_start) => {
            Splice { kind: SpliceKind::Return, range: return_start..located.call_end }
        }
        None => Splice { kind: SpliceKind::Null, range: located.call_start..located.call_end },
    }
}

/// Build a new buffer with the splice applied; `text` is left untouched.
pub fn apply(text: &[u8], splice: &Splice) -> Vec<u8> {
    let replacement = splice.replacement().as_bytes();
    let mut out = Vec::with_capacity(text.len() - splice.range.len() + replacement.len());
    out.extend_from_slice(&text[..splice.range.start]);
    out.extend_from_slice(replacement);
    out.extend_from_slice(&text[splice.range.end..]);
    out
}

/// Byte range shown around the call, before and after splicing.
pub fn context_range(text_len: usize, located: &Located) -> Range<usize> {
    let start =
        located.return_start.unwrap_or_else(|| located.call_start.saturating_sub(CONTEXT_RADIUS));
    let end = (located.call_end + CONTEXT_RADIUS).min(text_len);
    start..end
}

/// Lossily decoded excerpt of `text` over `range`, clamped to its length.
pub fn excerpt(text: &[u8], range: &Range<usize>) -> String {
    let end = range.end.min(text.len());
    let start = range.start.min(end);
    String::from_utf8_lossy(&text[start..end]).into_owned()
}
