//! Run-length codec for the per-name token lists.
//!
//! Tokens are joined with `.`; consecutive duplicates collapse to `value*`
//! (two copies) or `value*N` (N >= 3 copies). An empty token decodes back to
//! `"0"`, the zero delta the aggregator elides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{REPEAT_MARKER, RUN_SEPARATOR};

/// Most tokens a single run-length string may expand to when decoding
pub(crate) const MAX_DECODED_TOKENS: usize = 1 << 16;

/// A value token: the run-length-compressed timings of one name.
///
/// Tokens made only of decimal digits are carried as numbers so the compact
/// text form can drop the string quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Number(u64),
    Text(String),
}

impl Token {
    /// Token for an already-joined string, folding all-digit strings to numbers
    pub fn from_joined(joined: String) -> Self {
        if !joined.is_empty() && joined.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = joined.parse::<u64>() {
                return Self::Number(n);
            }
        }
        Self::Text(joined)
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for Token {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

/// Compress a list of tokens into one run-length token.
///
/// An empty list compresses to an empty text token. A result consisting only
/// of decimal digits comes back as [`Token::Number`].
pub fn compress_array<S: AsRef<str>>(entries: &[S]) -> Token {
    let mut result = String::new();
    let mut dupes = 0usize;

    for (i, entry) in entries.iter().enumerate() {
        let entry = entry.as_ref();
        let next_same = entries.get(i + 1).is_some_and(|next| next.as_ref() == entry);

        if next_same {
            dupes += 1;
            continue;
        }

        if !result.is_empty() {
            result.push(RUN_SEPARATOR);
        }
        result.push_str(entry);

        if dupes > 0 {
            result.push(REPEAT_MARKER);
            if dupes >= 2 {
                result.push_str(&(dupes + 1).to_string());
            }
            dupes = 0;
        }
    }

    Token::from_joined(result)
}

/// Expand a run-length token back into its list of tokens.
///
/// `v*` yields two copies and `v*N` yields N copies; a count that is not a
/// number yields none. Empty values come back as `"0"`. Output stops after
/// 65536 tokens in total.
pub fn decompress_array(data: &str) -> Vec<String> {
    let mut values = Vec::new();

    for segment in data.split(RUN_SEPARATOR) {
        let mut parts = segment.split(REPEAT_MARKER);
        let value = parts.next().unwrap_or_default();
        let value = if value.is_empty() { "0" } else { value };

        let repeats = match parts.next() {
            None => 1,
            Some("") => 2,
            Some(count) => count.parse::<usize>().unwrap_or(0),
        };

        let room = MAX_DECODED_TOKENS - values.len();
        if repeats > room {
            tracing::debug!(segment, repeats, max = MAX_DECODED_TOKENS, "truncating oversized token list");
            values.extend(std::iter::repeat(value.to_string()).take(room));
            break;
        }

        values.extend(std::iter::repeat(value.to_string()).take(repeats));
    }

    values
}
