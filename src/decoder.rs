//! Decompression of tagged URI strings back into timing entries.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DURATION_MARKER, ESCAPED_SEPARATOR, EXTENDED_INDEX_MARKER, FIELD_SEPARATOR, LEGACY_OCCURRENCE_SEPARATOR,
    TAG_ARRAY, TAG_JSON, TAG_JSURL, TAG_MAP, TAG_URI_JSON, TERMINAL_EDGE,
};
use crate::entry::{EntryKind, TimingEntry};
use crate::error::ParseError;
use crate::numeric::parse_base36_prefix;
use crate::rle::decompress_array;
use crate::jsurl;
use crate::value::Value;

/// Options accepted by the decompression side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompressOptions {
    /// The name to index map the data was compressed with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<IndexMap<String, u32>>,
}

impl DecompressOptions {
    #[must_use]
    pub fn with_map(mut self, map: IndexMap<String, u32>) -> Self {
        self.map = Some(map);
        self
    }
}

/// Decompress a tagged string produced by [`compress_for_uri`](crate::compress_for_uri).
///
/// The first character selects the form: `~`, `{` or `(` for a trie, `0` for
/// the flat array and `1` for the index map. Unknown tags and malformed JSON
/// tries yield no entries. Entries come back sorted by start time, then by
/// duration.
///
/// # Errors
/// Returns a [`ParseError`] when a `~` trie is not valid compact text.
pub fn decompress_from_string(data: &str, options: &DecompressOptions) -> Result<Vec<TimingEntry>, ParseError> {
    let Some(tag) = data.chars().next() else {
        return Ok(Vec::new());
    };
    let body = &data[tag.len_utf8()..];

    let mut entries = match tag {
        TAG_JSURL | TAG_JSON | TAG_URI_JSON => decompress_uri_trie(data)?,
        TAG_ARRAY => decompress_uri_array(body),
        TAG_MAP => decompress_uri_map(body, options.map.as_ref()),
        _ => {
            tracing::debug!(%tag, "unknown compression format tag");
            Vec::new()
        }
    };

    sort_entries(&mut entries);
    Ok(entries)
}

/// Sort entries by start time, breaking ties by duration
pub fn sort_entries(entries: &mut [TimingEntry]) {
    entries.sort_by(|a, b| {
        a.start_time
            .total_cmp(&b.start_time)
            .then_with(|| a.duration.total_cmp(&b.duration))
    });
}

/// Decompress a trie in compact text (`~`), JSON (`{`) or URI-friendly
/// JSON (`(`) form.
///
/// # Errors
/// Returns a [`ParseError`] when compact text is malformed. Malformed JSON is
/// not an error and yields no entries.
pub fn decompress_uri_trie(data: &str) -> Result<Vec<TimingEntry>, ParseError> {
    let trie = match data.chars().next() {
        Some(TAG_JSURL) => jsurl::decode(data)?,
        Some(TAG_JSON) => match parse_json(data) {
            Some(value) => value,
            None => return Ok(Vec::new()),
        },
        Some(TAG_URI_JSON) => {
            let json: String = data
                .chars()
                .map(|ch| match ch {
                    '(' => '{',
                    ')' => '}',
                    '~' => ':',
                    '-' => ',',
                    '\'' => '"',
                    other => other,
                })
                .collect();
            match parse_json(&json) {
                Some(value) => value,
                None => return Ok(Vec::new()),
            }
        }
        _ => return Ok(Vec::new()),
    };

    Ok(decompress_trie(&trie, ""))
}

fn parse_json(data: &str) -> Option<Value> {
    match serde_json::from_str::<serde_json::Value>(data) {
        Ok(json) => Some(Value::from(json)),
        Err(err) => {
            tracing::debug!(error = %err, "discarding malformed json trie");
            None
        }
    }
}

/// Walk a parsed trie, expanding every leaf under its accumulated name.
///
/// Names are joined from the edge keys as UTF-16 units and only become text
/// at a leaf, so a character split across two edges is put back together. A
/// trailing `!` on a name marks a key that is also a prefix of other keys and
/// is dropped. String leaves may hold several `|`-separated value tokens for
/// the same name.
pub fn decompress_trie(node: &Value, prefix: &str) -> Vec<TimingEntry> {
    let prefix: Vec<u16> = prefix.encode_utf16().collect();
    let mut entries = Vec::new();
    walk_trie(node, &prefix, &mut entries);
    entries
}

fn walk_trie(node: &Value, prefix: &[u16], entries: &mut Vec<TimingEntry>) {
    let Value::Object(members) = node else {
        return;
    };

    for (key, child) in members {
        let mut name = Vec::with_capacity(prefix.len() + key.units().len());
        name.extend_from_slice(prefix);
        name.extend_from_slice(key.units());
        if name.last() == Some(&TERMINAL_EDGE) {
            name.pop();
        }

        match child {
            Value::Object(_) => walk_trie(child, &name, entries),
            Value::String(_) | Value::Number(_) => {
                let name = String::from_utf16_lossy(&name);
                if let Some(text) = child.leaf_text() {
                    for timings in text.split(LEGACY_OCCURRENCE_SEPARATOR) {
                        entries.extend(expand(&name, timings));
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Array(_) => {}
        }
    }
}

/// Decompress the flat `name~value~name~value` form (tag already stripped).
///
/// A trailing name without a value is ignored.
pub fn decompress_uri_array(data: &str) -> Vec<TimingEntry> {
    let parts: Vec<&str> = data.split(FIELD_SEPARATOR).collect();
    parts
        .chunks(2)
        .filter_map(|pair| match pair {
            [name, value] => Some(expand(name, value)),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Decompress the index-map form (tag already stripped).
///
/// Without a map the body is read as the flat array form. Indexes with no
/// matching name are skipped.
pub fn decompress_uri_map(data: &str, map: Option<&IndexMap<String, u32>>) -> Vec<TimingEntry> {
    let Some(map) = map else {
        return decompress_uri_array(data);
    };

    let mut names: HashMap<u32, &str> = HashMap::with_capacity(map.len());
    for (name, &index) in map {
        names.entry(index).or_insert(name.as_str());
    }

    let mut entries = Vec::new();
    for line in data.split(FIELD_SEPARATOR) {
        let Some((index, value)) = split_map_line(line) else {
            if !line.is_empty() {
                tracing::debug!(line, "unreadable map index");
            }
            continue;
        };

        match names.get(&index) {
            Some(name) => entries.extend(expand(name, value)),
            None => tracing::debug!(index, "map index has no name"),
        }
    }
    entries
}

/// Split a map-form line into its index and value token
fn split_map_line(line: &str) -> Option<(u32, &str)> {
    if let Some(rest) = line.strip_prefix(EXTENDED_INDEX_MARKER) {
        let digits = rest.get(..2)?;
        if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        let index = u32::from_str_radix(digits, 36).ok()?;
        Some((36 + index, &rest[2..]))
    } else {
        let first = line.chars().next()?;
        let index = first.to_digit(36)?;
        Some((index, &line[first.len_utf8()..]))
    }
}

/// Expand one name and its value token into entries.
///
/// `%7E` in the name becomes `~`. Each token holds a base-36 offset from the
/// previous entry's start time and, for measures, `_` plus a base-36
/// duration; either number may be empty, meaning 0.
pub fn expand(name: &str, value: &str) -> Vec<TimingEntry> {
    let name = name.replace(ESCAPED_SEPARATOR, &FIELD_SEPARATOR.to_string());
    let mut latest_time = 0i64;

    decompress_array(value)
        .into_iter()
        .map(|token| {
            let (offset, duration) = match token.split_once(DURATION_MARKER) {
                Some((offset, duration)) => (offset, Some(duration)),
                None => (token.as_str(), None),
            };
            latest_time = latest_time.saturating_add(parse_base36_prefix(offset));

            TimingEntry {
                name: name.clone(),
                kind: if duration.is_some() { EntryKind::Measure } else { EntryKind::Mark },
                start_time: latest_time as f64,
                duration: duration.map_or(0.0, |d| parse_base36_prefix(d) as f64),
            }
        })
        .collect()
}
