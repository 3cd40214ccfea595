//! Format selection for URI transmission.
//!
//! A compressed form is written in one of three shapes, told apart by the
//! first character:
//!
//! | Tag | Form | Body |
//! |-----|------|------|
//! | `~` | trie | optimized prefix trie in compact text, e.g. `~(measure~(1~'2s~2~'5k))` |
//! | `0` | array | `name~value~name~value`, literal `~` written as `%7E` |
//! | `1` | map | `<index><value>~<index><value>`, index as `z` or `-zz` |
//!
//! The map form is used whenever every key is an index. Otherwise both the
//! trie and the array are built and the one that is shorter after
//! percent-encoding wins.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::constants::{
    ESCAPED_SEPARATOR, EXTENDED_INDEX_MARKER, FIELD_SEPARATOR, MAX_MAP_INDEX, MAX_SHORT_INDEX, TAG_ARRAY,
    TAG_MAP,
};
use crate::encoder::{Compressed, CompressedForm};
use crate::numeric::to_base36;
use crate::{jsurl, trie};

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Pick the smallest URI form of `data` and return it with its format tag.
///
/// Returns an empty string when there was no input at all or nothing to
/// write.
pub fn compress_for_uri(data: &Compressed) -> String {
    let Some(form) = data.as_form() else {
        return String::new();
    };

    if is_index_map(form) {
        return format!("{TAG_MAP}{}", flatten_map(form));
    }

    let trie = trie::optimize(trie::build(form));
    let trie_text = jsurl::encode(&trie.to_value());

    let array = flatten_array(form);
    if array.is_empty() {
        return String::new();
    }

    let trie_len = uri_encoded_len(&trie_text);
    let array_len = uri_encoded_len(&array);
    tracing::trace!(trie_len, array_len, keys = form.len(), "selecting uri format");

    if trie_len < array_len {
        trie_text
    } else {
        format!("{TAG_ARRAY}{array}")
    }
}

/// Whether every key is a decimal index (and there is at least one)
fn is_index_map(form: &CompressedForm) -> bool {
    !form.is_empty()
        && form
            .keys()
            .all(|key| !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
}

/// Length of `s` after `encodeURIComponent`-style percent-encoding
pub fn uri_encoded_len(s: &str) -> usize {
    utf8_percent_encode(s, URI_COMPONENT).map(str::len).sum()
}

/// Flatten to `name~value~name~value`, escaping literal `~` as `%7E`
pub fn flatten_array(form: &CompressedForm) -> String {
    let sep = FIELD_SEPARATOR.to_string();
    form.iter()
        .map(|(name, value)| {
            format!(
                "{}{FIELD_SEPARATOR}{}",
                name.replace(FIELD_SEPARATOR, ESCAPED_SEPARATOR),
                value.to_string().replace(FIELD_SEPARATOR, ESCAPED_SEPARATOR)
            )
        })
        .collect::<Vec<_>>()
        .join(&sep)
}

/// Flatten index-keyed entries to `<index><value>` pairs joined by `~`.
///
/// Indexes up to 35 take one base-36 digit; 36 through 1331 take `-` plus two
/// digits holding `index - 36`. Larger indexes are dropped. Pairs are sorted
/// by their text.
pub fn flatten_map(form: &CompressedForm) -> String {
    let mut pairs: Vec<String> = form
        .iter()
        .filter_map(|(key, value)| {
            let index = match key.parse::<u32>() {
                Ok(index) if index <= MAX_MAP_INDEX => index,
                _ => {
                    tracing::debug!(key = key.as_str(), max = MAX_MAP_INDEX, "dropping map index beyond format ceiling");
                    return None;
                }
            };
            Some(format!("{}{value}", render_index(index)))
        })
        .collect();

    pairs.sort_unstable();
    pairs.join(&FIELD_SEPARATOR.to_string())
}

/// Text of a map index: `z` for 0..=35, `-zz` for 36..=1331
pub(crate) fn render_index(index: u32) -> String {
    if index <= MAX_SHORT_INDEX {
        to_base36(f64::from(index))
    } else {
        format!("{EXTENDED_INDEX_MARKER}{:0>2}", to_base36(f64::from(index - 36)))
    }
}
