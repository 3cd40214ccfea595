//! Internal constants and helper functions for utcompress encoding.

/// Format tag for the flat `name~value` array form
pub(crate) const TAG_ARRAY: char = '0';

/// Format tag for the flat index-map form
pub(crate) const TAG_MAP: char = '1';

/// Leading character of the compact-text trie form (self-describing, no extra tag)
pub(crate) const TAG_JSURL: char = '~';

/// Leading character of a plain JSON trie
pub(crate) const TAG_JSON: char = '{';

/// Leading character of a punctuation-swapped JSON trie
pub(crate) const TAG_URI_JSON: char = '(';

/// Trie edge (`!`) that holds the value of a key which is also a prefix of
/// longer keys
pub(crate) const TERMINAL_EDGE: u16 = 0x21;

/// Separator between names, values and flat-form entries
pub(crate) const FIELD_SEPARATOR: char = '~';

/// Escaped form of a literal `~` inside flat-form names and values
pub(crate) const ESCAPED_SEPARATOR: &str = "%7E";

/// Separator between distinct run-length segments
pub(crate) const RUN_SEPARATOR: char = '.';

/// Repeat marker inside a run-length segment
pub(crate) const REPEAT_MARKER: char = '*';

/// Prefix of a measure's duration inside a value token
pub(crate) const DURATION_MARKER: char = '_';

/// Separator for multiple occurrences inside a legacy trie string leaf
pub(crate) const LEGACY_OCCURRENCE_SEPARATOR: char = '|';

/// Largest map index that fits in a single base-36 digit ("z")
pub(crate) const MAX_SHORT_INDEX: u32 = 35;

/// Largest map index the map form can carry ("-zz" = 36 + 1295)
pub(crate) const MAX_MAP_INDEX: u32 = 1331;

/// Prefix of a two-digit (extended) map index
pub(crate) const EXTENDED_INDEX_MARKER: char = '-';

/// Round to the nearest integer, with halves going toward positive infinity.
///
/// This matches the rounding used by browsers when the timings were taken, so
/// `-2.5` rounds to `-2` rather than `-3`.
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
