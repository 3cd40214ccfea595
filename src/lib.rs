//! `utcompress` - URL-safe compression for named timing marks and measures
//!
//! Compresses lists of named instants (marks) and named intervals (measures)
//! into short strings that fit in a beacon URL, and restores them again.
//!
//! # Features
//! - **Delta encoding**: each start time is stored as a base-36 offset from the
//!   previous entry of the same name
//! - **Run-length folding**: repeated offsets collapse to `value*count`
//! - **Two competing layouts**: a prefix trie in compact text and a flat
//!   `name~value` list; the shorter one after percent-encoding wins
//! - **Index maps**: callers that agree on a name to index map can drop the
//!   names entirely
//!
//! # Example
//! ```
//! use utcompress::{compress, compress_for_uri, decompress_from_string, CompressOptions, DecompressOptions, TimingEntry};
//!
//! let entries = vec![
//!     TimingEntry::mark("mark1", 100.0),
//!     TimingEntry::measure("measure1", 150.0, 20.0),
//! ];
//!
//! let compressed = compress(&entries, &CompressOptions::default());
//! let uri = compress_for_uri(&compressed);
//! println!("compressed to {uri}");
//!
//! let restored = decompress_from_string(&uri, &DecompressOptions::default()).unwrap();
//! assert_eq!(restored.len(), 2);
//! assert_eq!(restored[0].start_time, 100.0);
//! ```
//!
//! # Value Tokens
//!
//! Every name maps to one value token built from its entries in arrival order:
//!
//! | Piece | Encoding | Example |
//! |-------|----------|---------|
//! | start time | base-36 offset from the previous start of the same name, empty when 0 | `2s` (100 ms) |
//! | measure | `_` + base-36 duration, digits dropped when 0 | `2s_5` |
//! | list | tokens joined with `.` | `1_1.2_5` |
//! | repeat | `v*` for two copies, `v*N` for N copies | `1*3.2` |
//!
//! A token made only of decimal digits is carried as a number.
//!
//! # Wire Format
//!
//! The first character of the output names its layout:
//!
//! | Tag | Layout | Example |
//! |-----|--------|---------|
//! | `~` | optimized trie in compact text | `~(measure~(1~'2s~2~'5k~3~'8c))` |
//! | `0` | flat list, `~` in names written `%7E` | `0mark1~2s~mark2~5k` |
//! | `1` | index map: `z` or `-zz` index, then value | `10~12s~-0a5k` |
//!
//! On the way back `{` (plain JSON trie) and `(` (JSON trie with `{}:,"`
//! swapped for `()~-'`) are accepted as well.
//!
//! ## Compact Text
//!
//! | Value | Text |
//! |-------|------|
//! | number | `~12` |
//! | string | `~'text` |
//! | true / false / null | `~true` / `~false` / `~null` |
//! | array | `~(~1~2)` |
//! | object | `~(a~1~b~'x)` |
//!
//! Characters outside `[A-Za-z0-9_.-]` are escaped: `$` as `!`, others below
//! U+0100 as `*XX`, the rest as `**XXXX`.
//!
//! ## Trie
//!
//! Names are split into a trie of UTF-16 code units; a name that is also a
//! prefix of a longer one keeps its value under the reserved `!` edge. Chains of
//! single-child nodes are merged into one edge, so `measure1`, `measure2`,
//! `measure3` become `measure` with children `1`, `2`, `3`.
//!
//! ## Limits
//! - Map indexes: 0-1331 (larger indexes are dropped)
//! - Run-length strings: at most 65536 decoded tokens each
//! - Names must not contain `!`
//! - Start times and durations are rounded to whole milliseconds

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod constants;
mod decoder;
mod encoder;
mod entry;
mod error;
pub mod jsurl;
mod numeric;
mod rle;
pub mod trie;
mod uri;
mod value;


// Re-export public API
pub use decoder::{
    decompress_from_string, decompress_trie, decompress_uri_array, decompress_uri_map, decompress_uri_trie,
    expand, sort_entries, DecompressOptions,
};
pub use encoder::{compress, filter_range, CompressOptions, Compressed, CompressedForm};
pub use entry::{EntryKind, TimingEntry};
pub use error::ParseError;
pub use numeric::{parse_base36_prefix, to_base36, trim_timing};
pub use rle::{compress_array, decompress_array, Token};
pub use uri::{compress_for_uri, flatten_array, flatten_map, uri_encoded_len};
pub use value::{Key, Value};

/// Filter, aggregate and encode `entries` in one step.
///
/// Applies the `from`/`to` window of `options`, groups the remaining entries
/// and returns the smallest tagged URI form.
pub fn compress_entries(entries: &[TimingEntry], options: &CompressOptions) -> String {
    let selected = filter_range(entries, options);
    compress_for_uri(&compress(selected, options))
}
