//! Event aggregation: groups timing entries by name and delta-encodes each group.

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::{round_half_up, DURATION_MARKER};
use crate::entry::TimingEntry;
use crate::numeric::{to_base36, trim_timing};
use crate::rle::{compress_array, Token};

/// Options accepted by the compression side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressOptions {
    /// Name to index map. Names missing from the map are dropped and the
    /// remaining names are written as their index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<IndexMap<String, u32>>,
    /// Keep only entries that end at or after this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    /// Keep only entries that start at or before this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

impl CompressOptions {
    #[must_use]
    pub fn with_map(mut self, map: IndexMap<String, u32>) -> Self {
        self.map = Some(map);
        self
    }

    #[must_use]
    pub fn with_range(mut self, from: Option<f64>, to: Option<f64>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// Ordered mapping from output key (name or map index) to its value token
pub type CompressedForm = IndexMap<String, Token>;

/// Result of aggregating a list of entries.
///
/// An empty input and an input whose names were all filtered out are kept
/// apart: the first serializes as `[]`, the second as `{}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Compressed {
    /// No entries were given
    Empty,
    /// Entries grouped by key, in first-seen order
    Form(CompressedForm),
}

impl Compressed {
    /// The grouped form, if any entries were given
    pub fn as_form(&self) -> Option<&CompressedForm> {
        match self {
            Self::Empty => None,
            Self::Form(form) => Some(form),
        }
    }

    /// Number of keys in the grouped form
    pub fn len(&self) -> usize {
        self.as_form().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Compressed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_seq(Some(0))?.end(),
            Self::Form(form) => form.serialize(serializer),
        }
    }
}

/// Keep only the entries inside the `from`/`to` window of `options`.
///
/// An entry passes `from` when it ends at or after it and passes `to` when it
/// starts at or before it. A bound of zero counts as unset.
pub fn filter_range<'a>(entries: &'a [TimingEntry], options: &CompressOptions) -> Vec<&'a TimingEntry> {
    let from = options.from.filter(|&f| f != 0.0);
    let to = options.to.filter(|&t| t != 0.0);

    entries
        .iter()
        .filter(|e| from.map_or(true, |from| e.start_time + e.duration >= from))
        .filter(|e| to.map_or(true, |to| e.start_time <= to))
        .collect()
}

/// Group entries by name and encode each group into a single value token.
///
/// Within a group every start time is stored as a base-36 offset from the
/// previous entry of the same name; measures append `_` and their base-36
/// duration.
pub fn compress<'a, I>(entries: I, options: &CompressOptions) -> Compressed
where
    I: IntoIterator<Item = &'a TimingEntry>,
{
    let mut groups: IndexMap<&str, Vec<&TimingEntry>> = IndexMap::new();
    let mut any = false;
    for entry in entries {
        any = true;
        groups.entry(entry.name.as_str()).or_default().push(entry);
    }

    if !any {
        return Compressed::Empty;
    }

    let mut form = CompressedForm::with_capacity(groups.len());
    for (name, group) in groups {
        let key = match &options.map {
            Some(map) => match map.get(name) {
                Some(index) => index.to_string(),
                None => continue,
            },
            None => name.to_string(),
        };

        let mut latest_time = 0.0;
        let tokens: Vec<String> = group
            .into_iter()
            .map(|entry| {
                let token = encode_entry(entry, latest_time);
                latest_time = entry.start_time;
                token
            })
            .collect();

        form.insert(key, compress_array(&tokens));
    }

    Compressed::Form(form)
}

/// Encode one entry relative to the previous start time of its group
fn encode_entry(entry: &TimingEntry, latest_time: f64) -> String {
    let delta = trim_timing(entry.start_time, latest_time);
    let mut token = if delta == 0 {
        String::new()
    } else {
        to_base36(delta as f64)
    };

    if entry.is_measure() {
        token.push(DURATION_MARKER);
        let duration = round_half_up(entry.duration);
        if duration != 0.0 {
            token.push_str(&to_base36(duration));
        }
    }

    token
}
