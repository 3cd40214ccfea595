//! Timing entry struct shared by compression and decompression.

use serde::{Deserialize, Serialize};

/// Whether an entry is an instant or an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Named instant, always zero duration
    Mark,
    /// Named interval with a start and a duration
    Measure,
}

/// A named mark or measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingEntry {
    /// Event name
    pub name: String,
    /// Mark or measure
    #[serde(rename = "entryType")]
    pub kind: EntryKind,
    /// Start time in milliseconds
    pub start_time: f64,
    /// Duration in milliseconds (0 for marks)
    #[serde(default)]
    pub duration: f64,
}

impl TimingEntry {
    /// Create a mark at `start_time`
    pub fn mark(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Mark,
            start_time,
            duration: 0.0,
        }
    }

    /// Create a measure starting at `start_time` and lasting `duration`
    pub fn measure(name: impl Into<String>, start_time: f64, duration: f64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Measure,
            start_time,
            duration,
        }
    }

    /// Whether this entry is a measure
    #[inline]
    pub fn is_measure(&self) -> bool {
        self.kind == EntryKind::Measure
    }
}
