use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Which lifecycle transition a [`LogEvent`] records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogType {
    Add,
    Watch,
    Unwatch,
    Delete,
}

/// An immutable audit record of one lifecycle transition.
///
/// The entry fields are a structural copy taken at transition time, never a
/// reference, so editing or deleting the entry later cannot rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    #[serde(flatten)]
    pub entry: Entry,
    pub log_type: LogType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub log_time: DateTime<Utc>,
    /// Size of the to-watch collection immediately after the transition.
    pub movies_count: usize,
}

impl LogEvent {
    pub fn snapshot(
        entry: &Entry,
        log_type: LogType,
        log_time: DateTime<Utc>,
        movies_count: usize,
    ) -> Self {
        Self {
            entry: entry.clone(),
            log_type,
            log_time,
            movies_count,
        }
    }
}
