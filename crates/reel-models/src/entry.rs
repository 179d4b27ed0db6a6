use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tracked movie record.
///
/// `id` and `created_at` are assigned once at creation and never change.
/// Timestamps travel as epoch milliseconds on the wire; `created_at` is
/// optional so records persisted by older builds still load (they sort last).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub watched_at: Option<DateTime<Utc>>,
    /// Fields written by other builds that this schema does not know about.
    /// Kept so a load/save round trip never loses data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Millisecond timestamp used for ordering; records without one sort as zero.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.map(|t| t.timestamp_millis()).unwrap_or(0)
    }
}

/// User-supplied fields for creating or editing an entry. Identity and
/// timestamps are never part of a draft.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub name: String,
    pub language: String,
    pub platform: String,
    pub cast: Vec<String>,
}
