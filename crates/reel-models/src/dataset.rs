use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::entry::Entry;
use crate::log_event::LogEvent;

/// The full persisted application state.
///
/// Wire field names match the stored blob (`movies`, `watchedMovies`,
/// `movieLogs`). Exercises and recipes are placeholder collections with no
/// behavior; they are carried as opaque JSON so nothing is lost on round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(rename = "movies", default)]
    pub to_watch: Vec<Entry>,
    #[serde(rename = "watchedMovies", default)]
    pub watched: Vec<Entry>,
    #[serde(rename = "movieLogs", default)]
    pub logs: Vec<LogEvent>,
    #[serde(default)]
    pub exercises: Vec<Value>,
    #[serde(default)]
    pub recipes: Vec<Value>,
}

impl Dataset {
    /// The dataset a fresh install starts with: two sample movies to showcase
    /// the UI, everything else empty.
    pub fn starter() -> Self {
        let now = Utc::now();
        Self {
            to_watch: vec![
                sample_entry(
                    "Inception",
                    "English",
                    "Netflix",
                    &["Leonardo DiCaprio", "Joseph Gordon-Levitt", "Elliot Page"],
                    now - Duration::hours(24),
                ),
                sample_entry(
                    "3 Idiots",
                    "Hindi",
                    "Prime Video",
                    &["Aamir Khan", "R. Madhavan", "Sharman Joshi", "Kareena Kapoor"],
                    now - Duration::hours(12),
                ),
            ],
            watched: Vec::new(),
            logs: Vec::new(),
            exercises: Vec::new(),
            recipes: Vec::new(),
        }
    }

    /// True when an id is present in the to-watch or watched collection.
    pub fn contains_id(&self, id: &str) -> bool {
        self.to_watch.iter().any(|e| e.id == id) || self.watched.iter().any(|e| e.id == id)
    }
}

fn sample_entry(
    name: &str,
    language: &str,
    platform: &str,
    cast: &[&str],
    created_at: chrono::DateTime<Utc>,
) -> Entry {
    Entry {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        language: language.to_string(),
        platform: platform.to_string(),
        cast: cast.iter().map(|c| c.to_string()).collect(),
        created_at: Some(created_at),
        watched_at: None,
        extra: Map::new(),
    }
}
