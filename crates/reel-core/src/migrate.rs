use reel_models::{Dataset, Entry, LogEvent};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Result of normalizing a raw persisted blob.
pub struct NormalizedDataset {
    pub dataset: Dataset,
    /// True when the stored blob was missing or unusable and the returned
    /// dataset must be written back immediately so the next boot is clean.
    pub needs_rewrite: bool,
}

/// Normalize whatever is currently in storage into the current schema.
///
/// Never fails: an empty store or unparseable blob yields the starter dataset
/// with `needs_rewrite` set, so boot always succeeds at the cost of silently
/// discarding a corrupt value. A parseable object goes through the same
/// collection-defaulting rules as import, so blobs written by older builds
/// (no `watchedMovies`/`movieLogs` yet) load without losing anything.
pub fn normalize(raw: Option<&str>) -> NormalizedDataset {
    let Some(raw) = raw else {
        debug!("no stored state, starting from the built-in dataset");
        return NormalizedDataset {
            dataset: Dataset::starter(),
            needs_rewrite: true,
        };
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(root)) => NormalizedDataset {
            dataset: from_object(root),
            needs_rewrite: false,
        },
        Ok(other) => {
            warn!(
                "stored state is {} rather than an object, resetting to the built-in dataset",
                json_kind(&other)
            );
            NormalizedDataset {
                dataset: Dataset::starter(),
                needs_rewrite: true,
            }
        }
        Err(e) => {
            warn!("failed to parse stored state ({e}), resetting to the built-in dataset");
            NormalizedDataset {
                dataset: Dataset::starter(),
                needs_rewrite: true,
            }
        }
    }
}

/// Build a dataset from a parsed JSON object, defaulting each known
/// collection that is absent or not an array. Unrecognized top-level fields
/// are dropped; unrecognized per-entry fields survive inside each record.
pub fn from_object(mut root: Map<String, Value>) -> Dataset {
    Dataset {
        to_watch: salvage_entries(root.remove("movies"), "movies"),
        watched: salvage_entries(root.remove("watchedMovies"), "watchedMovies"),
        logs: salvage_events(root.remove("movieLogs"), "movieLogs"),
        exercises: salvage_values(root.remove("exercises")),
        recipes: salvage_values(root.remove("recipes")),
    }
}

/// Element-wise salvage: keep every record that deserializes, skip the rest
/// with a warning. A whole-vector parse would throw away good records next to
/// one bad one.
fn salvage_entries(value: Option<Value>, field: &str) -> Vec<Entry> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let total = items.len();
    let entries: Vec<Entry> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Entry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping malformed record in {field}: {e}");
                None
            }
        })
        .collect();
    debug!("loaded {}/{} records from {field}", entries.len(), total);
    entries
}

fn salvage_events(value: Option<Value>, field: &str) -> Vec<LogEvent> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<LogEvent>(item) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("skipping malformed event in {field}: {e}");
                None
            }
        })
        .collect()
}

fn salvage_values(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
