use crate::error::TrackerError;
use anyhow::Context;
use reel_models::Entry;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name used inside the user-chosen folder.
pub const FOLDER_FILE: &str = "movie-tracker.json";

/// Write the to-watch collection into `dir/movie-tracker.json`.
///
/// This secondary path carries only `{"movies": [...]}` — a narrower format
/// than the export file, meant for manual save/load against a folder the
/// user picked.
pub fn save_movies(dir: &Path, movies: &[Entry]) -> Result<PathBuf, TrackerError> {
    let path = dir.join(FOLDER_FILE);
    let body = serde_json::to_string_pretty(&json!({ "movies": movies }))
        .context("failed to serialize movies for folder save")?;
    std::fs::write(&path, body)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(count = movies.len(), "saved movies to {}", path.display());
    Ok(path)
}

/// Read the to-watch collection back from `dir/movie-tracker.json`.
///
/// A missing file, invalid JSON, or a document without a `movies` array is a
/// [`TrackerError::FolderFormat`]; the caller reports it and leaves in-memory
/// state untouched.
pub fn load_movies(dir: &Path) -> Result<Vec<Entry>, TrackerError> {
    let path = dir.join(FOLDER_FILE);
    let text = std::fs::read_to_string(&path).map_err(|e| {
        warn!("folder load failed: {e}");
        TrackerError::FolderFormat {
            reason: format!("could not read {}: {e}", path.display()),
        }
    })?;

    let root: Value = serde_json::from_str(&text).map_err(|e| TrackerError::FolderFormat {
        reason: format!("not valid JSON: {e}"),
    })?;
    let Some(Value::Array(_)) = root.get("movies") else {
        return Err(TrackerError::FolderFormat {
            reason: "no movies array".to_string(),
        });
    };

    let movies: Vec<Entry> =
        serde_json::from_value(root["movies"].clone()).map_err(|e| TrackerError::FolderFormat {
            reason: format!("malformed movie record: {e}"),
        })?;
    info!(count = movies.len(), "loaded movies from {}", path.display());
    Ok(movies)
}
