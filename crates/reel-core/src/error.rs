use thiserror::Error;

/// Errors the engine can hand back to the caller.
///
/// `NotFound` is soft by design: the UI only offers actions on ids it just
/// rendered, so a stale id is treated as a no-op at the boundary rather than
/// a crash. Storage corruption never surfaces here — the migrator recovers it
/// by substituting the starter dataset.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{field} is required")]
    Validation { field: &'static str },

    #[error("no entry with id {id} in the {collection} collection")]
    NotFound { id: String, collection: &'static str },

    #[error("import file is not a JSON object")]
    ImportFormat,

    #[error("movie-tracker.json is missing or invalid: {reason}")]
    FolderFormat { reason: String },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
