pub mod movies;
pub mod transfer;
pub mod views;

use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reel_config::PathManager;
use reel_core::{FileStore, Session, TrackerError};

/// Open the session against the platform state file, creating directories on
/// first run.
pub(crate) fn open_session() -> Result<Session> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| eyre!("failed to create data directories: {e}"))?;
    let store = FileStore::new(paths.state_file());
    tracing::debug!("opening state file {}", store.path().display());
    Session::open(Box::new(store)).map_err(|e| eyre!("failed to open tracker state: {e}"))
}

/// Split a comma-separated cast flag into trimmed, non-empty member names.
pub(crate) fn parse_cast(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Boundary policy for engine errors: validation and format problems are
/// user-facing messages, a stale id is a warning no-op, storage failures
/// propagate as real errors.
pub(crate) fn report(err: TrackerError, output: &Output) -> Result<()> {
    match err {
        TrackerError::NotFound { .. } => {
            output.warn(err.to_string());
            Ok(())
        }
        TrackerError::Validation { .. }
        | TrackerError::ImportFormat
        | TrackerError::FolderFormat { .. } => {
            output.error(err.to_string());
            Ok(())
        }
        TrackerError::Storage(e) => Err(eyre!(e)),
    }
}

/// Destructive actions are gated on explicit confirmation unless `--yes`.
pub(crate) fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| eyre!("confirmation prompt failed: {e}"))
}
