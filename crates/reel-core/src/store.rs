use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Durable key-value store for the single serialized dataset blob. The engine
/// only ever needs get/set of one value; where the blob lives is the
/// implementation's business.
pub trait StateStore {
    /// Read the stored blob, `None` when nothing has been stored yet.
    fn get(&self) -> Result<Option<String>>;
    /// Overwrite the stored blob.
    fn set(&self, blob: &str) -> Result<()>;
}

/// File-backed store: one JSON file, parent directories created on demand.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            debug!("state file {} does not exist yet", self.path.display());
            return Ok(None);
        }
        let blob = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read state file {}", self.path.display()))?;
        Ok(Some(blob))
    }

    fn set(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, blob)
            .with_context(|| format!("failed to write state file {}", self.path.display()))?;
        debug!("state saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }
}

impl StateStore for MemoryStore {
    fn get(&self) -> Result<Option<String>> {
        let guard = self
            .blob
            .lock()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn set(&self, blob: &str) -> Result<()> {
        let mut guard = self
            .blob
            .lock()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;
        *guard = Some(blob.to_string());
        Ok(())
    }
}
