use chrono::Utc;
use std::path::Path;
use tracing::{debug, info};

use crate::audit::{self, DayGroup};
use crate::error::TrackerError;
use crate::facet::{self, FacetField};
use crate::filter::{self, FacetFilter};
use crate::folder;
use crate::lifecycle;
use crate::migrate;
use crate::store::StateStore;
use crate::transfer;
use reel_models::{Dataset, Entry, EntryDraft};

/// The single owner of the in-memory dataset.
///
/// Every mutating call goes through a lifecycle operation and then persists
/// the whole dataset as its final step; a failed operation persists nothing.
/// Queries borrow the dataset and never touch storage.
pub struct Session {
    store: Box<dyn StateStore>,
    data: Dataset,
}

impl Session {
    /// Load the stored blob, normalize it to the current schema, and write
    /// the result back when the store held nothing usable.
    pub fn open(store: Box<dyn StateStore>) -> Result<Self, TrackerError> {
        let raw = store.get()?;
        let normalized = migrate::normalize(raw.as_deref());
        let session = Self {
            store,
            data: normalized.dataset,
        };
        if normalized.needs_rewrite {
            info!("persisting normalized dataset after reset");
            session.persist()?;
        }
        Ok(session)
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    // ---- mutations -------------------------------------------------------

    pub fn add_movie(&mut self, draft: EntryDraft) -> Result<Entry, TrackerError> {
        let entry = lifecycle::create(&mut self.data, draft, Utc::now())?;
        self.persist()?;
        Ok(entry)
    }

    pub fn edit_movie(&mut self, id: &str, draft: EntryDraft) -> Result<Entry, TrackerError> {
        let entry = lifecycle::update(&mut self.data, id, draft)?;
        self.persist()?;
        Ok(entry)
    }

    pub fn mark_watched(&mut self, id: &str) -> Result<Entry, TrackerError> {
        let entry = lifecycle::mark_watched(&mut self.data, id, Utc::now())?;
        self.persist()?;
        Ok(entry)
    }

    pub fn mark_unwatched(&mut self, id: &str) -> Result<Entry, TrackerError> {
        let entry = lifecycle::mark_unwatched(&mut self.data, id, Utc::now())?;
        self.persist()?;
        Ok(entry)
    }

    pub fn delete_watched(&mut self, id: &str) -> Result<Entry, TrackerError> {
        let entry = lifecycle::delete_watched(&mut self.data, id, Utc::now())?;
        self.persist()?;
        Ok(entry)
    }

    /// Restore the built-in starter dataset, discarding everything.
    pub fn reset(&mut self) -> Result<(), TrackerError> {
        self.data = Dataset::starter();
        self.persist()
    }

    // ---- queries ---------------------------------------------------------

    pub fn search(&self, free_text: &str, facet: Option<&FacetFilter>) -> Vec<Entry> {
        filter::query(&self.data.to_watch, free_text, facet)
    }

    pub fn facet_values(&self, field: FacetField) -> Vec<String> {
        facet::facet_values(field, &self.data.to_watch)
    }

    pub fn grouped_log(&self) -> Vec<DayGroup> {
        audit::grouped_by_day(&self.data.logs)
    }

    // ---- transfer --------------------------------------------------------

    pub fn export_string(&self) -> Result<String, TrackerError> {
        transfer::export_string(&self.data)
    }

    /// Replace the whole dataset from an import file, then persist. On any
    /// error the current dataset is untouched.
    pub fn import_replace(&mut self, text: &str) -> Result<(), TrackerError> {
        let dataset = transfer::import_dataset(text)?;
        self.data = dataset;
        self.persist()?;
        info!("import replaced the dataset");
        Ok(())
    }

    pub fn folder_save(&self, dir: &Path) -> Result<std::path::PathBuf, TrackerError> {
        folder::save_movies(dir, &self.data.to_watch)
    }

    /// Replace only the to-watch collection from the folder file, then
    /// persist. A failed read leaves in-memory state untouched.
    pub fn folder_load(&mut self, dir: &Path) -> Result<usize, TrackerError> {
        let movies = folder::load_movies(dir)?;
        let count = movies.len();
        self.data.to_watch = movies;
        self.persist()?;
        Ok(count)
    }

    fn persist(&self) -> Result<(), TrackerError> {
        let blob = transfer::export_string(&self.data)?;
        self.store.set(&blob)?;
        debug!("dataset persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use reel_models::LogType;
    use serde_json::json;

    fn draft(name: &str) -> EntryDraft {
        EntryDraft {
            name: name.to_string(),
            ..EntryDraft::default()
        }
    }

    fn empty_session() -> Session {
        let store = MemoryStore::with_blob(json!({ "movies": [] }).to_string());
        Session::open(Box::new(store)).unwrap()
    }

    #[test]
    fn test_open_empty_store_seeds_starter_and_persists() {
        let session = Session::open(Box::new(MemoryStore::new())).unwrap();
        assert_eq!(session.data().to_watch.len(), 2);

        let blob = session.store.get().unwrap().expect("corrective persist");
        let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed["movies"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_open_corrupt_store_overwrites_with_starter() {
        let session = Session::open(Box::new(MemoryStore::with_blob("{broken"))).unwrap();
        let blob = session.store.get().unwrap().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&blob).is_ok());
    }

    #[test]
    fn test_mutations_persist_after_each_step() {
        let mut session = empty_session();
        let entry = session.add_movie(draft("Dune")).unwrap();

        let blob = session.store.get().unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed["movies"][0]["name"], "Dune");
        assert_eq!(parsed["movieLogs"][0]["logType"], "Add");

        session.mark_watched(&entry.id).unwrap();
        let blob = session.store.get().unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed["movies"].as_array().unwrap().len(), 0);
        assert_eq!(parsed["watchedMovies"][0]["id"], entry.id.as_str());
    }

    #[test]
    fn test_failed_validation_does_not_persist() {
        let mut session = empty_session();
        let before = session.store.get().unwrap();
        assert!(session.add_movie(draft("  ")).is_err());
        assert_eq!(session.store.get().unwrap(), before);
    }

    #[test]
    fn test_import_replaces_wholesale() {
        let mut session = empty_session();
        session.add_movie(draft("Old")).unwrap();

        let import = json!({ "movies": [{ "id": "n1", "name": "New" }] }).to_string();
        session.import_replace(&import).unwrap();

        assert_eq!(session.data().to_watch.len(), 1);
        assert_eq!(session.data().to_watch[0].name, "New");
        assert!(session.data().logs.is_empty());
    }

    #[test]
    fn test_failed_import_leaves_dataset_untouched() {
        let mut session = empty_session();
        session.add_movie(draft("Keep")).unwrap();

        assert!(session.import_replace("not json").is_err());
        assert_eq!(session.data().to_watch.len(), 1);
        assert_eq!(session.data().to_watch[0].name, "Keep");
    }

    #[test]
    fn test_folder_round_trip_replaces_to_watch_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = empty_session();
        let entry = session.add_movie(draft("Dune")).unwrap();
        session.add_movie(draft("Heat")).unwrap();
        session.mark_watched(&entry.id).unwrap();

        session.folder_save(dir.path()).unwrap();
        session.add_movie(draft("Extra")).unwrap();

        let count = session.folder_load(dir.path()).unwrap();
        assert_eq!(count, 1); // only Heat was in to-watch at save time
        assert_eq!(session.data().to_watch.len(), 1);
        assert_eq!(session.data().watched.len(), 1); // watched untouched
    }

    #[test]
    fn test_folder_load_failure_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = empty_session();
        session.add_movie(draft("Keep")).unwrap();

        assert!(session.folder_load(dir.path()).is_err());
        assert_eq!(session.data().to_watch.len(), 1);
    }

    #[test]
    fn test_reset_restores_starter() {
        let mut session = empty_session();
        session.add_movie(draft("Dune")).unwrap();
        session.reset().unwrap();
        assert_eq!(session.data().to_watch.len(), 2);
        assert!(session.data().logs.is_empty());
    }

    #[test]
    fn test_lifecycle_and_log_survive_reload() {
        let store = MemoryStore::new();
        let blob;
        {
            let mut session =
                Session::open(Box::new(MemoryStore::with_blob(json!({ "movies": [] }).to_string())))
                    .unwrap();
            let entry = session.add_movie(draft("Dune")).unwrap();
            session.mark_watched(&entry.id).unwrap();
            blob = session.export_string().unwrap();
        }
        store.set(&blob).unwrap();

        let reloaded = Session::open(Box::new(store)).unwrap();
        assert_eq!(reloaded.data().watched.len(), 1);
        assert_eq!(reloaded.data().logs.len(), 2);
        assert_eq!(reloaded.data().logs[0].log_type, LogType::Watch);
    }
}
