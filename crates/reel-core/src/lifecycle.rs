//! The state machine moving an entry between the to-watch, watched, and
//! deleted states.
//!
//! Each operation validates first and mutates only on success, applying the
//! collection change and its audit event together, so the caller never
//! observes one without the other. `now` is injected so tests control time;
//! the session passes `Utc::now()`.
//!
//! Edits deliberately leave no audit event (see DESIGN.md).

use chrono::{DateTime, Utc};
use serde_json::Map;
use tracing::debug;
use uuid::Uuid;

use crate::audit;
use crate::error::TrackerError;
use reel_models::{Dataset, Entry, EntryDraft, LogEvent, LogType};

/// Add a new entry to the to-watch collection.
pub fn create(
    data: &mut Dataset,
    draft: EntryDraft,
    now: DateTime<Utc>,
) -> Result<Entry, TrackerError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(TrackerError::Validation { field: "name" });
    }

    let entry = Entry {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        language: draft.language.trim().to_string(),
        platform: draft.platform.trim().to_string(),
        cast: clean_cast(draft.cast),
        created_at: Some(now),
        watched_at: None,
        extra: Map::new(),
    };

    data.to_watch.push(entry.clone());
    let count = data.to_watch.len();
    audit::record(
        &mut data.logs,
        LogEvent::snapshot(&entry, LogType::Add, now, count),
    );
    debug!(id = %entry.id, name = %entry.name, "created entry");
    Ok(entry)
}

/// Replace the mutable fields of an entry in the to-watch collection.
/// Identity and timestamps are preserved; no audit event is appended.
pub fn update(data: &mut Dataset, id: &str, draft: EntryDraft) -> Result<Entry, TrackerError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(TrackerError::Validation { field: "name" });
    }
    let entry = data
        .to_watch
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| TrackerError::NotFound {
            id: id.to_string(),
            collection: "to-watch",
        })?;

    entry.name = name.to_string();
    entry.language = draft.language.trim().to_string();
    entry.platform = draft.platform.trim().to_string();
    entry.cast = clean_cast(draft.cast);
    debug!(id = %entry.id, "updated entry");
    Ok(entry.clone())
}

/// Move an entry from to-watch to watched, stamping `watched_at`.
pub fn mark_watched(
    data: &mut Dataset,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Entry, TrackerError> {
    let idx = position(&data.to_watch, id, "to-watch")?;
    let mut entry = data.to_watch.remove(idx);
    entry.watched_at = Some(now);
    data.watched.push(entry.clone());

    // Count reflects the to-watch collection after removal.
    let count = data.to_watch.len();
    audit::record(
        &mut data.logs,
        LogEvent::snapshot(&entry, LogType::Watch, now, count),
    );
    debug!(id = %entry.id, remaining = count, "marked watched");
    Ok(entry)
}

/// Move an entry from watched back to to-watch. Its stale `watched_at` is
/// kept, matching the stored-blob behavior of earlier builds.
pub fn mark_unwatched(
    data: &mut Dataset,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Entry, TrackerError> {
    let idx = position(&data.watched, id, "watched")?;
    let entry = data.watched.remove(idx);
    data.to_watch.push(entry.clone());

    // Count reflects the to-watch collection after insertion.
    let count = data.to_watch.len();
    audit::record(
        &mut data.logs,
        LogEvent::snapshot(&entry, LogType::Unwatch, now, count),
    );
    debug!(id = %entry.id, remaining = count, "marked unwatched");
    Ok(entry)
}

/// Permanently remove an entry from the watched collection. One-way: the
/// entry survives only as a `Delete` event in the audit log.
pub fn delete_watched(
    data: &mut Dataset,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Entry, TrackerError> {
    let idx = position(&data.watched, id, "watched")?;
    let entry = data.watched.remove(idx);

    // Deleting from watched leaves the to-watch count unchanged.
    let count = data.to_watch.len();
    audit::record(
        &mut data.logs,
        LogEvent::snapshot(&entry, LogType::Delete, now, count),
    );
    debug!(id = %entry.id, "deleted watched entry");
    Ok(entry)
}

fn position(
    entries: &[Entry],
    id: &str,
    collection: &'static str,
) -> Result<usize, TrackerError> {
    entries
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| TrackerError::NotFound {
            id: id.to_string(),
            collection,
        })
}

fn clean_cast(cast: Vec<String>) -> Vec<String> {
    cast.into_iter()
        .map(|member| member.trim().to_string())
        .filter(|member| !member.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> EntryDraft {
        EntryDraft {
            name: name.to_string(),
            ..EntryDraft::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_create_appends_entry_and_add_event() {
        let mut data = Dataset::default();
        let entry = create(&mut data, draft("Dune"), now()).unwrap();

        assert_eq!(data.to_watch.len(), 1);
        assert_eq!(data.logs.len(), 1);
        assert_eq!(data.logs[0].log_type, LogType::Add);
        assert_eq!(data.logs[0].movies_count, 1);
        assert_eq!(data.logs[0].entry.id, entry.id);
        assert!(entry.created_at.is_some());
        assert!(entry.watched_at.is_none());
    }

    #[test]
    fn test_create_rejects_blank_name_without_mutation() {
        let mut data = Dataset::default();
        let err = create(&mut data, draft("   "), now()).unwrap_err();
        assert!(matches!(err, TrackerError::Validation { field: "name" }));
        assert!(data.to_watch.is_empty());
        assert!(data.logs.is_empty());
    }

    #[test]
    fn test_create_trims_fields_and_drops_blank_cast() {
        let mut data = Dataset::default();
        let entry = create(
            &mut data,
            EntryDraft {
                name: "  Heat  ".to_string(),
                language: " English ".to_string(),
                platform: String::new(),
                cast: vec!["  Al Pacino ".to_string(), "   ".to_string()],
            },
            now(),
        )
        .unwrap();
        assert_eq!(entry.name, "Heat");
        assert_eq!(entry.language, "English");
        assert_eq!(entry.cast, vec!["Al Pacino"]);
    }

    #[test]
    fn test_update_preserves_identity_and_skips_audit() {
        let mut data = Dataset::default();
        let created = create(&mut data, draft("Dune"), now()).unwrap();

        let updated = update(
            &mut data,
            &created.id,
            EntryDraft {
                name: "Dune: Part One".to_string(),
                platform: "HBO".to_string(),
                ..EntryDraft::default()
            },
        )
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Dune: Part One");
        assert_eq!(data.to_watch[0].platform, "HBO");
        // Edits are not history-worthy: still just the Add event.
        assert_eq!(data.logs.len(), 1);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut data = Dataset::default();
        let err = update(&mut data, "nope", draft("X")).unwrap_err();
        assert!(matches!(err, TrackerError::NotFound { .. }));
    }

    #[test]
    fn test_mark_watched_moves_entry_and_counts_after_removal() {
        let mut data = Dataset::default();
        let entry = create(&mut data, draft("Dune"), now()).unwrap();

        let watched = mark_watched(&mut data, &entry.id, now()).unwrap();
        assert!(data.to_watch.is_empty());
        assert_eq!(data.watched.len(), 1);
        assert!(watched.watched_at.is_some());
        assert_eq!(data.logs[0].log_type, LogType::Watch);
        assert_eq!(data.logs[0].movies_count, 0);
    }

    #[test]
    fn test_watch_unwatch_round_trip_restores_to_watch() {
        let mut data = Dataset::default();
        let entry = create(&mut data, draft("Dune"), now()).unwrap();
        let before = data.to_watch.len();

        mark_watched(&mut data, &entry.id, now()).unwrap();
        mark_unwatched(&mut data, &entry.id, now()).unwrap();

        assert_eq!(data.to_watch.len(), before);
        assert!(data.to_watch.iter().any(|e| e.id == entry.id));
        assert!(data.watched.is_empty());
        // Unwatch then Watch at the head, Add at the tail.
        let types: Vec<LogType> = data.logs.iter().map(|l| l.log_type).collect();
        assert_eq!(types, vec![LogType::Unwatch, LogType::Watch, LogType::Add]);
        assert_eq!(data.logs[0].movies_count, 1);
    }

    #[test]
    fn test_unwatch_keeps_stale_watched_at() {
        let mut data = Dataset::default();
        let entry = create(&mut data, draft("Dune"), now()).unwrap();
        mark_watched(&mut data, &entry.id, now()).unwrap();
        mark_unwatched(&mut data, &entry.id, now()).unwrap();
        assert!(data.to_watch[0].watched_at.is_some());
    }

    #[test]
    fn test_delete_watched_is_one_way() {
        let mut data = Dataset::default();
        let entry = create(&mut data, draft("Dune"), now()).unwrap();
        mark_watched(&mut data, &entry.id, now()).unwrap();
        delete_watched(&mut data, &entry.id, now()).unwrap();

        assert!(!data.contains_id(&entry.id));
        assert_eq!(data.logs[0].log_type, LogType::Delete);
        assert_eq!(data.logs[0].movies_count, 0);
        assert_eq!(data.logs[0].entry.id, entry.id);

        // A second delete is NotFound, not a double-remove.
        let err = delete_watched(&mut data, &entry.id, now()).unwrap_err();
        assert!(matches!(err, TrackerError::NotFound { .. }));
    }

    #[test]
    fn test_delete_does_not_change_to_watch_count() {
        let mut data = Dataset::default();
        create(&mut data, draft("Keep me"), now()).unwrap();
        let target = create(&mut data, draft("Dune"), now()).unwrap();
        mark_watched(&mut data, &target.id, now()).unwrap();

        delete_watched(&mut data, &target.id, now()).unwrap();
        assert_eq!(data.logs[0].log_type, LogType::Delete);
        assert_eq!(data.logs[0].movies_count, 1);
        assert_eq!(data.to_watch.len(), 1);
    }

    #[test]
    fn test_dune_scenario_end_to_end() {
        let mut data = Dataset::default();
        let dune = create(&mut data, draft("Dune"), now()).unwrap();
        assert_eq!(data.to_watch.len(), 1);
        assert_eq!(data.logs[0].log_type, LogType::Add);
        assert_eq!(data.logs[0].movies_count, 1);

        mark_watched(&mut data, &dune.id, now()).unwrap();
        assert!(data.to_watch.is_empty());
        assert_eq!(data.watched.len(), 1);
        assert_eq!(data.logs[0].log_type, LogType::Watch);
        assert_eq!(data.logs[0].movies_count, 0);

        mark_unwatched(&mut data, &dune.id, now()).unwrap();
        assert_eq!(data.to_watch.len(), 1);
        assert!(data.watched.is_empty());
        let types: Vec<LogType> = data.logs.iter().map(|l| l.log_type).collect();
        assert_eq!(types, vec![LogType::Unwatch, LogType::Watch, LogType::Add]);
        assert_eq!(data.logs[0].movies_count, 1);
    }
}
