use crate::error::TrackerError;
use crate::migrate;
use anyhow::Context;
use reel_models::Dataset;
use serde_json::Value;
use tracing::info;

/// Default file name for exports.
pub const EXPORT_FILE: &str = "life-tracker-export.json";

/// Serialize the full dataset, pretty-printed, for the export file.
pub fn export_string(data: &Dataset) -> Result<String, TrackerError> {
    serde_json::to_string_pretty(data)
        .context("failed to serialize dataset for export")
        .map_err(TrackerError::from)
}

/// Parse an import file into a dataset.
///
/// The document must be a JSON object; anything else is an
/// [`TrackerError::ImportFormat`] and the caller's dataset stays untouched.
/// Known collections default to empty when absent, unrecognized top-level
/// fields are dropped — an import replaces the whole dataset, never merges.
pub fn import_dataset(text: &str) -> Result<Dataset, TrackerError> {
    let root = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(root)) => root,
        Ok(_) | Err(_) => return Err(TrackerError::ImportFormat),
    };
    let dataset = migrate::from_object(root);
    info!(
        to_watch = dataset.to_watch.len(),
        watched = dataset.watched.len(),
        logs = dataset.logs.len(),
        "parsed import file"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_rejects_non_object() {
        assert!(matches!(
            import_dataset("[1,2]"),
            Err(TrackerError::ImportFormat)
        ));
        assert!(matches!(
            import_dataset("not json"),
            Err(TrackerError::ImportFormat)
        ));
        assert!(matches!(
            import_dataset("null"),
            Err(TrackerError::ImportFormat)
        ));
    }

    #[test]
    fn test_import_defaults_missing_collections() {
        let text = json!({
            "movies": [{ "id": "m1", "name": "Dune" }],
            "somethingElse": true
        })
        .to_string();

        let dataset = import_dataset(&text).unwrap();
        assert_eq!(dataset.to_watch.len(), 1);
        assert!(dataset.watched.is_empty());
        assert!(dataset.logs.is_empty());
    }

    #[test]
    fn test_export_round_trips_through_import() {
        use chrono::TimeZone;

        let mut data = Dataset::default();
        // Whole-millisecond timestamp: the wire format is epoch milliseconds.
        let now = chrono::Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        crate::lifecycle::create(
            &mut data,
            reel_models::EntryDraft {
                name: "Dune".to_string(),
                language: "English".to_string(),
                platform: "HBO".to_string(),
                cast: vec!["Timothee Chalamet".to_string()],
            },
            now,
        )
        .unwrap();

        let text = export_string(&data).unwrap();
        let back = import_dataset(&text).unwrap();
        assert_eq!(back, data);
    }
}
