use reel_models::Entry;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// An entry attribute whose distinct values can drive a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetField {
    Language,
    Platform,
    Cast,
}

impl FromStr for FacetField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "language" => Ok(FacetField::Language),
            "platform" => Ok(FacetField::Platform),
            "cast" => Ok(FacetField::Cast),
            other => Err(format!(
                "unknown facet field: {other}. Use 'language', 'platform', or 'cast'"
            )),
        }
    }
}

impl fmt::Display for FacetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetField::Language => write!(f, "language"),
            FacetField::Platform => write!(f, "platform"),
            FacetField::Cast => write!(f, "cast"),
        }
    }
}

/// Distinct values of one attribute across the to-watch collection, for
/// populating filter choices.
///
/// Cast is flattened to individual members. Blank values are excluded;
/// duplicates collapse case-insensitively onto the first-seen casing; the
/// result is sorted case-insensitively. Re-derived on every call — the
/// collection holds hundreds of entries, not millions, so there is no
/// incremental index to maintain.
pub fn facet_values(field: FacetField, to_watch: &[Entry]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut values: Vec<(String, String)> = Vec::new();

    let mut push = |raw: &str| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let key = trimmed.to_lowercase();
        if seen.insert(key.clone()) {
            values.push((key, trimmed.to_string()));
        }
    };

    for entry in to_watch {
        match field {
            FacetField::Language => push(&entry.language),
            FacetField::Platform => push(&entry.platform),
            FacetField::Cast => {
                for member in &entry.cast {
                    push(member);
                }
            }
        }
    }

    values.sort_by(|a, b| a.0.cmp(&b.0));
    values.into_iter().map(|(_, original)| original).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn make_entry(name: &str, language: &str, platform: &str, cast: &[&str]) -> Entry {
        Entry {
            id: name.to_string(),
            name: name.to_string(),
            language: language.to_string(),
            platform: platform.to_string(),
            cast: cast.iter().map(|c| c.to_string()).collect(),
            created_at: None,
            watched_at: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_platform_values_deduped_and_sorted() {
        let entries = vec![
            make_entry("A", "", "Netflix", &[]),
            make_entry("B", "", "Prime Video", &[]),
            make_entry("C", "", "netflix", &[]),
            make_entry("D", "", "  ", &[]),
        ];
        let values = facet_values(FacetField::Platform, &entries);
        assert_eq!(values, vec!["Netflix", "Prime Video"]);
    }

    #[test]
    fn test_first_seen_casing_wins() {
        let entries = vec![
            make_entry("A", "HINDI", "", &[]),
            make_entry("B", "hindi", "", &[]),
        ];
        let values = facet_values(FacetField::Language, &entries);
        assert_eq!(values, vec!["HINDI"]);
    }

    #[test]
    fn test_cast_values_are_flattened_members() {
        let entries = vec![
            make_entry("A", "", "", &["Tom Hanks", "Meg Ryan"]),
            make_entry("B", "", "", &["Tom Hanks", "Rita Wilson"]),
        ];
        let values = facet_values(FacetField::Cast, &entries);
        assert_eq!(values, vec!["Meg Ryan", "Rita Wilson", "Tom Hanks"]);
    }

    #[test]
    fn test_blank_cast_members_excluded() {
        let entries = vec![make_entry("A", "", "", &["", "  ", "Alan Rickman"])];
        let values = facet_values(FacetField::Cast, &entries);
        assert_eq!(values, vec!["Alan Rickman"]);
    }

    #[test]
    fn test_facet_field_parsing() {
        assert_eq!("Platform".parse::<FacetField>(), Ok(FacetField::Platform));
        assert!("director".parse::<FacetField>().is_err());
    }
}
