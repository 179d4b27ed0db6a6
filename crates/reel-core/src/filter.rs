use crate::facet::FacetField;
use reel_models::Entry;

/// A single-facet equality filter: entries match when the named field (or any
/// cast member) equals the value case-insensitively.
#[derive(Debug, Clone)]
pub struct FacetFilter {
    pub field: FacetField,
    pub value: String,
}

/// Apply a free-text query and an optional facet filter to the to-watch
/// collection.
///
/// Free text matches case-insensitively as a substring of the entry's name,
/// language, platform, and cast members joined with spaces; a blank query
/// matches everything, as does a facet filter with a blank value. The two
/// predicates are ANDed. Results come back newest-first by `created_at`, with
/// missing timestamps treated as zero so they sort last; the sort is stable,
/// so ties keep their relative order.
///
/// Pure function: no side effects, callers get owned copies to render.
pub fn query(to_watch: &[Entry], free_text: &str, facet: Option<&FacetFilter>) -> Vec<Entry> {
    let needle = free_text.trim().to_lowercase();

    let mut matched: Vec<Entry> = to_watch
        .iter()
        .filter(|entry| matches_text(entry, &needle) && matches_facet(entry, facet))
        .cloned()
        .collect();

    matched.sort_by_key(|entry| std::cmp::Reverse(entry.created_at_millis()));
    matched
}

fn matches_text(entry: &Entry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = [
        entry.name.as_str(),
        entry.language.as_str(),
        entry.platform.as_str(),
    ]
    .into_iter()
    .chain(entry.cast.iter().map(String::as_str))
    .filter(|piece| !piece.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase();

    haystack.contains(needle)
}

fn matches_facet(entry: &Entry, facet: Option<&FacetFilter>) -> bool {
    let Some(facet) = facet else {
        return true;
    };
    let wanted = facet.value.trim().to_lowercase();
    if wanted.is_empty() {
        return true;
    }
    match facet.field {
        FacetField::Language => entry.language.trim().to_lowercase() == wanted,
        FacetField::Platform => entry.platform.trim().to_lowercase() == wanted,
        FacetField::Cast => entry
            .cast
            .iter()
            .any(|member| member.trim().to_lowercase() == wanted),
    }
}
