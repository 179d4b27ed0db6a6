use super::open_session;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use reel_core::{DayGroup, FacetField, FacetFilter, Session};
use reel_models::{Entry, LogType};

/// The three mutually-exclusive render modes. Exactly one is active per
/// invocation, chosen by the subcommand.
pub enum ViewMode {
    List {
        search: String,
        facet: Option<FacetFilter>,
    },
    Watched,
    Log,
}

pub fn run_list(
    search: Option<String>,
    language: Option<String>,
    platform: Option<String>,
    cast: Option<String>,
    output: &Output,
) -> Result<()> {
    let facet = facet_from_flags(language, platform, cast);
    render(
        ViewMode::List {
            search: search.unwrap_or_default(),
            facet,
        },
        output,
    )
}

pub fn run_watched(output: &Output) -> Result<()> {
    render(ViewMode::Watched, output)
}

pub fn run_log(output: &Output) -> Result<()> {
    render(ViewMode::Log, output)
}

pub fn run_facets(field: FacetField, output: &Output) -> Result<()> {
    let session = open_session()?;
    let values = session.facet_values(field);
    if output.format() != OutputFormat::Human {
        output.json(&serde_json::json!({ "field": field.to_string(), "values": values }));
        return Ok(());
    }
    if values.is_empty() {
        output.println(format!("No {field} values yet"));
        return Ok(());
    }
    for value in values {
        output.println(value);
    }
    Ok(())
}

fn render(mode: ViewMode, output: &Output) -> Result<()> {
    let session = open_session()?;
    match mode {
        ViewMode::List { search, facet } => render_list(&session, &search, facet.as_ref(), output),
        ViewMode::Watched => render_watched(&session, output),
        ViewMode::Log => render_log(&session, output),
    }
    Ok(())
}

fn facet_from_flags(
    language: Option<String>,
    platform: Option<String>,
    cast: Option<String>,
) -> Option<FacetFilter> {
    if let Some(value) = language {
        return Some(FacetFilter {
            field: FacetField::Language,
            value,
        });
    }
    if let Some(value) = platform {
        return Some(FacetFilter {
            field: FacetField::Platform,
            value,
        });
    }
    cast.map(|value| FacetFilter {
        field: FacetField::Cast,
        value,
    })
}

fn render_list(session: &Session, search: &str, facet: Option<&FacetFilter>, output: &Output) {
    let entries = session.search(search, facet);
    if output.format() != OutputFormat::Human {
        output.json(&serde_json::json!({ "view": "list", "entries": entries }));
        return;
    }
    if entries.is_empty() {
        output.println("No movies match. Add one with 'reeltracker add --name ...'");
        return;
    }
    output.println(entry_table(&entries, "Added").to_string());
}

fn render_watched(session: &Session, output: &Output) {
    let entries = session.data().watched.clone();
    if output.format() != OutputFormat::Human {
        output.json(&serde_json::json!({ "view": "watched", "entries": entries }));
        return;
    }
    if entries.is_empty() {
        output.println("Nothing watched yet");
        return;
    }
    output.println(entry_table(&entries, "Watched").to_string());
}

fn render_log(session: &Session, output: &Output) {
    let groups = session.grouped_log();
    if output.format() != OutputFormat::Human {
        let days: Vec<serde_json::Value> = groups
            .iter()
            .map(|g| serde_json::json!({ "day": g.label, "events": g.events }))
            .collect();
        output.json(&serde_json::json!({ "view": "log", "days": days }));
        return;
    }
    if groups.is_empty() {
        output.println("No activity yet");
        return;
    }
    for DayGroup { label, events } in groups {
        output.println(format!("{label}:"));
        for event in events {
            output.println(format!(
                "  {} {} \"{}\" ({} to watch)",
                event.log_time.format("%H:%M"),
                verb(event.log_type),
                event.entry.name,
                event.movies_count
            ));
        }
    }
}

fn verb(log_type: LogType) -> &'static str {
    match log_type {
        LogType::Add => "added",
        LogType::Watch => "watched",
        LogType::Unwatch => "unwatched",
        LogType::Delete => "deleted",
    }
}

fn entry_table(entries: &[Entry], date_column: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Name", "Platform", "Language", "Cast", date_column, "Id"]);
    for entry in entries {
        let date = match date_column {
            "Watched" => entry.watched_at,
            _ => entry.created_at,
        };
        table.add_row(vec![
            entry.name.clone(),
            dash_if_empty(&entry.platform),
            dash_if_empty(&entry.language),
            if entry.cast.is_empty() {
                "—".to_string()
            } else {
                entry.cast.join(", ")
            },
            date.map(|t| t.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| "—".to_string()),
            entry.id.clone(),
        ]);
    }
    table
}

fn dash_if_empty(value: &str) -> String {
    if value.trim().is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}
