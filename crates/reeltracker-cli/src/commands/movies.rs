use super::{confirm, open_session, parse_cast, report};
use crate::output::Output;
use color_eyre::Result;
use reel_models::EntryDraft;

pub fn run_add(
    name: String,
    language: Option<String>,
    platform: Option<String>,
    cast: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut session = open_session()?;
    let draft = EntryDraft {
        name,
        language: language.unwrap_or_default(),
        platform: platform.unwrap_or_default(),
        cast: parse_cast(cast),
    };
    match session.add_movie(draft) {
        Ok(entry) => {
            output.success(format!("Added \"{}\" (id {})", entry.name, entry.id));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_edit(
    id: &str,
    name: String,
    language: Option<String>,
    platform: Option<String>,
    cast: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut session = open_session()?;
    let draft = EntryDraft {
        name,
        language: language.unwrap_or_default(),
        platform: platform.unwrap_or_default(),
        cast: parse_cast(cast),
    };
    match session.edit_movie(id, draft) {
        Ok(entry) => {
            output.success(format!("Updated \"{}\"", entry.name));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_watch(id: &str, yes: bool, output: &Output) -> Result<()> {
    let mut session = open_session()?;
    let Some(name) = session
        .data()
        .to_watch
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.clone())
    else {
        output.warn(format!("No to-watch entry with id {id}; nothing to do"));
        return Ok(());
    };
    if !confirm(&format!("Mark \"{name}\" as watched?"), yes)? {
        output.println("Cancelled");
        return Ok(());
    }
    match session.mark_watched(id) {
        Ok(entry) => {
            output.success(format!(
                "\"{}\" marked watched ({} left to watch)",
                entry.name,
                session.data().to_watch.len()
            ));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_unwatch(id: &str, yes: bool, output: &Output) -> Result<()> {
    let mut session = open_session()?;
    let Some(name) = session
        .data()
        .watched
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.clone())
    else {
        output.warn(format!("No watched entry with id {id}; nothing to do"));
        return Ok(());
    };
    if !confirm(&format!("Move \"{name}\" back to the to-watch list?"), yes)? {
        output.println("Cancelled");
        return Ok(());
    }
    match session.mark_unwatched(id) {
        Ok(entry) => {
            output.success(format!("\"{}\" is back on the to-watch list", entry.name));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_delete(id: &str, yes: bool, output: &Output) -> Result<()> {
    let mut session = open_session()?;
    let Some(name) = session
        .data()
        .watched
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.clone())
    else {
        output.warn(format!("No watched entry with id {id}; nothing deleted"));
        return Ok(());
    };
    if !confirm(&format!("Delete \"{name}\"? This cannot be undone"), yes)? {
        output.println("Cancelled");
        return Ok(());
    }
    match session.delete_watched(id) {
        Ok(entry) => {
            output.success(format!("Deleted \"{}\"", entry.name));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_reset(yes: bool, output: &Output) -> Result<()> {
    let mut session = open_session()?;
    if !confirm("Discard all data and restore the fresh-install dataset?", yes)? {
        output.println("Cancelled");
        return Ok(());
    }
    match session.reset() {
        Ok(()) => {
            output.success("Dataset reset");
            Ok(())
        }
        Err(e) => report(e, output),
    }
}
