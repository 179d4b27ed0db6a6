use super::{open_session, report};
use crate::output::Output;
use color_eyre::eyre::Context;
use color_eyre::Result;
use reel_core::transfer::EXPORT_FILE;
use std::path::{Path, PathBuf};

pub fn run_export(out: Option<PathBuf>, output: &Output) -> Result<()> {
    let session = open_session()?;
    let path = out.unwrap_or_else(|| PathBuf::from(EXPORT_FILE));
    let body = match session.export_string() {
        Ok(body) => body,
        Err(e) => return report(e, output),
    };
    std::fs::write(&path, body)
        .with_context(|| format!("failed to write export file {}", path.display()))?;
    output.success(format!("Exported to {}", path.display()));
    Ok(())
}

pub fn run_import(path: &Path, output: &Output) -> Result<()> {
    let mut session = open_session()?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read import file {}", path.display()))?;
    match session.import_replace(&text) {
        Ok(()) => {
            output.success(format!(
                "Import successful: {} to watch, {} watched, {} log events",
                session.data().to_watch.len(),
                session.data().watched.len(),
                session.data().logs.len()
            ));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_folder_save(dir: &Path, output: &Output) -> Result<()> {
    let session = open_session()?;
    match session.folder_save(dir) {
        Ok(path) => {
            output.success(format!("Saved to {}", path.display()));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}

pub fn run_folder_load(dir: &Path, output: &Output) -> Result<()> {
    let mut session = open_session()?;
    match session.folder_load(dir) {
        Ok(count) => {
            output.success(format!("Loaded {count} movies from the folder file"));
            Ok(())
        }
        Err(e) => report(e, output),
    }
}
