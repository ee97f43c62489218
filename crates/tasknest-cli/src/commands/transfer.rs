use std::fs;

use anyhow::{Context, Result};
use tasknest_core::board::TaskBoard;
use tasknest_core::repository::Repository;

use crate::cli::{ExportCommand, ImportCommand};

pub fn export<R: Repository>(board: &TaskBoard<R>, command: ExportCommand) -> Result<()> {
    let json = board.export_snapshot().to_json_pretty()?;
    match command.path {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} task(s) and {} categories to {}",
                board.tasks().len(),
                board.categories().len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn import<R: Repository>(board: &mut TaskBoard<R>, command: ImportCommand) -> Result<()> {
    let json = fs::read_to_string(&command.path)
        .with_context(|| format!("Failed to read {}", command.path.display()))?;
    let report = board.import_snapshot(&json).await?;
    println!(
        "Imported {} task(s) and {} categories.",
        report.tasks_imported, report.categories_imported
    );
    Ok(())
}
