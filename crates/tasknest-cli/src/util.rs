use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use tasknest_core::board::TaskBoard;
use tasknest_core::error::CoreError;
use tasknest_core::repository::Repository;
use uuid::Uuid;

const SHORT_ID_LEN: usize = 8;

/// The displayed form of an identifier. UUIDv7 values share their leading
/// timestamp bits, so the tail is the part that tells records apart.
pub fn short_id(id: Uuid) -> String {
    let simple = id.simple().to_string();
    simple[simple.len() - SHORT_ID_LEN..].to_string()
}

/// Local calendar date used for "days remaining".
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn normalize(input: &str) -> Result<String> {
    let normalized = input.trim().to_lowercase().replace('-', "");
    if normalized.len() < 2 {
        return Err(anyhow!(CoreError::Validation(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    Ok(normalized)
}

fn id_matches(id: Uuid, needle: &str) -> bool {
    let simple = id.simple().to_string();
    simple.starts_with(needle) || simple.ends_with(needle)
}

pub fn resolve_task_id<R: Repository>(board: &TaskBoard<R>, input: &str) -> Result<Uuid> {
    let needle = normalize(input)?;
    let matches: Vec<_> = board
        .tasks()
        .iter()
        .filter(|t| id_matches(t.id, &needle))
        .collect();

    match matches.as_slice() {
        [task] => Ok(task.id),
        [] => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID '{}'",
            input
        )))),
        _ => {
            let task_info = matches
                .into_iter()
                .map(|t| (short_id(t.id), t.title.clone()))
                .collect();
            Err(anyhow!(CoreError::AmbiguousId(task_info)))
        }
    }
}

/// Resolves a category by exact name (case-insensitive) first, then by ID.
pub fn resolve_category<R: Repository>(board: &TaskBoard<R>, input: &str) -> Result<Uuid> {
    let wanted = input.trim();
    if let Some(category) = board
        .categories()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
    {
        return Ok(category.id);
    }

    let not_found = || {
        anyhow!(CoreError::NotFound(format!(
            "No category named or identified by '{}'",
            input
        )))
    };
    let needle = normalize(wanted).map_err(|_| not_found())?;
    let matches: Vec<_> = board
        .categories()
        .iter()
        .filter(|c| id_matches(c.id, &needle))
        .collect();

    match matches.as_slice() {
        [category] => Ok(category.id),
        [] => Err(not_found()),
        _ => {
            let info = matches
                .into_iter()
                .map(|c| (short_id(c.id), c.name.clone()))
                .collect();
            Err(anyhow!(CoreError::AmbiguousId(info)))
        }
    }
}
