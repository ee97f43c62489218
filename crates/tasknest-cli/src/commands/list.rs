use anyhow::Result;
use tasknest_core::board::TaskBoard;
use tasknest_core::repository::Repository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::{resolve_category, today};
use crate::views::table::{display_tasks, ViewTask};

/// Applies the command's view selection (falling back to the configured
/// defaults) and prints the resulting projection.
pub fn list_tasks<R: Repository>(
    board: &mut TaskBoard<R>,
    command: ListCommand,
    config: &Config,
) -> Result<()> {
    board.set_status_filter(command.status.unwrap_or(config.default_status));
    board.set_sort(command.sort.unwrap_or(config.default_sort));
    board.set_search(command.search.unwrap_or_default());
    let category = command
        .category
        .as_deref()
        .map(|c| resolve_category(board, c))
        .transpose()?;
    board.select_category(category);

    print_visible(board);
    Ok(())
}

pub fn print_visible<R: Repository>(board: &TaskBoard<R>) {
    let today = today();
    let view_tasks: Vec<ViewTask> = board
        .visible_tasks(today)
        .iter()
        .map(|t| ViewTask::from_task(board, t, today))
        .collect();

    display_tasks(&view_tasks);
}
