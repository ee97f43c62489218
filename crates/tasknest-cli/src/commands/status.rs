use anyhow::Result;
use tasknest_core::board::TaskBoard;
use tasknest_core::models::UpdateTaskData;
use tasknest_core::repository::Repository;

use crate::cli::TaskIdCommand;
use crate::util::resolve_task_id;

/// Sets the completed flag. Setting it to its current value is not an error.
pub async fn set_completed<R: Repository>(
    board: &mut TaskBoard<R>,
    command: TaskIdCommand,
    completed: bool,
) -> Result<()> {
    let task_id = resolve_task_id(board, &command.id)?;
    let task = board
        .edit_task(
            task_id,
            UpdateTaskData {
                completed: Some(completed),
                ..Default::default()
            },
        )
        .await?;

    if completed {
        println!("Completed task: '{}'", task.title);
    } else {
        println!("Reopened task: '{}'", task.title);
    }
    Ok(())
}
