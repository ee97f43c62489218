use anyhow::Result;
use dialoguer::Confirm;
use tasknest_core::board::TaskBoard;
use tasknest_core::repository::Repository;

use crate::cli::DeleteCommand;
use crate::util::resolve_task_id;

pub fn confirm(prompt: String) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

pub async fn delete_task<R: Repository>(board: &mut TaskBoard<R>, command: DeleteCommand) -> Result<()> {
    let task_id = resolve_task_id(board, &command.id)?;
    let title = board
        .task(task_id)
        .map(|t| t.title.clone())
        .unwrap_or_default();

    if !command.force && !confirm(format!("Are you sure you want to delete task '{}'?", title)) {
        println!("Deletion cancelled.");
        return Ok(());
    }

    board.delete_task(task_id).await?;
    println!("Deleted task: '{}'", title);
    Ok(())
}
