use anyhow::{anyhow, Result};
use tasknest_core::board::TaskBoard;
use tasknest_core::error::CoreError;
use tasknest_core::models::UpdateTaskData;
use tasknest_core::repository::Repository;

use crate::cli::EditCommand;
use crate::parser::parse_due_date;
use crate::util::{resolve_category, resolve_task_id};

pub async fn edit_task<R: Repository>(board: &mut TaskBoard<R>, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(board, &command.id)?;

    let due_date = if command.due_clear {
        Some(None)
    } else {
        command
            .due
            .as_deref()
            .map(parse_due_date)
            .transpose()?
            .map(Some)
    };

    let category_id = if command.category_clear {
        Some(None)
    } else {
        command
            .category
            .as_deref()
            .map(|c| resolve_category(board, c))
            .transpose()?
            .map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description: command.description,
        category_id,
        due_date,
        completed: None,
    };

    if update_data.is_empty() {
        return Err(anyhow!(CoreError::Validation(
            "No changes given. Use --title, --description, --due or --category.".to_string()
        )));
    }
    update_data.validate()?;

    let updated = board.edit_task(task_id, update_data).await?;
    println!("Updated task: '{}'", updated.title);
    Ok(())
}
