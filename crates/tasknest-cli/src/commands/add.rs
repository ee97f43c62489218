use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tasknest_core::board::TaskBoard;
use tasknest_core::models::NewTaskData;
use tasknest_core::repository::Repository;

use crate::cli::AddCommand;
use crate::parser::parse_due_date;
use crate::util::{resolve_category, short_id};

pub async fn add_task<R: Repository>(board: &mut TaskBoard<R>, command: AddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_due_date).transpose()?;
    let category_id = command
        .category
        .as_deref()
        .map(|c| resolve_category(board, c))
        .transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description.unwrap_or_default(),
        category_id,
        due_date,
        completed: false,
    };
    new_task_data.validate()?;

    let added_task = board.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        short_id(added_task.id).yellow()
    );
    if let Some(due) = added_task.due_date {
        println!(
            "  {} Due: {}",
            "→".style(info_style),
            due.format("%Y-%m-%d").to_string().cyan()
        );
    }

    Ok(())
}
