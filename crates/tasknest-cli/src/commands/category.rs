use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use tasknest_core::board::TaskBoard;
use tasknest_core::error::CoreError;
use tasknest_core::models::{NewCategoryData, UpdateCategoryData};
use tasknest_core::repository::Repository;

use crate::cli::{CategoryCommand, CategorySubcommand};
use crate::commands::delete::confirm;
use crate::util::{resolve_category, short_id};
use crate::views::table::{display_categories, ViewCategory};

pub async fn category_command<R: Repository>(
    board: &mut TaskBoard<R>,
    command: CategoryCommand,
) -> Result<()> {
    match command.command {
        CategorySubcommand::Add(cmd) => {
            let data = NewCategoryData {
                name: cmd.name,
                color: cmd.color,
            };
            data.validate()?;
            let category = board.add_category(data).await?;
            println!(
                "Created category: '{}' ({}) with ID {}",
                category.name,
                category.color,
                short_id(category.id).yellow()
            );
        }
        CategorySubcommand::List => {
            let categories: Vec<ViewCategory> = board
                .categories()
                .iter()
                .map(|c| ViewCategory::from_category(c, board.tasks()))
                .collect();
            display_categories(&categories);
        }
        CategorySubcommand::Edit(cmd) => {
            let category_id = resolve_category(board, &cmd.category)?;
            let data = UpdateCategoryData {
                name: cmd.name,
                color: cmd.color,
            };
            if data.is_empty() {
                return Err(anyhow!(CoreError::Validation(
                    "No changes given. Use --name or --color.".to_string()
                )));
            }
            data.validate()?;
            let category = board.edit_category(category_id, data).await?;
            println!("Updated category: '{}' ({})", category.name, category.color);
        }
        CategorySubcommand::Delete(cmd) => {
            let category_id = resolve_category(board, &cmd.category)?;
            let name = board
                .category(category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            let task_count = board
                .tasks()
                .iter()
                .filter(|t| t.category_id == Some(category_id))
                .count();

            if !cmd.force
                && !confirm(format!(
                    "Delete category '{}'? Its {} task(s) are kept.",
                    name, task_count
                ))
            {
                println!("Deletion cancelled.");
                return Ok(());
            }

            board.delete_category(category_id).await?;
            println!("Deleted category: '{}'", name);
        }
    }
    Ok(())
}
