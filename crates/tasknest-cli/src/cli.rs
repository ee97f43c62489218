use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasknest_core::models::CategoryColor;
use tasknest_core::projection::{SortOption, StatusFilter};

/// Tasknest: a small, local to-do manager for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file to use (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as completed
    Done(TaskIdCommand),
    /// Mark a completed task as active again
    Undo(TaskIdCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Manage categories
    Category(CategoryCommand),
    /// Write all tasks and categories as JSON
    Export(ExportCommand),
    /// Add tasks and categories from a JSON export
    Import(ImportCommand),
    /// Start an interactive session
    Interactive,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The due date (e.g. '2025-03-01', 'tomorrow', 'next friday')
    #[clap(long)]
    pub due: Option<String>,
    /// Category name or ID
    #[clap(short, long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Which tasks to show: all, active or completed
    #[clap(long)]
    pub status: Option<StatusFilter>,
    /// Only tasks in this category (name or ID)
    #[clap(short, long)]
    pub category: Option<String>,
    /// Only tasks whose title contains this text (case-insensitive)
    #[clap(short, long)]
    pub search: Option<String>,
    /// Ordering: none, days-asc, days-desc, alpha-asc or alpha-desc
    #[clap(long)]
    pub sort: Option<SortOption>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "category")]
    pub category_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskIdCommand {
    /// The ID of the task
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Add a new category
    Add(AddCategoryCommand),
    /// List categories
    List,
    /// Rename or recolor a category
    Edit(EditCategoryCommand),
    /// Delete a category (its tasks keep their reference)
    Delete(DeleteCategoryCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCategoryCommand {
    /// The name of the category
    pub name: String,
    /// One of red, green, blue, purple, orange, teal
    #[arg(long, default_value = "red")]
    pub color: CategoryColor,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCategoryCommand {
    /// Category name or ID
    pub category: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<CategoryColor>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCategoryCommand {
    /// Category name or ID
    pub category: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// Output file; standard output when omitted
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// A JSON file produced by `export`
    pub path: PathBuf,
}
