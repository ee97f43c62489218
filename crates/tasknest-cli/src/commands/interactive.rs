use anyhow::{anyhow, Result};
use dialoguer::{Confirm, Input, Select};
use owo_colors::{OwoColorize, Style};
use tasknest_core::board::TaskBoard;
use tasknest_core::models::{
    Category, CategoryColor, NewCategoryData, NewTaskData, UpdateCategoryData, UpdateTaskData,
};
use tasknest_core::projection::{SortOption, StatusFilter};
use tasknest_core::repository::Repository;
use uuid::Uuid;

use crate::commands::list::print_visible;
use crate::parser::parse_due_date;
use crate::util::{short_id, today};

const MENU: [&str; 11] = [
    "Show tasks",
    "Add task",
    "Toggle completed",
    "Edit task",
    "Delete task",
    "Filter by status",
    "Filter by category",
    "Search",
    "Sort",
    "Categories",
    "Quit",
];

/// Runs a menu loop over one board. Failures are reported and the session
/// continues.
pub async fn run<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    print_visible(board);
    loop {
        let choice = Select::new()
            .with_prompt(view_summary(board))
            .items(&MENU)
            .default(0)
            .interact_opt()?;

        let result = match choice {
            Some(0) => {
                print_visible(board);
                Ok(())
            }
            Some(1) => add_task(board).await,
            Some(2) => toggle_task(board).await,
            Some(3) => edit_task(board).await,
            Some(4) => delete_task(board).await,
            Some(5) => choose_status(board),
            Some(6) => choose_category(board),
            Some(7) => search(board),
            Some(8) => choose_sort(board),
            Some(9) => manage_categories(board).await,
            _ => break,
        };

        if let Err(e) = result {
            eprintln!("{} {}", "Error:".style(Style::new().red().bold()), e);
        }
    }
    Ok(())
}

fn view_summary<R: Repository>(board: &TaskBoard<R>) -> String {
    let view = board.view();
    let category = view
        .category
        .and_then(|id| board.category(id))
        .map(|c| c.name.as_str())
        .unwrap_or("any");
    let search = if view.search.is_empty() {
        String::new()
    } else {
        format!(", search '{}'", view.search)
    };
    format!(
        "[{} | category {} | sort {}{}]",
        view.status, category, view.sort, search
    )
}

fn pick_task<R: Repository>(board: &TaskBoard<R>, prompt: &str) -> Result<Option<Uuid>> {
    let visible = board.visible_tasks(today());
    if visible.is_empty() {
        println!("No tasks in the current view.");
        return Ok(None);
    }
    let labels: Vec<String> = visible
        .iter()
        .map(|t| {
            let mark = if t.completed { "x" } else { " " };
            format!("[{}] {} ({})", mark, t.title, short_id(t.id))
        })
        .collect();
    let index = Select::new().with_prompt(prompt).items(&labels).interact_opt()?;
    Ok(index.map(|i| visible[i].id))
}

fn pick_category<R: Repository>(board: &TaskBoard<R>, prompt: &str, none_label: &str) -> Result<Option<Option<Uuid>>> {
    let mut labels = vec![none_label.to_string()];
    labels.extend(board.categories().iter().map(|c| c.name.clone()));
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(index.map(|i| match i {
        0 => None,
        i => Some(board.categories()[i - 1].id),
    }))
}

/// Category prompt for editing. The first entry keeps the current value and
/// is the default, so pressing Enter never changes the category.
fn pick_category_update<R: Repository>(
    board: &TaskBoard<R>,
    current: Option<Uuid>,
) -> Result<Option<Option<Uuid>>> {
    let current_label = current
        .map(|id| match board.category(id) {
            Some(category) => category.name.clone(),
            None => "deleted category".to_string(),
        })
        .unwrap_or_else(|| "none".to_string());

    let mut labels = vec![format!("(keep: {})", current_label), "(none)".to_string()];
    labels.extend(board.categories().iter().map(|c| c.name.clone()));
    let index = Select::new()
        .with_prompt("Category")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(index.and_then(|i| category_update_at(i, board.categories())))
}

/// Maps a selection from [`pick_category_update`]: `None` keeps the
/// category, `Some(None)` clears it, `Some(Some(id))` sets it.
fn category_update_at(index: usize, categories: &[Category]) -> Option<Option<Uuid>> {
    match index {
        0 => None,
        1 => Some(None),
        i => categories.get(i - 2).map(|c| Some(c.id)),
    }
}

fn prompt_due_date(initial: Option<String>) -> Result<Option<chrono::NaiveDate>> {
    let mut input = Input::<String>::new()
        .with_prompt("Due date (empty for none)")
        .allow_empty(true);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    let raw = input.interact_text()?;
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_due_date(&raw).map(Some)
    }
}

async fn add_task<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let title: String = Input::new().with_prompt("Title").interact_text()?;
    let description: String = Input::new()
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;
    let due_date = prompt_due_date(None)?;
    let category_id = pick_category(board, "Category", "(none)")?.flatten();

    let data = NewTaskData {
        title,
        description,
        category_id,
        due_date,
        completed: false,
    };
    data.validate()?;
    let task = board.add_task(data).await?;
    println!("Created task: '{}'", task.title.green());
    Ok(())
}

async fn toggle_task<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    if let Some(id) = pick_task(board, "Toggle which task?")? {
        let task = board.toggle_task(id).await?;
        let state = if task.completed { "completed" } else { "active" };
        println!("'{}' is now {}.", task.title, state);
    }
    Ok(())
}

async fn edit_task<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let Some(id) = pick_task(board, "Edit which task?")? else {
        return Ok(());
    };
    let current = board
        .task(id)
        .cloned()
        .ok_or_else(|| anyhow!("Task disappeared from the board"))?;

    let title: String = Input::new()
        .with_prompt("Title")
        .with_initial_text(current.title.clone())
        .interact_text()?;
    let description: String = Input::new()
        .with_prompt("Description")
        .with_initial_text(current.description.clone())
        .allow_empty(true)
        .interact_text()?;
    let due_date = prompt_due_date(current.due_date.map(|d| d.format("%Y-%m-%d").to_string()))?;
    let category_id = pick_category_update(board, current.category_id)?;

    let mut data = UpdateTaskData::default();
    if title != current.title {
        data.title = Some(title);
    }
    if description != current.description {
        data.description = Some(description);
    }
    if due_date != current.due_date {
        data.due_date = Some(due_date);
    }
    data.category_id = category_id.filter(|c| *c != current.category_id);

    if data.is_empty() {
        println!("Nothing changed.");
        return Ok(());
    }
    data.validate()?;
    let task = board.edit_task(id, data).await?;
    println!("Updated task: '{}'", task.title);
    Ok(())
}

async fn delete_task<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let Some(id) = pick_task(board, "Delete which task?")? else {
        return Ok(());
    };
    let confirmed = Confirm::new()
        .with_prompt("Are you sure?")
        .default(false)
        .interact()?;
    if confirmed {
        board.delete_task(id).await?;
        println!("Task deleted.");
    }
    Ok(())
}

fn choose_status<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let options = [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed];
    let current = options.iter().position(|s| *s == board.view().status).unwrap_or(0);
    if let Some(i) = Select::new()
        .with_prompt("Show")
        .items(&options)
        .default(current)
        .interact_opt()?
    {
        board.set_status_filter(options[i]);
        print_visible(board);
    }
    Ok(())
}

fn choose_category<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    if let Some(category) = pick_category(board, "Only category", "(all categories)")? {
        board.select_category(category);
        print_visible(board);
    }
    Ok(())
}

fn search<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let text: String = Input::new()
        .with_prompt("Search titles (empty to clear)")
        .with_initial_text(board.view().search.clone())
        .allow_empty(true)
        .interact_text()?;
    board.set_search(text);
    print_visible(board);
    Ok(())
}

fn choose_sort<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let options = [
        SortOption::None,
        SortOption::DaysAsc,
        SortOption::DaysDesc,
        SortOption::AlphaAsc,
        SortOption::AlphaDesc,
    ];
    let current = options.iter().position(|s| *s == board.view().sort).unwrap_or(0);
    if let Some(i) = Select::new()
        .with_prompt("Sort by")
        .items(&options)
        .default(current)
        .interact_opt()?
    {
        board.set_sort(options[i]);
        print_visible(board);
    }
    Ok(())
}

async fn manage_categories<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let actions = ["Add category", "Edit category", "Delete category", "Back"];
    match Select::new().items(&actions).default(0).interact_opt()? {
        Some(0) => {
            let name: String = Input::new().with_prompt("Name").interact_text()?;
            let color = pick_color(CategoryColor::default())?;
            let data = NewCategoryData { name, color };
            data.validate()?;
            let category = board.add_category(data).await?;
            println!("Created category: '{}'", category.name);
        }
        Some(1) => edit_category(board).await?,
        Some(2) => {
            if let Some(Some(id)) = pick_category(board, "Delete which category?", "(cancel)")? {
                board.delete_category(id).await?;
                println!("Category deleted. Its tasks were kept.");
            }
        }
        _ => {}
    }
    Ok(())
}

fn pick_color(current: CategoryColor) -> Result<CategoryColor> {
    let default = CategoryColor::ALL
        .iter()
        .position(|c| *c == current)
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("Color")
        .items(&CategoryColor::ALL)
        .default(default)
        .interact()?;
    Ok(CategoryColor::ALL[index])
}

async fn edit_category<R: Repository>(board: &mut TaskBoard<R>) -> Result<()> {
    let Some(Some(id)) = pick_category(board, "Edit which category?", "(cancel)")? else {
        return Ok(());
    };
    let current = board
        .category(id)
        .cloned()
        .ok_or_else(|| anyhow!("Category disappeared from the board"))?;

    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(current.name.clone())
        .interact_text()?;
    let color = pick_color(current.color)?;

    let data = category_changes(&current, name, color);
    if data.is_empty() {
        println!("Nothing changed.");
        return Ok(());
    }
    data.validate()?;
    let category = board.edit_category(id, data).await?;
    println!("Updated category: '{}' ({})", category.name, category.color);
    Ok(())
}

/// Only the fields that differ from `current`.
fn category_changes(current: &Category, name: String, color: CategoryColor) -> UpdateCategoryData {
    UpdateCategoryData {
        name: (name != current.name).then_some(name),
        color: (color != current.color).then_some(color),
    }
}
