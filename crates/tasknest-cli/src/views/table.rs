use chrono::{DateTime, NaiveDate, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use tasknest_core::board::TaskBoard;
use tasknest_core::models::{Category, CategoryColor, Task};
use tasknest_core::projection::days_remaining;
use tasknest_core::repository::Repository;
use uuid::Uuid;

use crate::util::short_id;

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub days_left: Option<i64>,
    pub category: Option<(String, CategoryColor)>,
}

impl ViewTask {
    pub fn from_task<R: Repository>(board: &TaskBoard<R>, task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            due_date: task.due_date,
            days_left: days_remaining(task, today),
            category: board
                .category_for(task)
                .map(|c| (c.name.clone(), c.color)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewCategory {
    pub id: Uuid,
    pub name: String,
    pub color: CategoryColor,
    pub task_count: usize,
    pub created_at: DateTime<Utc>,
}

impl ViewCategory {
    pub fn from_category(category: &Category, tasks: &[Task]) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color,
            task_count: tasks
                .iter()
                .filter(|t| t.category_id == Some(category.id))
                .count(),
            created_at: category.created_at,
        }
    }
}

fn color_of(color: CategoryColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb { r, g, b }
}

fn days_left_cell(task: &ViewTask) -> Cell {
    let Some(days) = task.days_left else {
        return Cell::new("-");
    };
    let text = match days {
        0 => "today".to_string(),
        1 => "1 day".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("{d} days"),
    };
    let cell = Cell::new(text);
    if task.completed {
        return cell.fg(Color::DarkGrey);
    }
    match days {
        d if d < 0 => cell.fg(Color::Red),
        0 => cell.fg(Color::Yellow),
        _ => cell,
    }
}

pub fn display_tasks(tasks: &[ViewTask]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Category", "Due", "Days left", "Status"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(task.id)));

        let title_cell = if task.completed {
            Cell::new(&task.title)
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey)
        } else {
            Cell::new(&task.title)
        };
        row.add_cell(title_cell);

        row.add_cell(match &task.category {
            Some((name, color)) => Cell::new(name).fg(color_of(*color)),
            None => Cell::new("-"),
        });

        row.add_cell(Cell::new(
            task.due_date
                .map(|d| d.format("%b %d, %Y").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));
        row.add_cell(days_left_cell(task));

        row.add_cell(if task.completed {
            Cell::new("Completed").fg(Color::Green)
        } else {
            Cell::new("Active")
        });
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_categories(categories: &[ViewCategory]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Color", "Tasks", "Created"]);

    for category in categories {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(category.id)));
        row.add_cell(Cell::new(&category.name).fg(color_of(category.color)));
        row.add_cell(Cell::new(category.color.hex()));
        row.add_cell(Cell::new(category.task_count));
        row.add_cell(Cell::new(category.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}
