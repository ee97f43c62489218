use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Not enforced against the categories table; may dangle after a
    /// category is deleted.
    pub category_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Test fixture only: identifiers come from the store.
#[cfg(test)]
impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            title: String::new(),
            description: String::new(),
            category_id: None,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: CategoryColor,
    pub created_at: DateTime<Utc>,
}

/// The fixed palette a category color is picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    #[default]
    Red,
    Green,
    Blue,
    Purple,
    Orange,
    Teal,
}

impl CategoryColor {
    pub const ALL: [CategoryColor; 6] = [
        CategoryColor::Red,
        CategoryColor::Green,
        CategoryColor::Blue,
        CategoryColor::Purple,
        CategoryColor::Orange,
        CategoryColor::Teal,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            CategoryColor::Red => "#FF6B6B",
            CategoryColor::Green => "#4ECB71",
            CategoryColor::Blue => "#4A9FFF",
            CategoryColor::Purple => "#9B6DFF",
            CategoryColor::Orange => "#FFB84D",
            CategoryColor::Teal => "#4FD1C5",
        }
    }

    /// The color as an `(r, g, b)` triple, for terminals with true color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl std::fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryColor::Red => write!(f, "red"),
            CategoryColor::Green => write!(f, "green"),
            CategoryColor::Blue => write!(f, "blue"),
            CategoryColor::Purple => write!(f, "purple"),
            CategoryColor::Orange => write!(f, "orange"),
            CategoryColor::Teal => write!(f, "teal"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid category color: {0} (expected one of red, green, blue, purple, orange, teal)")]
pub struct ParseCategoryColorError(String);

impl FromStr for CategoryColor {
    type Err = ParseCategoryColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(CategoryColor::Red),
            "green" => Ok(CategoryColor::Green),
            "blue" => Ok(CategoryColor::Blue),
            "purple" => Ok(CategoryColor::Purple),
            "orange" => Ok(CategoryColor::Orange),
            "teal" => Ok(CategoryColor::Teal),
            _ => Err(ParseCategoryColorError(s.to_string())),
        }
    }
}

// ============================================================================
// Data Transfer Objects
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

impl NewTaskData {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("Task title", &self.title)
    }
}

/// Partial update for a task. `None` leaves a field unchanged; for nullable
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Option<Uuid>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
}

impl UpdateTaskData {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.title {
            Some(title) => require_text("Task title", title),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the present fields over `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(category_id) = self.category_id {
            task.category_id = category_id;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewCategoryData {
    pub name: String,
    pub color: CategoryColor,
}

impl NewCategoryData {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("Category name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCategoryData {
    pub name: Option<String>,
    pub color: Option<CategoryColor>,
}

impl UpdateCategoryData {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => require_text("Category name", name),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = self.color {
            category.color = color;
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
