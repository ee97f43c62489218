//! Bulk export/import document.
//!
//! A snapshot is a JSON object with two arrays, `tasks` and `categories`:
//!
//! ```json
//! {
//!   "tasks": [{"id": "…", "title": "Buy milk", "description": "", "category": "",
//!              "dueDate": "2024-07-01", "completed": false}],
//!   "categories": [{"id": "…", "name": "Home", "color": "teal"}]
//! }
//! ```
//!
//! Only `title` (tasks) and `name`/`color` (categories) are required on
//! import. Identifiers in an imported document are never reused.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Category, CategoryColor, NewCategoryData, NewTaskData, Task};
use crate::projection::parse_due_date;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tasks: Vec<SnapshotTask>,
    pub categories: Vec<SnapshotCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub color: String,
}

/// Counts of records committed by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub tasks_imported: usize,
    pub categories_imported: usize,
}

impl Snapshot {
    pub fn from_collections(tasks: &[Task], categories: &[Category]) -> Self {
        Self {
            tasks: tasks.iter().map(SnapshotTask::from).collect(),
            categories: categories.iter().map(SnapshotCategory::from).collect(),
        }
    }

    /// Parses and structurally checks a document. Fails if either array is
    /// missing or any record lacks a required field.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::ImportFormat(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Task> for SnapshotTask {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id.to_string()),
            title: task.title.clone(),
            description: Some(task.description.clone()),
            category: Some(task.category_id.map(|id| id.to_string()).unwrap_or_default()),
            due_date: Some(
                task.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            completed: task.completed,
        }
    }
}

impl From<&Category> for SnapshotCategory {
    fn from(category: &Category) -> Self {
        Self {
            id: Some(category.id.to_string()),
            name: category.name.clone(),
            color: category.color.to_string(),
        }
    }
}

impl SnapshotTask {
    /// Converts to creation data. `category_ids` maps identifiers from the
    /// document to the categories created for them during this import.
    pub fn to_new_task(&self, category_ids: &HashMap<String, Uuid>) -> Result<NewTaskData, String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }

        let category_id = match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match category_ids.get(raw) {
                Some(id) => Some(*id),
                None => match Uuid::parse_str(raw) {
                    Ok(id) => Some(id),
                    Err(_) => {
                        tracing::warn!(category = raw, title = %self.title, "dropping unknown category reference");
                        None
                    }
                },
            },
        };

        let raw_due = self.due_date.as_deref().unwrap_or_default();
        let due_date = parse_due_date(raw_due);
        if due_date.is_none() && !raw_due.trim().is_empty() {
            tracing::warn!(due_date = raw_due, title = %self.title, "ignoring unparsable due date");
        }

        Ok(NewTaskData {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            category_id,
            due_date,
            completed: self.completed,
        })
    }
}

impl SnapshotCategory {
    pub fn to_new_category(&self) -> Result<NewCategoryData, String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        let color: CategoryColor = self.color.parse().map_err(|e| format!("{e}"))?;
        Ok(NewCategoryData {
            name: self.name.clone(),
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_minimal_document_parses() {
        let snapshot = Snapshot::from_json(r#"{"tasks":[{"title":"X"}],"categories":[]}"#).unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        let data = snapshot.tasks[0].to_new_task(&HashMap::new()).unwrap();
        assert_eq!(data.title, "X");
        assert_eq!(data.description, "");
        assert_eq!(data.category_id, None);
        assert_eq!(data.due_date, None);
        assert!(!data.completed);
    }

    #[test]
    fn test_missing_collection_is_rejected() {
        for json in [
            r#"{"tasks":[]}"#,
            r#"{"categories":[]}"#,
            r#"{"tasks":[{"description":"no title"}],"categories":[]}"#,
            r#"{"tasks":[],"categories":[{"name":"Work"}]}"#,
            "not json",
        ] {
            let result = Snapshot::from_json(json);
            assert!(
                matches!(result, Err(CoreError::ImportFormat(_))),
                "expected import error for {json}"
            );
        }
    }

    #[test]
    fn test_original_app_export_is_accepted() {
        let json = r#"{
            "tasks": [{
                "id": "1718000000000", "title": "Pay rent", "description": "",
                "category": "1717000000000", "dueDate": "", "completed": true
            }],
            "categories": [{"id": "1717000000000", "name": "Home", "color": "orange"}]
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();

        let category = snapshot.categories[0].to_new_category().unwrap();
        assert_eq!(category.color, CategoryColor::Orange);

        let home = Uuid::now_v7();
        let ids = HashMap::from([("1717000000000".to_string(), home)]);
        let task = snapshot.tasks[0].to_new_task(&ids).unwrap();
        assert_eq!(task.category_id, Some(home));
        assert_eq!(task.due_date, None);
        assert!(task.completed);
    }

    #[test]
    fn test_unknown_references_and_dates_are_dropped() {
        let record = SnapshotTask {
            title: "Call bank".to_string(),
            category: Some("not-a-uuid".to_string()),
            due_date: Some("someday".to_string()),
            ..Default::default()
        };
        let data = record.to_new_task(&HashMap::new()).unwrap();
        assert_eq!(data.category_id, None);
        assert_eq!(data.due_date, None);

        let dangling = Uuid::now_v7();
        let record = SnapshotTask {
            title: "Dangling".to_string(),
            category: Some(dangling.to_string()),
            ..Default::default()
        };
        assert_eq!(record.to_new_task(&HashMap::new()).unwrap().category_id, Some(dangling));
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let record = SnapshotCategory {
            id: None,
            name: "Work".to_string(),
            color: "#123456".to_string(),
        };
        assert!(record.to_new_category().is_err());
    }

    #[test]
    fn test_export_uses_empty_strings_for_unset_fields() {
        let task = Task {
            title: "Buy milk".to_string(),
            due_date: NaiveDate::from_ymd_opt(2099, 1, 1),
            ..Default::default()
        };
        let json = Snapshot::from_collections(&[task.clone()], &[])
            .to_json_pretty()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let exported = &value["tasks"][0];
        assert_eq!(exported["id"], task.id.to_string());
        assert_eq!(exported["dueDate"], "2099-01-01");
        assert_eq!(exported["category"], "");
        assert_eq!(exported["completed"], false);
        assert!(value["categories"].as_array().unwrap().is_empty());
    }
}
