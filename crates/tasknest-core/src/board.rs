//! In-memory task board mirroring the store.
//!
//! [`TaskBoard`] owns both collections and the current view selection, and is
//! the only thing that writes to the repository. Every mutation goes to the
//! store first; the in-memory copy changes only after the store confirms, so
//! a failed write leaves the board exactly as it was.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{
    Category, NewCategoryData, NewTaskData, Task, UpdateCategoryData, UpdateTaskData,
};
use crate::projection::{self, SortOption, StatusFilter, ViewQuery};
use crate::repository::Repository;
use crate::snapshot::{ImportReport, Snapshot};

pub struct TaskBoard<R: Repository> {
    repo: R,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    view: ViewQuery,
}

impl<R: Repository> TaskBoard<R> {
    /// Builds a board from the store's current contents.
    pub async fn load(repo: R) -> Self {
        let tasks = repo.list_tasks().await;
        let categories = repo.list_categories().await;
        tracing::debug!(tasks = tasks.len(), categories = categories.len(), "board loaded");

        Self {
            repo,
            tasks,
            categories,
            view: ViewQuery::default(),
        }
    }

    /// Re-reads both collections from the store, keeping the view selection.
    pub async fn reload(&mut self) {
        self.tasks = self.repo.list_tasks().await;
        self.categories = self.repo.list_categories().await;
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The task's category, or `None` when unset or pointing at a deleted one.
    pub fn category_for(&self, task: &Task) -> Option<&Category> {
        task.category_id.and_then(|id| self.category(id))
    }

    // ------------------------------------------------------------------
    // View selection
    // ------------------------------------------------------------------

    pub fn view(&self) -> &ViewQuery {
        &self.view
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.view.status = status;
    }

    pub fn select_category(&mut self, category: Option<Uuid>) {
        self.view.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.view.sort = sort;
    }

    /// The tasks to display under the current view.
    pub fn visible_tasks(&self, today: NaiveDate) -> Vec<Task> {
        projection::project(&self.tasks, &self.view, today)
    }

    // ------------------------------------------------------------------
    // Task mutations
    // ------------------------------------------------------------------

    pub async fn add_task(&mut self, data: NewTaskData) -> Result<&Task, CoreError> {
        let task = self
            .repo
            .create_task(data)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "add task failed"))?;
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub async fn edit_task(&mut self, id: Uuid, data: UpdateTaskData) -> Result<&Task, CoreError> {
        let updated = self
            .repo
            .update_task(id, data)
            .await
            .inspect_err(|e| tracing::warn!(id = %id, error = %e, "edit task failed"))?;

        let index = match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                self.tasks[index] = updated;
                index
            }
            // Written by someone else since load; adopt the store's copy.
            None => {
                self.tasks.push(updated);
                self.tasks.len() - 1
            }
        };
        Ok(&self.tasks[index])
    }

    /// Flips the completed flag.
    pub async fn toggle_task(&mut self, id: Uuid) -> Result<&Task, CoreError> {
        let completed = self
            .task(id)
            .map(|t| t.completed)
            .ok_or_else(|| CoreError::NotFound(format!("Task {id}")))?;
        self.edit_task(
            id,
            UpdateTaskData {
                completed: Some(!completed),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete_task(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.repo
            .delete_task(id)
            .await
            .inspect_err(|e| tracing::warn!(id = %id, error = %e, "delete task failed"))?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Category mutations
    // ------------------------------------------------------------------

    pub async fn add_category(&mut self, data: NewCategoryData) -> Result<&Category, CoreError> {
        let category = self
            .repo
            .create_category(data)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "add category failed"))?;
        self.categories.push(category);
        Ok(&self.categories[self.categories.len() - 1])
    }

    pub async fn edit_category(
        &mut self,
        id: Uuid,
        data: UpdateCategoryData,
    ) -> Result<&Category, CoreError> {
        let updated = self
            .repo
            .update_category(id, data)
            .await
            .inspect_err(|e| tracing::warn!(id = %id, error = %e, "edit category failed"))?;

        let index = match self.categories.iter().position(|c| c.id == id) {
            Some(index) => {
                self.categories[index] = updated;
                index
            }
            None => {
                self.categories.push(updated);
                self.categories.len() - 1
            }
        };
        Ok(&self.categories[index])
    }

    /// Removes a category. Tasks keep their (now dangling) reference; the
    /// category filter is cleared if it pointed at the removed category.
    pub async fn delete_category(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.repo
            .delete_category(id)
            .await
            .inspect_err(|e| tracing::warn!(id = %id, error = %e, "delete category failed"))?;
        self.categories.retain(|c| c.id != id);
        if self.view.category == Some(id) {
            self.view.category = None;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Bulk export / import
    // ------------------------------------------------------------------

    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::from_collections(&self.tasks, &self.categories)
    }

    /// Imports a JSON snapshot through the normal create operations.
    ///
    /// The whole document is parsed before anything is written. A record that
    /// fails validation stops the batch; records committed before it stay.
    pub async fn import_snapshot(&mut self, json: &str) -> Result<ImportReport, CoreError> {
        let snapshot = Snapshot::from_json(json)?;
        let mut report = ImportReport::default();
        let mut id_map = std::collections::HashMap::new();

        for (index, record) in snapshot.categories.iter().enumerate() {
            let data = record.to_new_category().map_err(|e| {
                CoreError::ImportFormat(format!("category #{}: {}", index + 1, e))
            })?;
            let created_id = self.add_category(data).await?.id;
            if let Some(old_id) = record.id.as_deref().filter(|id| !id.is_empty()) {
                id_map.insert(old_id.to_string(), created_id);
            }
            report.categories_imported += 1;
        }

        for (index, record) in snapshot.tasks.iter().enumerate() {
            let data = record
                .to_new_task(&id_map)
                .map_err(|e| CoreError::ImportFormat(format!("task #{}: {}", index + 1, e)))?;
            self.add_task(data).await?;
            report.tasks_imported += 1;
        }

        tracing::info!(
            tasks = report.tasks_imported,
            categories = report.categories_imported,
            "snapshot imported"
        );
        Ok(report)
    }
}
