use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    Category, NewCategoryData, NewTaskData, Task, UpdateCategoryData, UpdateTaskData,
};
use async_trait::async_trait;
use uuid::Uuid;

pub mod categories;
pub mod tasks;

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskRepository {
    /// Full collection. Storage failures are logged and yield an empty list.
    async fn list_tasks(&self) -> Vec<Task>;
    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    /// Deleting an unknown id succeeds.
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for category operations
#[async_trait]
pub trait CategoryRepository {
    /// Full collection. Storage failures are logged and yield an empty list.
    async fn list_categories(&self) -> Vec<Category>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, CoreError>;
    async fn create_category(&self, data: NewCategoryData) -> Result<Category, CoreError>;
    async fn update_category(
        &self,
        id: Uuid,
        data: UpdateCategoryData,
    ) -> Result<Category, CoreError>;
    /// Deleting an unknown id succeeds. Tasks referencing the category are
    /// left untouched.
    async fn delete_category(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: TaskRepository + CategoryRepository + Send + Sync {}

impl<T> Repository for T where T: TaskRepository + CategoryRepository + Send + Sync {}

/// SQLite implementation of the repository pattern
#[derive(Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
