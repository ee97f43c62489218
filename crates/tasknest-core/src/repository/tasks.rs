use crate::error::CoreError;
use crate::models::{NewTaskData, Task, UpdateTaskData};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, title, description, category_id, due_date, completed, created_at";

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn list_tasks(&self) -> Vec<Task> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at, id");
        match sqlx::query_as::<_, Task>(&sql).fetch_all(self.pool()).await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::error!(error = %e, "failed to read tasks; showing an empty list");
                Vec::new()
            }
        }
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let task = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let task = Task {
            id: Uuid::now_v7(),
            title: data.title,
            description: data.description,
            category_id: data.category_id,
            due_date: data.due_date,
            completed: data.completed,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO tasks (id, title, description, category_id, due_date, completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.category_id)
        .bind(task.due_date)
        .bind(task.completed)
        .bind(task.created_at)
        .execute(self.pool())
        .await?;

        tracing::debug!(id = %task.id, "task created");
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let mut task: Task = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Task {id}")))?;

        data.apply_to(&mut task);

        sqlx::query(
            r#"UPDATE tasks
            SET title = $1, description = $2, category_id = $3, due_date = $4, completed = $5
            WHERE id = $6
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.category_id)
        .bind(task.due_date)
        .bind(task.completed)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = %id, "task updated");
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        tracing::debug!(id = %id, removed = result.rows_affected(), "task delete");
        Ok(())
    }
}
