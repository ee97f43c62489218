use crate::error::CoreError;
use crate::models::{Category, NewCategoryData, UpdateCategoryData};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Vec<Category> {
        let result = sqlx::query_as::<_, Category>(
            "SELECT id, name, color, created_at FROM categories ORDER BY created_at, id",
        )
        .fetch_all(self.pool())
        .await;

        match result {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(error = %e, "failed to read categories; showing an empty list");
                Vec::new()
            }
        }
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, CoreError> {
        let category = sqlx::query_as("SELECT id, name, color, created_at FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(category)
    }

    async fn create_category(&self, data: NewCategoryData) -> Result<Category, CoreError> {
        let category_id = Uuid::now_v7();
        let category = sqlx::query_as(
            r#"INSERT INTO categories (id, name, color, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, color, created_at
            "#,
        )
        .bind(category_id)
        .bind(data.name)
        .bind(data.color)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(id = %category_id, "category created");
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        data: UpdateCategoryData,
    ) -> Result<Category, CoreError> {
        let mut tx = self.pool().begin().await?;

        let mut category: Category =
            sqlx::query_as("SELECT id, name, color, created_at FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("Category {id}")))?;

        data.apply_to(&mut category);

        sqlx::query("UPDATE categories SET name = $1, color = $2 WHERE id = $3")
            .bind(&category.name)
            .bind(category.color)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(id = %id, "category updated");
        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        tracing::debug!(id = %id, removed = result.rows_affected(), "category delete");
        Ok(())
    }
}
