//! FAQ category repository implementation

use sqlx::PgPool;

use super::map_constraint_error;
use crate::models::faq::{FaqCategory, FaqCategoryForm};
use crate::utils::errors::AmiHelperError;

#[derive(Clone, Debug)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Top-level categories: no parent and the leaf flag explicitly set
    pub async fn list_roots(&self) -> Result<Vec<FaqCategory>, AmiHelperError> {
        let categories = sqlx::query_as::<_, FaqCategory>(
            r#"
            SELECT id, title, parent_id, leaf_category, category_answer
            FROM faq_categories
            WHERE parent_id IS NULL AND leaf_category IS NOT NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn list_children(&self, parent_id: i64) -> Result<Vec<FaqCategory>, AmiHelperError> {
        let categories = sqlx::query_as::<_, FaqCategory>(
            "SELECT id, title, parent_id, leaf_category, category_answer FROM faq_categories WHERE parent_id = $1 ORDER BY id",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<FaqCategory>, AmiHelperError> {
        let category = sqlx::query_as::<_, FaqCategory>(
            "SELECT id, title, parent_id, leaf_category, category_answer FROM faq_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn create(&self, form: FaqCategoryForm) -> Result<FaqCategory, AmiHelperError> {
        let category = sqlx::query_as::<_, FaqCategory>(
            r#"
            INSERT INTO faq_categories (title, parent_id, leaf_category, category_answer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, parent_id, leaf_category, category_answer
            "#,
        )
        .bind(form.title)
        .bind(form.parent_id)
        .bind(form.leaf_category)
        .bind(form.category_answer)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(category)
    }

    pub async fn update(&self, id: i64, form: FaqCategoryForm) -> Result<Option<FaqCategory>, AmiHelperError> {
        let category = sqlx::query_as::<_, FaqCategory>(
            r#"
            UPDATE faq_categories
            SET title = $2, parent_id = $3, leaf_category = $4, category_answer = $5
            WHERE id = $1
            RETURNING id, title, parent_id, leaf_category, category_answer
            "#,
        )
        .bind(id)
        .bind(form.title)
        .bind(form.parent_id)
        .bind(form.leaf_category)
        .bind(form.category_answer)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(category)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AmiHelperError> {
        let result = sqlx::query("DELETE FROM faq_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<FaqCategory>, AmiHelperError> {
        let categories = sqlx::query_as::<_, FaqCategory>(
            "SELECT id, title, parent_id, leaf_category, category_answer FROM faq_categories ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn count(&self) -> Result<i64, AmiHelperError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faq_categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
