//! Event repository implementation

use sqlx::PgPool;

use super::map_constraint_error;
use crate::models::event::{Event, EventForm};
use crate::utils::errors::AmiHelperError;

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, form: EventForm) -> Result<Event, AmiHelperError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, photo, max_capacity, is_registration_enabled,
                                first_division_invite_link, second_division_invite_link,
                                first_division_chat_id, second_division_chat_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, photo, max_capacity, is_registration_enabled,
                      first_division_invite_link, second_division_invite_link,
                      first_division_chat_id, second_division_chat_id
            "#,
        )
        .bind(form.title)
        .bind(form.description)
        .bind(form.photo)
        .bind(form.max_capacity)
        .bind(form.is_registration_enabled)
        .bind(form.first_division_invite_link)
        .bind(form.second_division_invite_link)
        .bind(form.first_division_chat_id)
        .bind(form.second_division_chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AmiHelperError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, photo, max_capacity, is_registration_enabled,
                   first_division_invite_link, second_division_invite_link,
                   first_division_chat_id, second_division_chat_id
            FROM events WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Events currently accepting registrations
    pub async fn list_registration_open(&self) -> Result<Vec<Event>, AmiHelperError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, photo, max_capacity, is_registration_enabled,
                   first_division_invite_link, second_division_invite_link,
                   first_division_chat_id, second_division_chat_id
            FROM events WHERE is_registration_enabled = TRUE ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Overwrite every editable column
    pub async fn update(&self, id: i64, form: EventForm) -> Result<Option<Event>, AmiHelperError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                photo = $4,
                max_capacity = $5,
                is_registration_enabled = $6,
                first_division_invite_link = $7,
                second_division_invite_link = $8,
                first_division_chat_id = $9,
                second_division_chat_id = $10
            WHERE id = $1
            RETURNING id, title, description, photo, max_capacity, is_registration_enabled,
                      first_division_invite_link, second_division_invite_link,
                      first_division_chat_id, second_division_chat_id
            "#,
        )
        .bind(id)
        .bind(form.title)
        .bind(form.description)
        .bind(form.photo)
        .bind(form.max_capacity)
        .bind(form.is_registration_enabled)
        .bind(form.first_division_invite_link)
        .bind(form.second_division_invite_link)
        .bind(form.first_division_chat_id)
        .bind(form.second_division_chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(event)
    }

    /// Delete event
    pub async fn delete(&self, id: i64) -> Result<bool, AmiHelperError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// List events with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>, AmiHelperError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, photo, max_capacity, is_registration_enabled,
                   first_division_invite_link, second_division_invite_link,
                   first_division_chat_id, second_division_chat_id
            FROM events ORDER BY id LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn count(&self) -> Result<i64, AmiHelperError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
