//! Event registration repository implementation

use sqlx::PgPool;

use super::map_constraint_error;
use crate::models::event::Event;
use crate::models::registration::{
    EventRegistration, NewRegistration, RegistrationFilter, RegistrationForm,
    RegistrationSummary, RegistrationWithEvent,
};
use crate::utils::errors::AmiHelperError;

#[derive(Clone, Debug)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration produced by the registration dialogue
    pub async fn create(&self, registration: NewRegistration) -> Result<EventRegistration, AmiHelperError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations (event_id, user_id, is_ami_student, codingame_username,
                                             division, invite_link, member_chat_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                      division, invite_link, member_chat_id
            "#,
        )
        .bind(registration.event_id)
        .bind(registration.user_id)
        .bind(registration.is_ami_student)
        .bind(registration.codingame_username)
        .bind(registration.division)
        .bind(registration.invite_link)
        .bind(registration.member_chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(registration)
    }

    /// Find the registration of a user for an event
    pub async fn find_by_event_and_user(&self, event_id: i64, user_id: i64) -> Result<Option<EventRegistration>, AmiHelperError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                   division, invite_link, member_chat_id
            FROM event_registrations
            WHERE event_id = $1 AND user_id = $2
            ORDER BY id LIMIT 1
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<EventRegistration>, AmiHelperError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                   division, invite_link, member_chat_id
            FROM event_registrations WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Registrations of a user joined with event titles
    pub async fn list_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<RegistrationSummary>, AmiHelperError> {
        let summaries = sqlx::query_as::<_, RegistrationSummary>(
            r#"
            SELECT r.id, e.title AS event_title
            FROM event_registrations r
            JOIN events e ON e.id = r.event_id
            WHERE r.user_id = $1
            ORDER BY r.id
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Flip the approval flag of a still-pending registration
    pub async fn approve_pending(&self, id: i64) -> Result<Option<RegistrationWithEvent>, AmiHelperError> {
        let mut tx = self.pool.begin().await?;

        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            UPDATE event_registrations SET is_approved = TRUE
            WHERE id = $1 AND is_approved = FALSE
            RETURNING id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                      division, invite_link, member_chat_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match registration {
            Some(registration) => {
                let event = Self::event_of(&mut tx, registration.event_id).await?;
                Some(RegistrationWithEvent { registration, event })
            }
            None => None,
        };

        tx.commit().await?;
        Ok(result)
    }

    /// Remove a still-pending registration
    pub async fn delete_pending(&self, id: i64) -> Result<Option<RegistrationWithEvent>, AmiHelperError> {
        let mut tx = self.pool.begin().await?;

        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            DELETE FROM event_registrations
            WHERE id = $1 AND is_approved = FALSE
            RETURNING id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                      division, invite_link, member_chat_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match registration {
            Some(registration) => {
                let event = Self::event_of(&mut tx, registration.event_id).await?;
                Some(RegistrationWithEvent { registration, event })
            }
            None => None,
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn event_of(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: i64,
    ) -> Result<Event, AmiHelperError> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, photo, max_capacity, is_registration_enabled,
                   first_division_invite_link, second_division_invite_link,
                   first_division_chat_id, second_division_chat_id
            FROM events WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AmiHelperError::EventNotFound { event_id })
    }

    /// Approved registration granting membership of a managed chat
    pub async fn find_approved_membership(&self, user_id: i64, chat_id: &str) -> Result<Option<EventRegistration>, AmiHelperError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                   division, invite_link, member_chat_id
            FROM event_registrations
            WHERE user_id = $1 AND member_chat_id = $2 AND is_approved = TRUE
            ORDER BY id LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Insert a registration from the admin panel
    pub async fn insert(&self, form: RegistrationForm) -> Result<EventRegistration, AmiHelperError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations (event_id, user_id, is_ami_student, codingame_username,
                                             is_approved, division, invite_link, member_chat_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                      division, invite_link, member_chat_id
            "#,
        )
        .bind(form.event_id)
        .bind(form.user_id)
        .bind(form.is_ami_student)
        .bind(form.codingame_username)
        .bind(form.is_approved)
        .bind(form.division)
        .bind(form.invite_link)
        .bind(form.member_chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(registration)
    }

    pub async fn update(&self, id: i64, form: RegistrationForm) -> Result<Option<EventRegistration>, AmiHelperError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            UPDATE event_registrations
            SET event_id = $2,
                user_id = $3,
                is_ami_student = $4,
                codingame_username = $5,
                is_approved = $6,
                division = $7,
                invite_link = $8,
                member_chat_id = $9
            WHERE id = $1
            RETURNING id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                      division, invite_link, member_chat_id
            "#,
        )
        .bind(id)
        .bind(form.event_id)
        .bind(form.user_id)
        .bind(form.is_ami_student)
        .bind(form.codingame_username)
        .bind(form.is_approved)
        .bind(form.division)
        .bind(form.invite_link)
        .bind(form.member_chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(registration)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AmiHelperError> {
        let result = sqlx::query("DELETE FROM event_registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List registrations with optional filters and pagination
    pub async fn list(&self, filter: RegistrationFilter, limit: i64, offset: i64) -> Result<Vec<EventRegistration>, AmiHelperError> {
        let registrations = sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT id, event_id, user_id, is_ami_student, codingame_username, is_approved,
                   division, invite_link, member_chat_id
            FROM event_registrations
            WHERE ($1::BIGINT IS NULL OR event_id = $1)
              AND ($2::BOOLEAN IS NULL OR is_approved = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.event_id)
        .bind(filter.is_approved)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn count(&self, filter: RegistrationFilter) -> Result<i64, AmiHelperError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM event_registrations
            WHERE ($1::BIGINT IS NULL OR event_id = $1)
              AND ($2::BOOLEAN IS NULL OR is_approved = $2)
            "#,
        )
        .bind(filter.event_id)
        .bind(filter.is_approved)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
