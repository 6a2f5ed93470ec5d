//! User repository implementation

use sqlx::PgPool;

use super::map_constraint_error;
use crate::models::user::{ProfileUpdate, User};
use crate::utils::errors::AmiHelperError;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the user on first contact, refreshing the username otherwise
    pub async fn upsert_seen(&self, telegram_id: i64, username: Option<String>) -> Result<User, AmiHelperError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, username)
            VALUES ($1, $2)
            ON CONFLICT (telegram_id) DO UPDATE SET username = EXCLUDED.username
            RETURNING telegram_id, username, full_name, academic_group, instagram, is_banned, is_admin, gender
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by Telegram ID
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, AmiHelperError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT telegram_id, username, full_name, academic_group, instagram, is_banned, is_admin, gender FROM users WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Commit all profile fields at once
    pub async fn update_profile(&self, telegram_id: i64, update: ProfileUpdate) -> Result<Option<User>, AmiHelperError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2,
                academic_group = $3,
                instagram = $4,
                gender = $5
            WHERE telegram_id = $1
            RETURNING telegram_id, username, full_name, academic_group, instagram, is_banned, is_admin, gender
            "#,
        )
        .bind(telegram_id)
        .bind(update.full_name)
        .bind(update.academic_group)
        .bind(update.instagram)
        .bind(update.gender)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Insert or overwrite every column of a user
    pub async fn save(&self, user: User) -> Result<User, AmiHelperError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, username, full_name, academic_group, instagram, is_banned, is_admin, gender)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (telegram_id) DO UPDATE SET
                username = EXCLUDED.username,
                full_name = EXCLUDED.full_name,
                academic_group = EXCLUDED.academic_group,
                instagram = EXCLUDED.instagram,
                is_banned = EXCLUDED.is_banned,
                is_admin = EXCLUDED.is_admin,
                gender = EXCLUDED.gender
            RETURNING telegram_id, username, full_name, academic_group, instagram, is_banned, is_admin, gender
            "#,
        )
        .bind(user.telegram_id)
        .bind(user.username)
        .bind(user.full_name)
        .bind(user.academic_group)
        .bind(user.instagram)
        .bind(user.is_banned)
        .bind(user.is_admin)
        .bind(user.gender)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(user)
    }

    /// Delete user, reporting whether a row was removed
    pub async fn delete(&self, telegram_id: i64) -> Result<bool, AmiHelperError> {
        let result = sqlx::query("DELETE FROM users WHERE telegram_id = $1")
            .bind(telegram_id)
            .execute(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// List users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AmiHelperError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT telegram_id, username, full_name, academic_group, instagram, is_banned, is_admin, gender FROM users ORDER BY telegram_id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, AmiHelperError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
