//! Repository for the `users` and `user_types` tables.

use memopark_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUserProfile, User};

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, user_type_id, user_name, date_of_birth, user_email, password_hash, \
    language, text_size, icon_size, high_contrast_mode, is_active, \
    failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Fails with a `uq_users_email` unique violation
    /// if the email is taken.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (user_type_id, user_name, date_of_birth, user_email, password_hash) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.user_type_id)
            .bind(&input.user_name)
            .bind(input.date_of_birth)
            .bind(&input.user_email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Apply a profile patch. `None` fields keep their current value.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 user_name = COALESCE($2, user_name), \
                 date_of_birth = COALESCE($3, date_of_birth), \
                 language = COALESCE($4, language), \
                 text_size = COALESCE($5, text_size), \
                 icon_size = COALESCE($6, icon_size), \
                 high_contrast_mode = COALESCE($7, high_contrast_mode) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.user_name)
            .bind(input.date_of_birth)
            .bind(&input.language)
            .bind(&input.text_size)
            .bind(&input.icon_size)
            .bind(input.high_contrast_mode)
            .fetch_optional(pool)
            .await
    }

    /// Bump the consecutive failed-login counter.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock the account until the given instant.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        locked_until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(locked_until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset lockout state after a successful login.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = 0, locked_until = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Resolve a user-type id to its seeded name.
    pub async fn resolve_user_type(pool: &PgPool, id: i16) -> Result<String, sqlx::Error> {
        let row: (String,) = sqlx::query_as("SELECT name FROM user_types WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
