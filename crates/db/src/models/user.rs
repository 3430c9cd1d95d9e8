//! User entity, accessibility preferences, and refresh-token sessions.

use chrono::NaiveDate;
use memopark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub user_type_id: StatusId,
    pub user_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub user_email: String,
    pub password_hash: String,
    pub language: String,
    pub text_size: String,
    pub icon_size: String,
    pub high_contrast_mode: bool,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Resolved user-type name (e.g. `"user"`, `"admin"`).
    pub user_type: String,
    pub language: String,
    pub text_size: String,
    pub icon_size: String,
    pub high_contrast_mode: bool,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn from_user(user: User, user_type: String) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            user_email: user.user_email,
            date_of_birth: user.date_of_birth,
            user_type,
            language: user.language,
            text_size: user.text_size,
            icon_size: user.icon_size,
            high_contrast_mode: user.high_contrast_mode,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password is hashed before this
/// struct is built.
#[derive(Debug)]
pub struct CreateUser {
    pub user_type_id: StatusId,
    pub user_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub user_email: String,
    pub password_hash: String,
}

/// DTO for `PATCH /users/me`. All fields optional; accessibility
/// preferences are validated against the schema's allowed values by the
/// handler before this reaches the repository.
#[derive(Debug, Deserialize)]
pub struct UpdateUserProfile {
    pub user_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub language: Option<String>,
    pub text_size: Option<String>,
    pub icon_size: Option<String>,
    pub high_contrast_mode: Option<bool>,
}

/// A refresh-token session row from the `user_sessions` table.
///
/// Only the SHA-256 hash of the refresh token is stored, so a database
/// leak does not compromise live sessions.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a refresh-token session.
#[derive(Debug)]
pub struct CreateUserSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
