//! Handlers for the `/users/me` profile resource.

use axum::extract::State;
use axum::Json;
use memopark_core::error::CoreError;
use memopark_db::models::emergency_contact::EmergencyContact;
use memopark_db::models::user::{UpdateUserProfile, UserResponse};
use memopark_db::repositories::{EmergencyContactRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Allowed `text_size` preference values (mirrors the schema CHECK).
const TEXT_SIZES: [&str; 3] = ["small", "medium", "large"];

/// Allowed `icon_size` preference values (mirrors the schema CHECK).
const ICON_SIZES: [&str; 3] = ["default", "medium", "large"];

/// Response body for `GET /users/me`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub emergency_contacts: Vec<EmergencyContact>,
}

/// GET /api/v1/users/me
///
/// The authenticated user's profile, including emergency contacts.
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let user_type = UserRepo::resolve_user_type(&state.pool, user.user_type_id).await?;
    let emergency_contacts = EmergencyContactRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: ProfileResponse {
            user: UserResponse::from_user(user, user_type),
            emergency_contacts,
        },
    }))
}

/// PATCH /api/v1/users/me
///
/// Update profile fields and accessibility preferences.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(text_size) = &input.text_size {
        if !TEXT_SIZES.contains(&text_size.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "text_size must be one of {TEXT_SIZES:?}"
            ))));
        }
    }
    if let Some(icon_size) = &input.icon_size {
        if !ICON_SIZES.contains(&icon_size.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "icon_size must be one of {ICON_SIZES:?}"
            ))));
        }
    }
    if let Some(name) = &input.user_name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "user_name must not be empty".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let user_type = UserRepo::resolve_user_type(&state.pool, user.user_type_id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, user_type),
    }))
}
