//! Handlers for the `/emergency-contacts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use memopark_core::error::CoreError;
use memopark_core::types::DbId;
use memopark_db::models::emergency_contact::{CreateEmergencyContact, UpdateEmergencyContact};
use memopark_db::repositories::EmergencyContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/emergency-contacts
pub async fn list_contacts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let contacts = EmergencyContactRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// POST /api/v1/emergency-contacts
pub async fn create_contact(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEmergencyContact>,
) -> AppResult<impl IntoResponse> {
    if input.contact_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "contact_name must not be empty".into(),
        )));
    }

    let contact = EmergencyContactRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        contact_id = contact.id,
        user_id = auth.user_id,
        "Emergency contact created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// PATCH /api/v1/emergency-contacts/{id}
pub async fn update_contact(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contact_id): Path<DbId>,
    Json(input): Json<UpdateEmergencyContact>,
) -> AppResult<impl IntoResponse> {
    let contact =
        EmergencyContactRepo::update_for_user(&state.pool, contact_id, auth.user_id, &input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Emergency contact",
                id: contact_id,
            }))?;

    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/emergency-contacts/{id}
pub async fn delete_contact(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contact_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted =
        EmergencyContactRepo::delete_for_user(&state.pool, contact_id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Emergency contact",
            id: contact_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
