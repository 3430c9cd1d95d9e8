//! Handlers for landmarks nested under `/parking/{id}/landmarks`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use memopark_core::error::CoreError;
use memopark_core::types::DbId;
use memopark_db::models::landmark::{CreateLandmark, UpdateLandmark};
use memopark_db::repositories::{LandmarkRepo, ParkingEventRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /parking/{id}/landmarks`.
#[derive(Debug, Deserialize)]
pub struct AddLandmarksRequest {
    pub landmarks: Vec<CreateLandmark>,
}

/// Verify the event exists and belongs to the caller.
async fn ensure_owned_event(
    pool: &sqlx::PgPool,
    event_id: DbId,
    auth: &AuthUser,
) -> AppResult<()> {
    ParkingEventRepo::find_for_user(pool, event_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parking event",
            id: event_id,
        }))?;
    Ok(())
}

/// POST /api/v1/parking/{id}/landmarks
///
/// Add a batch of landmarks to an owned event. Returns 201 with the
/// created rows; the batch is all-or-nothing.
pub async fn add_landmarks(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<AddLandmarksRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_event(&state.pool, event_id, &auth).await?;

    if input.landmarks.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "landmarks must contain at least one entry".into(),
        )));
    }

    let created = LandmarkRepo::create_many(&state.pool, event_id, &input.landmarks).await?;

    tracing::info!(
        event_id,
        user_id = auth.user_id,
        count = created.len(),
        "Landmarks added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/parking/{id}/landmarks
pub async fn list_landmarks(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_event(&state.pool, event_id, &auth).await?;

    let landmarks = LandmarkRepo::list_for_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: landmarks }))
}

/// PATCH /api/v1/parking/{id}/landmarks/{landmark_id}
///
/// Update a landmark. `is_achieved` moves only false→true -- passing
/// landmarks during retrieval is one-way.
pub async fn update_landmark(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((event_id, landmark_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateLandmark>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_event(&state.pool, event_id, &auth).await?;

    let landmark = LandmarkRepo::update_for_event(&state.pool, landmark_id, event_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Landmark",
            id: landmark_id,
        }))?;

    Ok(Json(DataResponse { data: landmark }))
}
