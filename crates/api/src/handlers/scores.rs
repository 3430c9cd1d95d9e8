//! Handlers for score retrieval.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use memopark_core::error::CoreError;
use memopark_core::types::DbId;
use memopark_db::repositories::{ParkingEventRepo, ScoreRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/parking/{id}/score
///
/// The score of an owned event, or 404 if the session has not been
/// scored yet.
pub async fn get_event_score(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ParkingEventRepo::find_for_user(&state.pool, event_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parking event",
            id: event_id,
        }))?;

    let score = ScoreRepo::find_by_event_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Score",
            id: event_id,
        }))?;

    Ok(Json(DataResponse { data: score }))
}

/// GET /api/v1/scores
///
/// The caller's reviewed scores (sessions in `score_watched`), newest
/// first.
pub async fn list_watched_scores(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let scores = ScoreRepo::list_watched_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: scores }))
}
