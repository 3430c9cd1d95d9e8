//! Handlers for the `/parking` resource: event CRUD and the lifecycle
//! status endpoint.
//!
//! The status endpoint is where a retrieval session moves through
//! `active → retrieving → {retrieved | expired}` and where the score is
//! computed on first arrival. All telemetry is validated before any
//! state is touched; the storage layer applies each transition
//! atomically.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use memopark_core::error::CoreError;
use memopark_core::lifecycle::{plan_transition, Transition};
use memopark_core::parking::{ParkingStatus, ParkingType};
use memopark_core::telemetry::{parse_retrieval_finish, parse_retrieval_start};
use memopark_core::types::DbId;
use memopark_db::models::parking_event::{
    CreateParkingEvent, ParkingEvent, ParkingEventResponse, UpdateParkingEvent,
};
use memopark_db::models::score::Score;
use memopark_db::models::status::ParkingLocationType;
use memopark_db::repositories::{ParkingEventRepo, RetrievalOutcome, ScoreRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /parking/{id}/status`.
///
/// Numeric telemetry fields stay as raw JSON here: clients send them as
/// numbers or numeric strings, and coercion (with per-field rejection)
/// happens in `memopark_core::telemetry` before any mutation.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// One of the five state names.
    pub status: String,
    /// Estimated retrieval time in seconds, sent when retrieval starts.
    pub estimated_time: Option<serde_json::Value>,
    /// Total screen-on time in milliseconds, sent on arrival.
    #[serde(rename = "finalScreenTime")]
    pub final_screen_time: Option<serde_json::Value>,
    /// Map open count, sent on arrival.
    #[serde(rename = "finalMapViewCount")]
    pub final_map_view_count: Option<serde_json::Value>,
}

/// Response body for the status endpoint: the updated event, plus the
/// score when one exists.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub parking_event: ParkingEventResponse,
    pub score: Option<Score>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an event by id, scoped to the caller.
///
/// A foreign or absent event is a 404 either way; existence is never
/// leaked to non-owners.
async fn find_owned_event(
    pool: &sqlx::PgPool,
    event_id: DbId,
    auth: &AuthUser,
) -> AppResult<ParkingEvent> {
    ParkingEventRepo::find_for_user(pool, event_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parking event",
            id: event_id,
        }))
}

/// Resolve an optional client-supplied parking type name to its lookup
/// id.
fn parking_type_id(value: Option<&str>) -> Result<i16, CoreError> {
    let kind = ParkingType::parse_or_default(value)?;
    Ok(ParkingLocationType::from_domain(kind).id())
}

/// Validate WGS84 coordinates.
fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(
            "latitude must be between -90 and 90".into(),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(
            "longitude must be between -180 and 180".into(),
        ));
    }
    Ok(())
}

fn status_response(
    event: ParkingEvent,
    score: Option<Score>,
) -> AppResult<Json<DataResponse<StatusUpdateResponse>>> {
    Ok(Json(DataResponse {
        data: StatusUpdateResponse {
            parking_event: ParkingEventResponse::from_event(event)?,
            score,
        },
    }))
}

// ---------------------------------------------------------------------------
// Event CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/parking
///
/// Record a new parking event. Returns 201 with the created event in
/// `active` state.
pub async fn create_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateParkingEvent>,
) -> AppResult<impl IntoResponse> {
    validate_coordinates(input.latitude, input.longitude)?;
    let type_id = parking_type_id(input.parking_type.as_deref())?;

    let event = ParkingEventRepo::create(&state.pool, auth.user_id, type_id, &input).await?;

    tracing::info!(event_id = event.id, user_id = auth.user_id, "Parking event created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ParkingEventResponse::from_event(event)?,
        }),
    ))
}

/// GET /api/v1/parking
///
/// The caller's parking events, newest first.
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let events = ParkingEventRepo::list_for_user(&state.pool, auth.user_id).await?;
    let data = events
        .into_iter()
        .map(ParkingEventResponse::from_event)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/parking/{id}
pub async fn get_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = find_owned_event(&state.pool, event_id, &auth).await?;
    Ok(Json(DataResponse {
        data: ParkingEventResponse::from_event(event)?,
    }))
}

/// PATCH /api/v1/parking/{id}
///
/// Update detail fields (names, notes, photo references). Lifecycle
/// state and timestamps only move through the status endpoint.
pub async fn update_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateParkingEvent>,
) -> AppResult<impl IntoResponse> {
    let type_id = match input.parking_type.as_deref() {
        Some(value) => Some(parking_type_id(Some(value))?),
        None => None,
    };

    let event = ParkingEventRepo::update_details(&state.pool, event_id, auth.user_id, type_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parking event",
            id: event_id,
        }))?;

    Ok(Json(DataResponse {
        data: ParkingEventResponse::from_event(event)?,
    }))
}

/// DELETE /api/v1/parking/{id}
///
/// Delete an event; its landmarks and score cascade with it.
pub async fn delete_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ParkingEventRepo::delete_for_user(&state.pool, event_id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Parking event",
            id: event_id,
        }));
    }

    tracing::info!(event_id, user_id = auth.user_id, "Parking event deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// PATCH /api/v1/parking/{id}/status
///
/// Drive the retrieval lifecycle. The requested status is validated
/// first, then telemetry is coerced, and only then does anything mutate;
/// a failure at any point leaves the session exactly as it was.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<StatusUpdateResponse>>> {
    let requested = ParkingStatus::parse(&input.status)?;

    let event = find_owned_event(&state.pool, event_id, &auth).await?;
    let current = event.status()?;
    let existing_score = ScoreRepo::find_by_event_id(&state.pool, event_id).await?;

    match plan_transition(current, requested, existing_score.is_some())? {
        Transition::StartRetrieval => {
            let telemetry = parse_retrieval_start(input.estimated_time.as_ref())?;
            let updated = ParkingEventRepo::start_retrieval(&state.pool, event_id, &telemetry)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Conflict(
                        "Parking event is no longer active".into(),
                    ))
                })?;

            tracing::info!(
                event_id,
                user_id = auth.user_id,
                estimated_time_secs = telemetry.estimated_time_secs,
                "Retrieval started",
            );

            status_response(updated, None)
        }

        Transition::FinishRetrieval => {
            let telemetry = parse_retrieval_finish(
                input.final_screen_time.as_ref(),
                input.final_map_view_count.as_ref(),
            )?;

            match ParkingEventRepo::finish_retrieval(&state.pool, event_id, &telemetry).await? {
                RetrievalOutcome::Scored { event, score } => {
                    tracing::info!(
                        event_id,
                        user_id = auth.user_id,
                        task_score = score.task_score,
                        "Retrieval completed and scored",
                    );
                    status_response(event, Some(score))
                }
                RetrievalOutcome::AlreadyScored { event, score } => {
                    status_response(event, Some(score))
                }
                RetrievalOutcome::InvalidState { .. } => Err(AppError::Core(CoreError::Conflict(
                    "Parking event is not currently being retrieved".into(),
                ))),
            }
        }

        Transition::AlreadyScored => {
            // Idempotent retry of the arrival signal: still reject
            // malformed telemetry, but touch nothing.
            parse_retrieval_finish(
                input.final_screen_time.as_ref(),
                input.final_map_view_count.as_ref(),
            )?;

            let score = existing_score.ok_or_else(|| {
                AppError::InternalError("score vanished during idempotent retry".into())
            })?;

            status_response(event, Some(score))
        }

        Transition::Expire => {
            let updated = ParkingEventRepo::expire(&state.pool, event_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Conflict(
                        "Parking event is not currently being retrieved".into(),
                    ))
                })?;

            tracing::info!(event_id, user_id = auth.user_id, "Retrieval expired");

            status_response(updated, None)
        }

        Transition::WatchScore => {
            let updated = ParkingEventRepo::mark_score_watched(&state.pool, event_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Conflict(
                        "Parking event cannot move to score_watched from its current state".into(),
                    ))
                })?;

            status_response(updated, existing_score)
        }
    }
}
