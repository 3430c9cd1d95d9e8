//! Route definitions for the `/parking` resource and its nested
//! landmarks and score.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{landmarks, parking, scores};
use crate::state::AppState;

/// Routes mounted at `/parking`.
///
/// ```text
/// GET    /                              -> list_events
/// POST   /                              -> create_event
/// GET    /{id}                          -> get_event
/// PATCH  /{id}                          -> update_event
/// DELETE /{id}                          -> delete_event
/// PATCH  /{id}/status                   -> update_status (lifecycle)
/// GET    /{id}/landmarks                -> list_landmarks
/// POST   /{id}/landmarks                -> add_landmarks
/// PATCH  /{id}/landmarks/{landmark_id}  -> update_landmark
/// GET    /{id}/score                    -> get_event_score
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parking::list_events).post(parking::create_event))
        .route(
            "/{id}",
            get(parking::get_event)
                .patch(parking::update_event)
                .delete(parking::delete_event),
        )
        .route("/{id}/status", patch(parking::update_status))
        .route(
            "/{id}/landmarks",
            get(landmarks::list_landmarks).post(landmarks::add_landmarks),
        )
        .route(
            "/{id}/landmarks/{landmark_id}",
            patch(landmarks::update_landmark),
        )
        .route("/{id}/score", get(scores::get_event_score))
}
