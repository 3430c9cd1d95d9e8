//! Route definitions for the `/scores` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::scores;
use crate::state::AppState;

/// Routes mounted at `/scores`.
///
/// ```text
/// GET /   -> list_watched_scores
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(scores::list_watched_scores))
}
