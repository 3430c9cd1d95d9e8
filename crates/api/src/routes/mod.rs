pub mod auth;
pub mod emergency_contacts;
pub mod health;
pub mod parking;
pub mod scores;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                           create account (public)
/// /auth/login                              login (public)
/// /auth/refresh                            rotate refresh token (public)
/// /auth/logout                             revoke sessions (auth)
///
/// /users/me                                profile get, patch (auth)
///
/// /emergency-contacts                      list, create (auth)
/// /emergency-contacts/{id}                 update, delete (auth)
///
/// /parking                                 list, create (auth)
/// /parking/{id}                            get, update, delete (auth)
/// /parking/{id}/status                     lifecycle transition (auth)
/// /parking/{id}/landmarks                  list, bulk create (auth)
/// /parking/{id}/landmarks/{landmark_id}    update / achieve (auth)
/// /parking/{id}/score                      get score (auth)
///
/// /scores                                  reviewed scores (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/emergency-contacts", emergency_contacts::router())
        .nest("/parking", parking::router())
        .nest("/scores", scores::router())
}
