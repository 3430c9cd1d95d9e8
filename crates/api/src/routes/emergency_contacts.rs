//! Route definitions for the `/emergency-contacts` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::emergency_contacts;
use crate::state::AppState;

/// Routes mounted at `/emergency-contacts`.
///
/// ```text
/// GET    /        -> list_contacts
/// POST   /        -> create_contact
/// PATCH  /{id}    -> update_contact
/// DELETE /{id}    -> delete_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(emergency_contacts::list_contacts).post(emergency_contacts::create_contact),
        )
        .route(
            "/{id}",
            patch(emergency_contacts::update_contact).delete(emergency_contacts::delete_contact),
        )
}
