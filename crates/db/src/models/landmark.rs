//! Landmark entity and DTOs.

use memopark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `landmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Landmark {
    pub id: DbId,
    pub parking_event_id: DbId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub distance_from_parking: Option<f64>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
    pub is_achieved: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for one landmark in a `POST /parking/{id}/landmarks` batch.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLandmark {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub distance_from_parking: Option<f64>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
}

/// DTO for `PATCH /parking/{id}/landmarks/{lid}`.
///
/// `is_achieved` only moves false→true: sending `false` leaves an
/// achieved landmark achieved.
#[derive(Debug, Deserialize)]
pub struct UpdateLandmark {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub distance_from_parking: Option<f64>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
    pub is_achieved: Option<bool>,
}
