//! Parking-event entity, DTOs, and the API-facing response view.

use memopark_core::error::CoreError;
use memopark_core::parking::{ParkingStatus, ParkingType};
use memopark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{ParkingEventStatus, ParkingLocationType, StatusId};

/// A row from the `parking_events` table.
#[derive(Debug, Clone, FromRow)]
pub struct ParkingEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub parking_type_id: StatusId,
    pub level_floor: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
    pub started_at: Timestamp,
    pub navigation_started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub estimated_time_secs: Option<i32>,
    pub final_screen_time_secs: Option<i32>,
    pub final_map_view_count: Option<i32>,
    pub status_id: StatusId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ParkingEvent {
    /// Typed lifecycle state of this row.
    ///
    /// An unknown status id means the row and the seeded lookup table
    /// disagree; that is a broken invariant, not caller input.
    pub fn status(&self) -> Result<ParkingStatus, CoreError> {
        ParkingEventStatus::from_id(self.status_id)
            .map(ParkingEventStatus::to_domain)
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "parking event {} has unknown status id {}",
                    self.id, self.status_id
                ))
            })
    }

    /// Retrieval duration in seconds, when both timestamps exist.
    pub fn retrieval_duration_secs(&self) -> Option<i64> {
        match (self.ended_at, self.navigation_started_at) {
            (Some(ended), Some(started)) => Some((ended - started).num_seconds()),
            _ => None,
        }
    }
}

/// DTO for `POST /parking`.
#[derive(Debug, Deserialize)]
pub struct CreateParkingEvent {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: Option<String>,
    pub address: Option<String>,
    /// `"outside"` (default) or `"inside_building"`.
    pub parking_type: Option<String>,
    pub level_floor: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
}

/// DTO for `PATCH /parking/{id}` detail updates. Lifecycle fields are
/// deliberately absent -- those move only through the status endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateParkingEvent {
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub parking_type: Option<String>,
    pub level_floor: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
}

/// API-facing view of a parking event: lookup ids resolved to names.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingEventResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub parking_type: ParkingType,
    pub level_floor: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub photo_s3_key: Option<String>,
    pub started_at: Timestamp,
    pub navigation_started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub estimated_time_secs: Option<i32>,
    pub final_screen_time_secs: Option<i32>,
    pub final_map_view_count: Option<i32>,
    pub status: ParkingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ParkingEventResponse {
    pub fn from_event(event: ParkingEvent) -> Result<Self, CoreError> {
        let status = event.status()?;
        let parking_type = ParkingLocationType::from_id(event.parking_type_id)
            .map(ParkingLocationType::to_domain)
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "parking event {} has unknown parking type id {}",
                    event.id, event.parking_type_id
                ))
            })?;

        Ok(Self {
            id: event.id,
            user_id: event.user_id,
            latitude: event.latitude,
            longitude: event.longitude,
            location_name: event.location_name,
            address: event.address,
            parking_type,
            level_floor: event.level_floor,
            parking_slot: event.parking_slot,
            notes: event.notes,
            photo_url: event.photo_url,
            photo_s3_key: event.photo_s3_key,
            started_at: event.started_at,
            navigation_started_at: event.navigation_started_at,
            ended_at: event.ended_at,
            estimated_time_secs: event.estimated_time_secs,
            final_screen_time_secs: event.final_screen_time_secs,
            final_map_view_count: event.final_map_view_count,
            status,
            created_at: event.created_at,
            updated_at: event.updated_at,
        })
    }
}
