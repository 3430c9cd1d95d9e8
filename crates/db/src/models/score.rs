//! Retrieval score entity.
//!
//! Rows are written exactly once per parking event by the arrival
//! transition and never updated afterwards; there is no update DTO.

use memopark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Score {
    pub id: DbId,
    pub parking_event_id: DbId,
    pub time_factor: f64,
    pub landmark_factor: f64,
    pub path_performance: f64,
    pub peek_penalty: i32,
    /// Capped screen-time seconds the assist penalty was computed from.
    pub assist_penalty: i32,
    pub no_of_landmarks: i32,
    pub landmarks_recalled: i32,
    pub task_score: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
