//! Repository for the `scores` table.
//!
//! Scores are insert-once: the arrival transaction in
//! `ParkingEventRepo::finish_retrieval` is the only writer, and the
//! `uq_scores_parking_event_id` constraint backstops it.

use memopark_core::scoring::ScoreResult;
use memopark_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::score::Score;

const COLUMNS: &str = "\
    id, parking_event_id, time_factor, landmark_factor, path_performance, \
    peek_penalty, assist_penalty, no_of_landmarks, landmarks_recalled, \
    task_score, is_active, created_at, updated_at";

/// The same column list qualified for joins against `parking_events`.
const JOINED_COLUMNS: &str = "\
    s.id, s.parking_event_id, s.time_factor, s.landmark_factor, \
    s.path_performance, s.peek_penalty, s.assist_penalty, \
    s.no_of_landmarks, s.landmarks_recalled, s.task_score, s.is_active, \
    s.created_at, s.updated_at";

/// Provides read access and transactional insertion for scores.
pub struct ScoreRepo;

impl ScoreRepo {
    pub async fn find_by_event_id(
        pool: &PgPool,
        parking_event_id: DbId,
    ) -> Result<Option<Score>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scores WHERE parking_event_id = $1");
        sqlx::query_as::<_, Score>(&query)
            .bind(parking_event_id)
            .fetch_optional(pool)
            .await
    }

    /// Same lookup inside an open transaction (the arrival path's
    /// compute-once check).
    pub async fn find_by_event_id_tx(
        tx: &mut Transaction<'_, Postgres>,
        parking_event_id: DbId,
    ) -> Result<Option<Score>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scores WHERE parking_event_id = $1");
        sqlx::query_as::<_, Score>(&query)
            .bind(parking_event_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a computed score inside the arrival transaction.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        parking_event_id: DbId,
        result: &ScoreResult,
    ) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores \
                 (parking_event_id, time_factor, landmark_factor, \
                  path_performance, peek_penalty, assist_penalty, \
                  no_of_landmarks, landmarks_recalled, task_score) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(parking_event_id)
            .bind(result.time_factor)
            .bind(result.landmark_factor)
            .bind(result.path_performance)
            .bind(result.peek_penalty)
            .bind(result.assist_penalty)
            .bind(result.no_of_landmarks)
            .bind(result.landmarks_recalled)
            .bind(result.task_score)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a user's scores for sessions whose score has been reviewed,
    /// newest first.
    pub async fn list_watched_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Score>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM scores s \
             JOIN parking_events e ON e.id = s.parking_event_id \
             WHERE e.user_id = $1 AND e.status_id = $2 \
             ORDER BY s.created_at DESC"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(user_id)
            .bind(crate::models::status::ParkingEventStatus::ScoreWatched.id())
            .fetch_all(pool)
            .await
    }
}
