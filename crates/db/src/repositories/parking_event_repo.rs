//! Repository for the `parking_events` table and the retrieval lifecycle.
//!
//! Lifecycle transitions are single atomic statements guarded by the
//! current status, or (for arrival) one transaction that locks the event
//! row, so concurrent signals for the same session serialize instead of
//! double-applying.

use memopark_core::scoring::{compute_score, ScoreInput};
use memopark_core::telemetry::{RetrievalFinish, RetrievalStart};
use memopark_core::types::DbId;
use sqlx::PgPool;

use crate::models::parking_event::{CreateParkingEvent, ParkingEvent, UpdateParkingEvent};
use crate::models::score::Score;
use crate::models::status::{ParkingEventStatus, StatusId};
use crate::repositories::score_repo::ScoreRepo;

/// Column list for `parking_events` queries.
const COLUMNS: &str = "\
    id, user_id, latitude, longitude, location_name, address, \
    parking_type_id, level_floor, parking_slot, notes, photo_url, \
    photo_s3_key, started_at, navigation_started_at, ended_at, \
    estimated_time_secs, final_screen_time_secs, final_map_view_count, \
    status_id, is_active, created_at, updated_at";

/// Result of the arrival transition.
#[derive(Debug)]
pub enum RetrievalOutcome {
    /// First arrival: telemetry stored, score computed and inserted,
    /// session back at `active`.
    Scored { event: ParkingEvent, score: Score },
    /// A score already existed; nothing was touched.
    AlreadyScored { event: ParkingEvent, score: Score },
    /// The session was not in `retrieving` when the transaction looked
    /// (a concurrent transition won). Nothing was touched.
    InvalidState { status_id: StatusId },
}

/// Provides CRUD and lifecycle operations for parking events.
pub struct ParkingEventRepo;

impl ParkingEventRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        parking_type_id: StatusId,
        input: &CreateParkingEvent,
    ) -> Result<ParkingEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO parking_events \
                 (user_id, latitude, longitude, location_name, address, \
                  parking_type_id, level_floor, parking_slot, notes, \
                  photo_url, photo_s3_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(user_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.location_name)
            .bind(&input.address)
            .bind(parking_type_id)
            .bind(&input.level_floor)
            .bind(&input.parking_slot)
            .bind(&input.notes)
            .bind(&input.photo_url)
            .bind(&input.photo_s3_key)
            .fetch_one(pool)
            .await
    }

    /// Find an event by id, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ParkingEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking_events WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's events, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ParkingEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parking_events \
             WHERE user_id = $1 AND is_active \
             ORDER BY started_at DESC"
        );
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a detail patch, scoped to the owner. Lifecycle columns are
    /// untouchable here.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        parking_type_id: Option<StatusId>,
        input: &UpdateParkingEvent,
    ) -> Result<Option<ParkingEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_events SET \
                 location_name = COALESCE($3, location_name), \
                 address = COALESCE($4, address), \
                 parking_type_id = COALESCE($5, parking_type_id), \
                 level_floor = COALESCE($6, level_floor), \
                 parking_slot = COALESCE($7, parking_slot), \
                 notes = COALESCE($8, notes), \
                 photo_url = COALESCE($9, photo_url), \
                 photo_s3_key = COALESCE($10, photo_s3_key) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.location_name)
            .bind(&input.address)
            .bind(parking_type_id)
            .bind(&input.level_floor)
            .bind(&input.parking_slot)
            .bind(&input.notes)
            .bind(&input.photo_url)
            .bind(&input.photo_s3_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event, scoped to the owner. Landmarks and score go with
    /// it via `ON DELETE CASCADE`.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parking_events WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `active → retrieving`: stamp `navigation_started_at` and store the
    /// client's estimate.
    ///
    /// The status guard in the WHERE clause makes this atomic: a
    /// concurrent transition away from `active` means zero rows update
    /// and `None` comes back.
    pub async fn start_retrieval(
        pool: &PgPool,
        id: DbId,
        telemetry: &RetrievalStart,
    ) -> Result<Option<ParkingEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_events SET \
                 navigation_started_at = NOW(), \
                 estimated_time_secs = COALESCE($2, estimated_time_secs), \
                 status_id = $3 \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(id)
            .bind(telemetry.estimated_time_secs.map(|s| s as i32))
            .bind(ParkingEventStatus::Retrieving.id())
            .bind(ParkingEventStatus::Active.id())
            .fetch_optional(pool)
            .await
    }

    /// `retrieving → retrieved`: the arrival transition.
    ///
    /// One transaction: lock the event row, bail out idempotently if a
    /// score already exists, otherwise stamp `ended_at` (set-once), store
    /// final telemetry, compute the score from the session's recorded
    /// facts, insert it, and rest the session at `active`. Any failure
    /// rolls the whole thing back.
    pub async fn finish_retrieval(
        pool: &PgPool,
        id: DbId,
        telemetry: &RetrievalFinish,
    ) -> Result<RetrievalOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Serialize concurrent arrival signals on the event row.
        let lock_query = format!("SELECT {COLUMNS} FROM parking_events WHERE id = $1 FOR UPDATE");
        let event = sqlx::query_as::<_, ParkingEvent>(&lock_query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(score) = ScoreRepo::find_by_event_id_tx(&mut tx, id).await? {
            // Compute-once: a retry after scoring changes nothing.
            tx.commit().await?;
            return Ok(RetrievalOutcome::AlreadyScored { event, score });
        }

        if event.status_id != ParkingEventStatus::Retrieving.id() {
            tx.rollback().await?;
            return Ok(RetrievalOutcome::InvalidState {
                status_id: event.status_id,
            });
        }

        let update_query = format!(
            "UPDATE parking_events SET \
                 ended_at = COALESCE(ended_at, NOW()), \
                 final_screen_time_secs = COALESCE($2, final_screen_time_secs), \
                 final_map_view_count = COALESCE($3, final_map_view_count), \
                 status_id = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let event = sqlx::query_as::<_, ParkingEvent>(&update_query)
            .bind(id)
            .bind(telemetry.final_screen_time_secs.map(|s| s as i32))
            .bind(telemetry.final_map_view_count.map(|c| c as i32))
            .bind(ParkingEventStatus::Active.id())
            .fetch_one(&mut *tx)
            .await?;

        let (no_of_landmarks, landmarks_recalled): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_achieved) \
             FROM landmarks WHERE parking_event_id = $1 AND is_active",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let result = compute_score(&ScoreInput {
            no_of_landmarks,
            landmarks_recalled,
            actual_duration_secs: event.retrieval_duration_secs(),
            estimated_duration_secs: event.estimated_time_secs.map(i64::from),
            map_view_count: event.final_map_view_count.map(i64::from).unwrap_or(0),
            screen_time_secs: event.final_screen_time_secs.map(i64::from).unwrap_or(0),
        });

        let score = ScoreRepo::insert_tx(&mut tx, id, &result).await?;

        tx.commit().await?;
        Ok(RetrievalOutcome::Scored { event, score })
    }

    /// `retrieving → expired`: the retrieval window elapsed with no
    /// arrival. Stamps `ended_at` once; never computes a score.
    pub async fn expire(pool: &PgPool, id: DbId) -> Result<Option<ParkingEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_events SET \
                 ended_at = COALESCE(ended_at, NOW()), \
                 status_id = $2 \
             WHERE id = $1 AND status_id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(id)
            .bind(ParkingEventStatus::Expired.id())
            .bind(ParkingEventStatus::Retrieving.id())
            .fetch_optional(pool)
            .await
    }

    /// Move a scored, resting session to `score_watched`.
    pub async fn mark_score_watched(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParkingEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_events SET status_id = $2 \
             WHERE id = $1 AND status_id IN ($3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingEvent>(&query)
            .bind(id)
            .bind(ParkingEventStatus::ScoreWatched.id())
            .bind(ParkingEventStatus::Active.id())
            .bind(ParkingEventStatus::Retrieved.id())
            .fetch_optional(pool)
            .await
    }
}
