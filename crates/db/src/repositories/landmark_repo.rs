//! Repository for the `landmarks` table.

use memopark_core::types::DbId;
use sqlx::PgPool;

use crate::models::landmark::{CreateLandmark, Landmark, UpdateLandmark};

const COLUMNS: &str = "\
    id, parking_event_id, latitude, longitude, location_name, \
    distance_from_parking, photo_url, photo_s3_key, is_achieved, \
    is_active, created_at, updated_at";

/// Provides CRUD operations for a parking event's landmarks.
pub struct LandmarkRepo;

impl LandmarkRepo {
    /// Insert a batch of landmarks for one event in a single
    /// transaction; either all land or none do.
    pub async fn create_many(
        pool: &PgPool,
        parking_event_id: DbId,
        inputs: &[CreateLandmark],
    ) -> Result<Vec<Landmark>, sqlx::Error> {
        let query = format!(
            "INSERT INTO landmarks \
                 (parking_event_id, latitude, longitude, location_name, \
                  distance_from_parking, photo_url, photo_s3_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let landmark = sqlx::query_as::<_, Landmark>(&query)
                .bind(parking_event_id)
                .bind(input.latitude)
                .bind(input.longitude)
                .bind(&input.location_name)
                .bind(input.distance_from_parking)
                .bind(&input.photo_url)
                .bind(&input.photo_s3_key)
                .fetch_one(&mut *tx)
                .await?;
            created.push(landmark);
        }
        tx.commit().await?;

        Ok(created)
    }

    pub async fn list_for_event(
        pool: &PgPool,
        parking_event_id: DbId,
    ) -> Result<Vec<Landmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM landmarks \
             WHERE parking_event_id = $1 AND is_active \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Landmark>(&query)
            .bind(parking_event_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a patch to one landmark of one event.
    ///
    /// `is_achieved` is monotonic: `OR` with the stored flag means a
    /// landmark can be achieved but never un-achieved.
    pub async fn update_for_event(
        pool: &PgPool,
        id: DbId,
        parking_event_id: DbId,
        input: &UpdateLandmark,
    ) -> Result<Option<Landmark>, sqlx::Error> {
        let query = format!(
            "UPDATE landmarks SET \
                 latitude = COALESCE($3, latitude), \
                 longitude = COALESCE($4, longitude), \
                 location_name = COALESCE($5, location_name), \
                 distance_from_parking = COALESCE($6, distance_from_parking), \
                 photo_url = COALESCE($7, photo_url), \
                 photo_s3_key = COALESCE($8, photo_s3_key), \
                 is_achieved = is_achieved OR COALESCE($9, FALSE) \
             WHERE id = $1 AND parking_event_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Landmark>(&query)
            .bind(id)
            .bind(parking_event_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.location_name)
            .bind(input.distance_from_parking)
            .bind(&input.photo_url)
            .bind(&input.photo_s3_key)
            .bind(input.is_achieved)
            .fetch_optional(pool)
            .await
    }
}
