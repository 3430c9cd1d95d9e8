//! Schema bootstrap tests: migrations apply cleanly, lookup tables carry
//! their seed data, and the constraints the domain relies on actually
//! hold in the database.

use sqlx::PgPool;

/// Connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn full_bootstrap(pool: PgPool) {
    memopark_db::health_check(&pool).await.unwrap();

    let tables = ["user_types", "parking_event_statuses", "parking_types"];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// The seeded status names match the Rust enums' 1-based ids.
#[sqlx::test(migrations = "../../db/migrations")]
async fn status_seed_order_matches_enums(pool: PgPool) {
    let rows: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM parking_event_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();

    let expected = [
        (1, "active"),
        (2, "retrieving"),
        (3, "retrieved"),
        (4, "score_watched"),
        (5, "expired"),
    ];
    assert_eq!(rows.len(), expected.len());
    for ((id, name), (expected_id, expected_name)) in rows.iter().zip(expected) {
        assert_eq!(*id, expected_id);
        assert_eq!(name, expected_name);
    }
}

/// Helper: insert a user and a parking event, returning the event id.
async fn seed_event(pool: &PgPool) -> i64 {
    let (user_id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (user_type_id, user_name, user_email, password_hash) \
         VALUES (2, 'Seed User', 'seed@example.com', 'not-a-real-hash') \
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let (event_id,): (i64,) = sqlx::query_as(
        "INSERT INTO parking_events (user_id, latitude, longitude) \
         VALUES ($1, 51.5, -0.14) \
         RETURNING id",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();

    event_id
}

/// A second score for the same event violates `uq_scores_parking_event_id`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn second_score_violates_unique_constraint(pool: PgPool) {
    let event_id = seed_event(&pool).await;

    let insert = "INSERT INTO scores \
         (parking_event_id, time_factor, landmark_factor, path_performance, \
          no_of_landmarks, landmarks_recalled, task_score) \
         VALUES ($1, 100, 100, 100, 0, 0, 100)";

    sqlx::query(insert).bind(event_id).execute(&pool).await.unwrap();

    let err = sqlx::query(insert)
        .bind(event_id)
        .execute(&pool)
        .await
        .expect_err("duplicate score insert must fail");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_scores_parking_event_id"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

/// `landmarks_recalled <= no_of_landmarks` is enforced by the schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn recalled_above_total_violates_check(pool: PgPool) {
    let event_id = seed_event(&pool).await;

    let result = sqlx::query(
        "INSERT INTO scores \
         (parking_event_id, time_factor, landmark_factor, path_performance, \
          no_of_landmarks, landmarks_recalled, task_score) \
         VALUES ($1, 100, 100, 100, 2, 3, 100)",
    )
    .bind(event_id)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "recalled > total must be rejected");
}

/// Deleting an event removes its landmarks and score via FK cascade.
#[sqlx::test(migrations = "../../db/migrations")]
async fn event_delete_cascades(pool: PgPool) {
    let event_id = seed_event(&pool).await;

    sqlx::query("INSERT INTO landmarks (parking_event_id, location_name) VALUES ($1, 'corner shop')")
        .bind(event_id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO scores \
         (parking_event_id, time_factor, landmark_factor, path_performance, \
          no_of_landmarks, landmarks_recalled, task_score) \
         VALUES ($1, 100, 100, 100, 1, 1, 100)",
    )
    .bind(event_id)
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("DELETE FROM parking_events WHERE id = $1")
        .bind(event_id)
        .execute(&pool)
        .await
        .unwrap();

    let (landmarks,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM landmarks WHERE parking_event_id = $1")
            .bind(event_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let (scores,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM scores WHERE parking_event_id = $1")
            .bind(event_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(landmarks, 0);
    assert_eq!(scores, 0);
}
