//! Repository for the `emergency_contacts` table.

use memopark_core::types::DbId;
use sqlx::PgPool;

use crate::models::emergency_contact::{
    CreateEmergencyContact, EmergencyContact, UpdateEmergencyContact,
};

const COLUMNS: &str = "\
    id, user_id, contact_name, relation, contact_email, contact_phone, \
    is_allow_alerts, is_primary, is_active, created_at, updated_at";

/// Provides CRUD operations for a user's emergency contacts.
pub struct EmergencyContactRepo;

impl EmergencyContactRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateEmergencyContact,
    ) -> Result<EmergencyContact, sqlx::Error> {
        let query = format!(
            "INSERT INTO emergency_contacts \
                 (user_id, contact_name, relation, contact_email, contact_phone, \
                  is_allow_alerts, is_primary) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyContact>(&query)
            .bind(user_id)
            .bind(&input.contact_name)
            .bind(&input.relation)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(input.is_allow_alerts)
            .bind(input.is_primary)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EmergencyContact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emergency_contacts \
             WHERE user_id = $1 AND is_active \
             ORDER BY is_primary DESC, created_at ASC"
        );
        sqlx::query_as::<_, EmergencyContact>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a contact by id, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<EmergencyContact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emergency_contacts WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, EmergencyContact>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a patch, scoped to the owner. Returns `None` when the
    /// contact does not exist or is not theirs.
    pub async fn update_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateEmergencyContact,
    ) -> Result<Option<EmergencyContact>, sqlx::Error> {
        let query = format!(
            "UPDATE emergency_contacts SET \
                 contact_name = COALESCE($3, contact_name), \
                 relation = COALESCE($4, relation), \
                 contact_email = COALESCE($5, contact_email), \
                 contact_phone = COALESCE($6, contact_phone), \
                 is_allow_alerts = COALESCE($7, is_allow_alerts), \
                 is_primary = COALESCE($8, is_primary) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyContact>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.contact_name)
            .bind(&input.relation)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(input.is_allow_alerts)
            .bind(input.is_primary)
            .fetch_optional(pool)
            .await
    }

    /// Delete a contact, scoped to the owner. Returns whether a row went
    /// away.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM emergency_contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
