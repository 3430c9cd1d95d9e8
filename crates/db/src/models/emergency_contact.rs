//! Emergency contact entity and DTOs.

use memopark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `emergency_contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmergencyContact {
    pub id: DbId,
    pub user_id: DbId,
    pub contact_name: String,
    pub relation: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_allow_alerts: bool,
    pub is_primary: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an emergency contact (standalone, or inline during
/// registration).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmergencyContact {
    pub contact_name: String,
    pub relation: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub is_allow_alerts: bool,
    #[serde(default)]
    pub is_primary: bool,
}

/// DTO for updating an emergency contact. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEmergencyContact {
    pub contact_name: Option<String>,
    pub relation: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_allow_alerts: Option<bool>,
    pub is_primary: Option<bool>,
}
