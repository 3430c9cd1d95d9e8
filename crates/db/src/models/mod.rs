//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the raw row leaks storage ids, a `Serialize` response view
//!   that speaks the API's state names instead

pub mod emergency_contact;
pub mod landmark;
pub mod parking_event;
pub mod score;
pub mod status;
pub mod user;
