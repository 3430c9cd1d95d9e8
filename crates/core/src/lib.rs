//! Pure domain logic for the MemoPark backend.
//!
//! No I/O lives here: the parking-event state machine, telemetry
//! coercion, and the retrieval score engine are all plain functions over
//! plain data. The `db` and `api` crates drive them.

pub mod error;
pub mod lifecycle;
pub mod parking;
pub mod scoring;
pub mod telemetry;
pub mod types;
