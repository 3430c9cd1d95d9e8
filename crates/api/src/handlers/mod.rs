//! Request handlers, grouped by resource.

pub mod auth;
pub mod emergency_contacts;
pub mod landmarks;
pub mod parking;
pub mod scores;
pub mod users;
