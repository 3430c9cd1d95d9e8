//! Parking-event domain enums.
//!
//! The client speaks these values by name (`"active"`, `"retrieving"`, …);
//! [`ParkingStatus::parse`] is the single place an incoming string becomes
//! a typed state, so handlers can reject unknown values before touching
//! anything.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a parking event.
///
/// `Active` is both the initial state and the "resting" state a scored
/// session returns to while its score awaits review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingStatus {
    Active,
    Retrieving,
    Retrieved,
    ScoreWatched,
    Expired,
}

impl ParkingStatus {
    /// The wire name of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Retrieving => "retrieving",
            Self::Retrieved => "retrieved",
            Self::ScoreWatched => "score_watched",
            Self::Expired => "expired",
        }
    }

    /// Parse a client-supplied status name.
    ///
    /// Rejects anything that is not exactly one of the five state names.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "active" => Ok(Self::Active),
            "retrieving" => Ok(Self::Retrieving),
            "retrieved" => Ok(Self::Retrieved),
            "score_watched" => Ok(Self::ScoreWatched),
            "expired" => Ok(Self::Expired),
            other => Err(CoreError::Validation(format!(
                "status must be one of active, retrieving, retrieved, score_watched, expired (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for ParkingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the vehicle was parked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingType {
    Outside,
    InsideBuilding,
}

impl ParkingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::InsideBuilding => "inside_building",
        }
    }

    /// Parse a client-supplied parking type, defaulting to `outside`
    /// when absent.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, CoreError> {
        match value {
            None => Ok(Self::Outside),
            Some("outside") => Ok(Self::Outside),
            Some("inside_building") => Ok(Self::InsideBuilding),
            Some(other) => Err(CoreError::Validation(format!(
                "parking_type must be 'outside' or 'inside_building' (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for ParkingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
