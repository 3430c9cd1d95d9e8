//! Parking-event lifecycle rules.
//!
//! `active → retrieving → {retrieved | expired}`. A session that has been
//! scored rests at `active` until the user reviews the score, at which
//! point it moves to `score_watched`. [`plan_transition`] decides what a
//! requested status change means *before* anything is mutated; the storage
//! layer then applies the resulting [`Transition`] atomically.

use crate::error::CoreError;
use crate::parking::ParkingStatus;

/// The effect a validated status change must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `active → retrieving`: stamp `navigation_started_at`, store the
    /// estimated retrieval time if supplied.
    StartRetrieval,
    /// `retrieving → retrieved`: stamp `ended_at` (set-once), store final
    /// telemetry, compute and persist the score, return to `active`.
    FinishRetrieval,
    /// `retrieving → expired`: stamp `ended_at` (set-once), no score.
    Expire,
    /// Review transition into `score_watched`. Requires a score.
    WatchScore,
    /// A retry of the arrival signal on an already-scored session:
    /// succeed without touching anything.
    AlreadyScored,
}

/// Validate a requested status change against the current state.
///
/// `has_score` is whether a Score row already exists for the session; it
/// gates the idempotent-arrival and score-review paths.
pub fn plan_transition(
    current: ParkingStatus,
    requested: ParkingStatus,
    has_score: bool,
) -> Result<Transition, CoreError> {
    use ParkingStatus::*;

    // A second "arrived" signal after scoring is a success no-op,
    // regardless of where the retry found the session.
    if requested == Retrieved && has_score {
        return Ok(Transition::AlreadyScored);
    }

    match (current, requested) {
        (Active, Retrieving) => Ok(Transition::StartRetrieval),
        (Retrieving, Retrieved) => Ok(Transition::FinishRetrieval),
        (Retrieving, Expired) => Ok(Transition::Expire),
        (Active | Retrieved, ScoreWatched) => {
            if has_score {
                Ok(Transition::WatchScore)
            } else {
                Err(CoreError::Conflict(
                    "Cannot mark score as watched: no score exists for this parking event".into(),
                ))
            }
        }
        (from, to) => Err(CoreError::Conflict(format!(
            "Invalid status transition: {from} -> {to}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParkingStatus::*;

    #[test]
    fn active_can_start_retrieval() {
        assert_eq!(
            plan_transition(Active, Retrieving, false).unwrap(),
            Transition::StartRetrieval
        );
    }

    #[test]
    fn retrieving_can_finish() {
        assert_eq!(
            plan_transition(Retrieving, Retrieved, false).unwrap(),
            Transition::FinishRetrieval
        );
    }

    #[test]
    fn retrieving_can_expire() {
        assert_eq!(
            plan_transition(Retrieving, Expired, false).unwrap(),
            Transition::Expire
        );
    }

    #[test]
    fn second_arrival_is_a_noop_after_scoring() {
        // After the first arrival the session rests at `active` with a
        // score; the retry must succeed without re-scoring.
        assert_eq!(
            plan_transition(Active, Retrieved, true).unwrap(),
            Transition::AlreadyScored
        );
        // Even a retry that races the status update is a no-op.
        assert_eq!(
            plan_transition(Retrieving, Retrieved, true).unwrap(),
            Transition::AlreadyScored
        );
    }

    #[test]
    fn scored_session_can_be_reviewed() {
        assert_eq!(
            plan_transition(Active, ScoreWatched, true).unwrap(),
            Transition::WatchScore
        );
        assert_eq!(
            plan_transition(Retrieved, ScoreWatched, true).unwrap(),
            Transition::WatchScore
        );
    }

    #[test]
    fn review_without_score_is_a_conflict() {
        let err = plan_transition(Active, ScoreWatched, false).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn arrival_from_active_without_score_is_rejected() {
        // Never navigated: there is nothing to arrive from.
        assert!(plan_transition(Active, Retrieved, false).is_err());
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        assert!(plan_transition(Expired, Retrieving, false).is_err());
        assert!(plan_transition(ScoreWatched, Retrieving, true).is_err());
        assert!(plan_transition(ScoreWatched, ScoreWatched, true).is_err());
    }

    #[test]
    fn active_cannot_expire_directly() {
        assert!(plan_transition(Active, Expired, false).is_err());
    }
}
