//! Retrieval score engine.
//!
//! A pure function from the recorded facts of a completed retrieval
//! session to its published 0–100 score and sub-factors. The storage
//! layer guarantees the function runs at most once per session; nothing
//! here has side effects.
//!
//! Factor weights and penalty curves are tuned for users with cognitive
//! or memory impairments: landmark recall dominates when landmarks exist,
//! map peeks cost more than raw screen time, and a route without
//! landmarks reweights onto time and path instead of penalizing the user
//! for a route they could not recall landmarks on.

// ---------------------------------------------------------------------------
// Caps and weights
// ---------------------------------------------------------------------------

/// Upper bound on the peek penalty.
const PEEK_PENALTY_CAP: f64 = 10.0;

/// Upper bound on the assist (screen-time) penalty.
const ASSIST_PENALTY_CAP: f64 = 15.0;

/// Assist penalty is one point per 5% of navigation time on screen.
const ASSIST_PCT_PER_POINT: f64 = 5.0;

/// Fallback divisor when no duration is available: one assist point per
/// 20 seconds of reported screen time.
const ASSIST_FALLBACK_SECS_PER_POINT: f64 = 20.0;

/// Weight of the assist penalty inside path performance (the peek
/// penalty applies there at full weight).
const ASSIST_PATH_WEIGHT: f64 = 0.2;

/// Base-score weights when the route has landmarks.
const LANDMARK_WEIGHT: f64 = 0.50;
const TIME_WEIGHT: f64 = 0.30;
const PATH_WEIGHT: f64 = 0.20;

/// Base-score weights when the route has no landmarks.
const NO_LANDMARK_TIME_WEIGHT: f64 = 0.60;
const NO_LANDMARK_PATH_WEIGHT: f64 = 0.40;

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Recorded facts of one completed retrieval session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInput {
    /// Total landmarks on the route.
    pub no_of_landmarks: i64,
    /// Landmarks the user marked achieved during retrieval.
    pub landmarks_recalled: i64,
    /// `ended_at - navigation_started_at`, if both timestamps exist.
    pub actual_duration_secs: Option<i64>,
    /// Client-estimated retrieval time. Values `<= 0` mean "no estimate".
    pub estimated_duration_secs: Option<i64>,
    /// How many times the user opened the map.
    pub map_view_count: i64,
    /// Reported screen-on time in seconds.
    pub screen_time_secs: i64,
}

/// Computed score, ready for persistence.
///
/// `time_factor`, `landmark_factor`, `path_performance`, and `task_score`
/// are rounded to two decimal places. `peek_penalty` is rounded to a
/// whole point; `assist_penalty` stores the capped screen-time seconds
/// the penalty was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub time_factor: f64,
    pub landmark_factor: f64,
    pub path_performance: f64,
    pub peek_penalty: i32,
    pub assist_penalty: i32,
    pub no_of_landmarks: i32,
    pub landmarks_recalled: i32,
    pub task_score: f64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Compute the retrieval score for one session.
///
/// Deterministic and total: absent duration or estimate data takes the
/// fallback paths below rather than failing (malformed input never gets
/// this far -- the boundary rejects it).
pub fn compute_score(input: &ScoreInput) -> ScoreResult {
    let no_landmarks = input.no_of_landmarks == 0;

    // 1. Landmark factor. A route without landmarks scores 100 here and
    //    reweights the base score below.
    let landmark_factor = if no_landmarks {
        100.0
    } else {
        100.0 * input.landmarks_recalled as f64 / input.no_of_landmarks as f64
    };

    let duration = input.actual_duration_secs.filter(|d| *d >= 0);
    let estimate = input.estimated_duration_secs.filter(|e| *e > 0);

    // 2. Time factor: 100 at or under the estimate, then linear falloff
    //    in the overtime ratio. No duration or no estimate scores 0.
    let time_factor = match (duration, estimate) {
        (Some(actual), Some(estimated)) => {
            if actual <= estimated {
                100.0
            } else {
                let overtime_ratio = (actual - estimated) as f64 / estimated as f64;
                (100.0 - 100.0 * overtime_ratio).max(0.0)
            }
        }
        _ => 0.0,
    };

    // 3. Peek penalty, from the raw (uncapped) map-view count.
    let peek_penalty = peek_penalty(input.map_view_count);

    // 4. Assist penalty. Screen time is clamped to the navigation
    //    duration *before* the percentage is taken.
    let (screen_time_secs, assist_penalty) = match duration {
        Some(d) if d > 0 => {
            let clamped = input.screen_time_secs.min(d);
            let assist_pct = 100.0 * clamped as f64 / d as f64;
            (clamped, (assist_pct / ASSIST_PCT_PER_POINT).min(ASSIST_PENALTY_CAP))
        }
        _ => (
            input.screen_time_secs,
            (input.screen_time_secs as f64 / ASSIST_FALLBACK_SECS_PER_POINT).min(ASSIST_PENALTY_CAP),
        ),
    };

    // 5. Path performance: peeks at full weight, assist discounted.
    let path_performance =
        (100.0 - peek_penalty - ASSIST_PATH_WEIGHT * assist_penalty).clamp(0.0, 100.0);

    // 6. Base score.
    let base = if no_landmarks {
        NO_LANDMARK_TIME_WEIGHT * time_factor + NO_LANDMARK_PATH_WEIGHT * path_performance
    } else {
        LANDMARK_WEIGHT * landmark_factor
            + TIME_WEIGHT * time_factor
            + PATH_WEIGHT * path_performance
    };

    // 7. Final score: only the peek penalty is subtracted again at the
    //    top level; the assist penalty already discounted path
    //    performance.
    let task_score = (base - peek_penalty).max(0.0);

    ScoreResult {
        time_factor: round2(time_factor),
        landmark_factor: round2(landmark_factor),
        path_performance: round2(path_performance),
        peek_penalty: peek_penalty.round() as i32,
        assist_penalty: screen_time_secs as i32,
        no_of_landmarks: input.no_of_landmarks as i32,
        landmarks_recalled: input.landmarks_recalled as i32,
        task_score: round2(task_score),
    }
}

/// Piecewise peek penalty in the map-view count.
///
/// Non-decreasing, capped at [`PEEK_PENALTY_CAP`]: free at zero, one
/// point per peek up to 3, 1.5 points per peek up to 7, then half a
/// point per peek until the cap.
fn peek_penalty(map_view_count: i64) -> f64 {
    match map_view_count {
        i64::MIN..=0 => 0.0,
        1..=3 => map_view_count as f64,
        4..=7 => 3.0 + (map_view_count - 3) as f64 * 1.5,
        _ => (9.0 + (map_view_count - 7) as f64 * 0.5).min(PEEK_PENALTY_CAP),
    }
}

/// Round to two decimal places for publication.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ScoreInput {
        ScoreInput {
            no_of_landmarks: 4,
            landmarks_recalled: 4,
            actual_duration_secs: Some(300),
            estimated_duration_secs: Some(300),
            map_view_count: 0,
            screen_time_secs: 0,
        }
    }

    // -- End-to-end scenarios --

    #[test]
    fn perfect_retrieval_scores_100() {
        let result = compute_score(&input());
        assert_eq!(result.landmark_factor, 100.0);
        assert_eq!(result.time_factor, 100.0);
        assert_eq!(result.path_performance, 100.0);
        assert_eq!(result.peek_penalty, 0);
        assert_eq!(result.assist_penalty, 0);
        assert_eq!(result.task_score, 100.0);
    }

    #[test]
    fn no_landmarks_double_overtime_heavy_assist() {
        // No landmarks, 600s against a 300s estimate, 5 peeks, 300s on
        // screen: time factor bottoms out, base reweights onto path.
        let result = compute_score(&ScoreInput {
            no_of_landmarks: 0,
            landmarks_recalled: 0,
            actual_duration_secs: Some(600),
            estimated_duration_secs: Some(300),
            map_view_count: 5,
            screen_time_secs: 300,
        });
        assert_eq!(result.time_factor, 0.0);
        assert_eq!(result.landmark_factor, 100.0);
        assert_eq!(result.peek_penalty, 6);
        assert_eq!(result.assist_penalty, 300);
        assert_eq!(result.path_performance, 92.0);
        assert_eq!(result.task_score, 30.8);
    }

    // -- Landmark factor --

    #[test]
    fn landmark_factor_is_proportional() {
        let result = compute_score(&ScoreInput {
            landmarks_recalled: 1,
            no_of_landmarks: 3,
            ..input()
        });
        assert_eq!(result.landmark_factor, 33.33);
    }

    #[test]
    fn zero_landmarks_reweights_instead_of_zeroing() {
        // Same session facts, one with landmarks fully recalled and one
        // with no landmarks at all: both stay well above zero.
        let no_landmarks = compute_score(&ScoreInput {
            no_of_landmarks: 0,
            landmarks_recalled: 0,
            ..input()
        });
        assert_eq!(no_landmarks.landmark_factor, 100.0);
        // base = 0.6 * 100 + 0.4 * 100
        assert_eq!(no_landmarks.task_score, 100.0);
    }

    // -- Time factor --

    #[test]
    fn time_factor_is_100_at_or_under_estimate() {
        let result = compute_score(&ScoreInput {
            actual_duration_secs: Some(299),
            ..input()
        });
        assert_eq!(result.time_factor, 100.0);
    }

    #[test]
    fn time_factor_falls_linearly_with_overtime() {
        // 450s against 300s: 50% overtime -> 50.
        let result = compute_score(&ScoreInput {
            actual_duration_secs: Some(450),
            ..input()
        });
        assert_eq!(result.time_factor, 50.0);
    }

    #[test]
    fn time_factor_floors_at_zero() {
        let result = compute_score(&ScoreInput {
            actual_duration_secs: Some(900),
            ..input()
        });
        assert_eq!(result.time_factor, 0.0);
    }

    #[test]
    fn missing_duration_zeroes_time_factor() {
        let result = compute_score(&ScoreInput {
            actual_duration_secs: None,
            ..input()
        });
        assert_eq!(result.time_factor, 0.0);
    }

    #[test]
    fn missing_or_non_positive_estimate_zeroes_time_factor() {
        let result = compute_score(&ScoreInput {
            estimated_duration_secs: None,
            ..input()
        });
        assert_eq!(result.time_factor, 0.0);

        let result = compute_score(&ScoreInput {
            estimated_duration_secs: Some(0),
            ..input()
        });
        assert_eq!(result.time_factor, 0.0);
    }

    // -- Peek penalty --

    #[test]
    fn peek_penalty_piecewise_values() {
        assert_eq!(peek_penalty(0), 0.0);
        assert_eq!(peek_penalty(1), 1.0);
        assert_eq!(peek_penalty(3), 3.0);
        assert_eq!(peek_penalty(4), 4.5);
        assert_eq!(peek_penalty(7), 9.0);
        assert_eq!(peek_penalty(8), 9.5);
        assert_eq!(peek_penalty(9), 10.0);
        assert_eq!(peek_penalty(50), 10.0);
    }

    #[test]
    fn peek_penalty_is_monotonic_and_capped() {
        let mut previous = 0.0;
        for m in 0..=40 {
            let p = peek_penalty(m);
            assert!(p >= previous, "penalty decreased at m={m}");
            assert!(p <= PEEK_PENALTY_CAP);
            previous = p;
        }
    }

    // -- Assist penalty --

    #[test]
    fn screen_time_is_clamped_to_duration_before_percentage() {
        // 500s on screen during a 100s retrieval: the stored base is the
        // duration, and the percentage is 100%, not 500%.
        let result = compute_score(&ScoreInput {
            actual_duration_secs: Some(100),
            screen_time_secs: 500,
            ..input()
        });
        assert_eq!(result.assist_penalty, 100);
        // 100% / 5 = 20, capped at 15; path = 100 - 0 - 0.2 * 15.
        assert_eq!(result.path_performance, 97.0);
    }

    #[test]
    fn assist_fallback_without_duration() {
        // No duration data: one point per 20s of raw screen time, and
        // the raw value is stored.
        let result = compute_score(&ScoreInput {
            actual_duration_secs: None,
            screen_time_secs: 100,
            ..input()
        });
        // 100/20 = 5 points; path = 100 - 0 - 0.2 * 5 = 99.
        assert_eq!(result.assist_penalty, 100);
        assert_eq!(result.path_performance, 99.0);
    }

    #[test]
    fn assist_fallback_is_capped() {
        let result = compute_score(&ScoreInput {
            actual_duration_secs: None,
            screen_time_secs: 10_000,
            ..input()
        });
        // 10000/20 = 500, capped at 15; path = 100 - 0.2 * 15 = 97.
        assert_eq!(result.path_performance, 97.0);
    }

    // -- Composition --

    #[test]
    fn peek_penalty_hits_both_path_and_final_score() {
        // 3 peeks: path = 100 - 3 = 97; base = 50 + 30 + 0.2 * 97;
        // final = base - 3.
        let result = compute_score(&ScoreInput {
            map_view_count: 3,
            ..input()
        });
        assert_eq!(result.path_performance, 97.0);
        assert_eq!(result.task_score, 96.4);
    }

    #[test]
    fn task_score_floors_at_zero() {
        let result = compute_score(&ScoreInput {
            no_of_landmarks: 4,
            landmarks_recalled: 0,
            actual_duration_secs: Some(3_000),
            estimated_duration_secs: Some(300),
            map_view_count: 50,
            screen_time_secs: 3_000,
        });
        // base = 0 + 0 + 0.2 * 87 = 17.4; final = max(0, 17.4 - 10).
        assert_eq!(result.task_score, 7.4);

        let result = compute_score(&ScoreInput {
            no_of_landmarks: 1,
            landmarks_recalled: 0,
            actual_duration_secs: Some(3_000),
            estimated_duration_secs: Some(300),
            map_view_count: 50,
            screen_time_secs: 3_000,
        });
        // base = 0.5 * 0 + 0 + 0.2 * 87 = 17.4 again; never negative.
        assert!(result.task_score >= 0.0);
    }

    #[test]
    fn published_factors_are_rounded_to_two_decimals() {
        let result = compute_score(&ScoreInput {
            no_of_landmarks: 3,
            landmarks_recalled: 2,
            ..input()
        });
        // 200/3 = 66.666... -> 66.67
        assert_eq!(result.landmark_factor, 66.67);
    }
}
