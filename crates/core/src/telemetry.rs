//! Coercion of client-reported retrieval telemetry.
//!
//! Mobile clients are loose about numeric types: counts and durations may
//! arrive as JSON numbers or as numeric strings. Absent (or `null`) fields
//! are fine -- the scoring fallbacks handle them -- but a present field that
//! cannot be coerced to a non-negative integer rejects the whole update,
//! naming the field. Screen time arrives in milliseconds and is stored as
//! whole seconds.

use serde_json::Value;

use crate::error::CoreError;

/// Milliseconds per second, for `finalScreenTime` conversion.
const MS_PER_SEC: i64 = 1_000;

/// Telemetry accompanying the `active → retrieving` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalStart {
    /// Client's estimated retrieval time in seconds.
    pub estimated_time_secs: Option<i64>,
}

/// Telemetry accompanying the `retrieving → retrieved` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalFinish {
    /// Total screen-on time during navigation, in whole seconds.
    pub final_screen_time_secs: Option<i64>,
    /// Number of times the user opened the map during navigation.
    pub final_map_view_count: Option<i64>,
}

/// Coerce a JSON value to a non-negative integer.
///
/// Accepts integer numbers and strings containing integers. Floats,
/// non-numeric strings, and negative values are validation errors; `null`
/// counts as absent and returns `Ok(None)`.
pub fn coerce_non_negative_int(
    value: Option<&Value>,
    field: &str,
) -> Result<Option<i64>, CoreError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n >= 0 => Ok(Some(n)),
        _ => Err(CoreError::Validation(format!(
            "{field} must be a non-negative integer"
        ))),
    }
}

/// Parse the optional telemetry of a retrieval-start request.
pub fn parse_retrieval_start(estimated_time: Option<&Value>) -> Result<RetrievalStart, CoreError> {
    Ok(RetrievalStart {
        estimated_time_secs: coerce_non_negative_int(estimated_time, "estimated_time")?,
    })
}

/// Parse the optional telemetry of an arrival request.
///
/// `finalScreenTime` is reported in milliseconds and converted to whole
/// seconds here, before anything is persisted.
pub fn parse_retrieval_finish(
    final_screen_time: Option<&Value>,
    final_map_view_count: Option<&Value>,
) -> Result<RetrievalFinish, CoreError> {
    let screen_time_ms = coerce_non_negative_int(final_screen_time, "finalScreenTime")?;
    let map_view_count = coerce_non_negative_int(final_map_view_count, "finalMapViewCount")?;

    Ok(RetrievalFinish {
        final_screen_time_secs: screen_time_ms.map(|ms| ms / MS_PER_SEC),
        final_map_view_count: map_view_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_integer_numbers() {
        let v = json!(300);
        assert_eq!(
            coerce_non_negative_int(Some(&v), "estimated_time").unwrap(),
            Some(300)
        );
    }

    #[test]
    fn accepts_numeric_strings() {
        let v = json!("42");
        assert_eq!(
            coerce_non_negative_int(Some(&v), "finalMapViewCount").unwrap(),
            Some(42)
        );
    }

    #[test]
    fn absent_and_null_are_none() {
        assert_eq!(
            coerce_non_negative_int(None, "estimated_time").unwrap(),
            None
        );
        let v = Value::Null;
        assert_eq!(
            coerce_non_negative_int(Some(&v), "estimated_time").unwrap(),
            None
        );
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let v = json!("abc");
        let err = coerce_non_negative_int(Some(&v), "finalMapViewCount").unwrap_err();
        assert!(err.to_string().contains("finalMapViewCount"));
    }

    #[test]
    fn rejects_floats_and_negatives() {
        let v = json!(1.5);
        assert!(coerce_non_negative_int(Some(&v), "estimated_time").is_err());
        let v = json!(-1);
        assert!(coerce_non_negative_int(Some(&v), "estimated_time").is_err());
    }

    #[test]
    fn rejects_arrays_and_objects() {
        let v = json!([1]);
        assert!(coerce_non_negative_int(Some(&v), "estimated_time").is_err());
        let v = json!({"secs": 1});
        assert!(coerce_non_negative_int(Some(&v), "estimated_time").is_err());
    }

    #[test]
    fn screen_time_converts_milliseconds_to_seconds() {
        let ms = json!(90_500);
        let parsed = parse_retrieval_finish(Some(&ms), None).unwrap();
        assert_eq!(parsed.final_screen_time_secs, Some(90));
        assert_eq!(parsed.final_map_view_count, None);
    }

    #[test]
    fn malformed_map_view_count_fails_the_whole_parse() {
        let ms = json!(1_000);
        let bad = json!("abc");
        assert!(parse_retrieval_finish(Some(&ms), Some(&bad)).is_err());
    }
}
