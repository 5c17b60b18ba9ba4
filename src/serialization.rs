//! Serialization helpers for range-validated numeric payload fields.
//!
//! Variant payloads carry numeric fields with protocol-mandated ranges
//! (print margins must be non-negative, print scale must be between 0.1
//! and 2.0). Encoding enforces the range through checked setters returning
//! [`RangeError`]; decoding enforces it through `deserialize_with`
//! validators so an out-of-range wire value is rejected, not clamped.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A numeric parameter was set or decoded outside its legal range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RangeError(String);

impl RangeError {
    pub(crate) fn non_negative() -> Self {
        RangeError("Value must be greater than or equal to zero".to_string())
    }

    pub(crate) fn between(min: f64, max: f64) -> Self {
        RangeError(format!("Value must be between {min} and {max}"))
    }
}

/// Validate a value as non-negative, for checked setters.
pub(crate) fn check_non_negative(value: f64) -> Result<f64, RangeError> {
    if value < 0.0 {
        return Err(RangeError::non_negative());
    }
    Ok(value)
}

/// Validate a value as lying in `[min, max]`, for checked setters.
pub(crate) fn check_bounded(value: f64, min: f64, max: f64) -> Result<f64, RangeError> {
    if value < min || value > max {
        return Err(RangeError::between(min, max));
    }
    Ok(value)
}

/// Deserialize an optional float, rejecting negative values.
pub(crate) fn non_negative_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    if let Some(v) = value {
        check_non_negative(v).map_err(serde::de::Error::custom)?;
    }
    Ok(value)
}

/// Deserialize an optional print scale, rejecting values outside [0.1, 2.0].
pub(crate) fn print_scale_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    if let Some(v) = value {
        check_bounded(v, 0.1, 2.0).map_err(serde::de::Error::custom)?;
    }
    Ok(value)
}
