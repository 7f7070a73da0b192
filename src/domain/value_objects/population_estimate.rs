//! Neighborhood population estimate.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual form of an absent estimate.
pub const NOT_INFORMED: &str = "Não informado";

/// A non-negative population count, or the explicit "not informed" state.
///
/// Absence is a state of its own and is never conflated with zero: a neighborhood
/// with `Some(0)` has been counted and is empty, one with `None` was never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<i64>", into = "Option<u64>")]
pub struct PopulationEstimate(Option<u64>);

impl PopulationEstimate {
    /// Create an estimate from a count that is already known to be non-negative.
    pub fn new(value: Option<u64>) -> Self {
        Self(value)
    }

    /// The "not informed" state.
    pub fn not_informed() -> Self {
        Self(None)
    }

    /// Create an estimate from a signed integer, rejecting negatives.
    pub fn from_signed(value: Option<i64>) -> ValidationResult<Self> {
        match value {
            None => Ok(Self(None)),
            Some(v) if v < 0 => Err(ValidationError::InvalidPopulationEstimate {
                value: v.to_string(),
                reason: "value cannot be negative".to_string(),
            }),
            Some(v) => Ok(Self(Some(v.unsigned_abs()))),
        }
    }

    /// Create an estimate from an arbitrary number, rejecting negatives and fractions.
    pub fn from_number(value: Option<f64>) -> ValidationResult<Self> {
        let Some(v) = value else {
            return Ok(Self(None));
        };

        let invalid = |reason: &str| ValidationError::InvalidPopulationEstimate {
            value: v.to_string(),
            reason: reason.to_string(),
        };

        if !v.is_finite() || v.fract() != 0.0 {
            return Err(invalid("value must be an integer"));
        }
        if v < 0.0 {
            return Err(invalid("value cannot be negative"));
        }
        // u64::MAX rounds up to 2^64 as a float, which itself does not fit.
        if v >= u64::MAX as f64 {
            return Err(invalid("value is too large"));
        }

        Ok(Self(Some(v as u64)))
    }

    pub fn value(&self) -> Option<u64> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for PopulationEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", NOT_INFORMED),
        }
    }
}

impl TryFrom<Option<i64>> for PopulationEstimate {
    type Error = ValidationError;

    fn try_from(value: Option<i64>) -> ValidationResult<Self> {
        Self::from_signed(value)
    }
}

impl From<PopulationEstimate> for Option<u64> {
    fn from(estimate: PopulationEstimate) -> Self {
        estimate.0
    }
}
