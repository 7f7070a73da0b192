//! Free-text description attached to a problem report.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// A trimmed description of 10 to 1000 characters.
///
/// Length is counted in Unicode scalar values after trimming, so accented
/// characters count once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemDescription(String);

impl ProblemDescription {
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let trimmed = value.as_ref().trim();
        let length = trimmed.chars().count();

        if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&length) {
            return Err(ValidationError::InvalidProblemDescription {
                length,
                min: MIN_DESCRIPTION_LENGTH,
                max: MAX_DESCRIPTION_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProblemDescription {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProblemDescription {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<ProblemDescription> for String {
    fn from(description: ProblemDescription) -> Self {
        description.0
    }
}
