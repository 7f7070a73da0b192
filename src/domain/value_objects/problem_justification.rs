//! Administrator's justification when closing a problem report.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_JUSTIFICATION_LENGTH: usize = 10;
pub const MAX_JUSTIFICATION_LENGTH: usize = 500;

/// A trimmed justification of 10 to 500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemJustification(String);

impl ProblemJustification {
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let trimmed = value.as_ref().trim();
        let length = trimmed.chars().count();

        if !(MIN_JUSTIFICATION_LENGTH..=MAX_JUSTIFICATION_LENGTH).contains(&length) {
            return Err(ValidationError::InvalidProblemJustification {
                length,
                min: MIN_JUSTIFICATION_LENGTH,
                max: MAX_JUSTIFICATION_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemJustification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProblemJustification {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<ProblemJustification> for String {
    fn from(justification: ProblemJustification) -> Self {
        justification.0
    }
}
