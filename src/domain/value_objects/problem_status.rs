//! Lifecycle state of a problem report.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Problem report status.
///
/// A report starts `PENDING`, may move to `IN_ANALYSIS`, and ends `RESOLVED` or
/// `REJECTED`. Only the final states may carry a justification, and it is
/// optional in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProblemStatus {
    #[default]
    Pending,
    InAnalysis,
    Resolved,
    Rejected,
}

impl ProblemStatus {
    pub const ALL: [ProblemStatus; 4] = [
        ProblemStatus::Pending,
        ProblemStatus::InAnalysis,
        ProblemStatus::Resolved,
        ProblemStatus::Rejected,
    ];

    pub fn new(value: &str) -> ValidationResult<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.value() == trimmed)
            .ok_or_else(|| ValidationError::InvalidProblemStatus {
                value: value.to_string(),
                allowed: Self::valid_status().iter().map(|s| s.to_string()).collect(),
            })
    }

    pub fn value(&self) -> &'static str {
        match self {
            ProblemStatus::Pending => "PENDING",
            ProblemStatus::InAnalysis => "IN_ANALYSIS",
            ProblemStatus::Resolved => "RESOLVED",
            ProblemStatus::Rejected => "REJECTED",
        }
    }

    pub fn valid_status() -> Vec<&'static str> {
        Self::ALL.iter().map(ProblemStatus::value).collect()
    }

    /// `RESOLVED` or `REJECTED`.
    pub fn is_final(&self) -> bool {
        matches!(self, ProblemStatus::Resolved | ProblemStatus::Rejected)
    }

    /// Whether a justification may be attached in this state.
    pub fn allows_justification(&self) -> bool {
        self.is_final()
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for ProblemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProblemStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(&value)
    }
}

impl From<ProblemStatus> for String {
    fn from(status: ProblemStatus) -> Self {
        status.value().to_string()
    }
}
