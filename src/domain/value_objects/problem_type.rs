//! Category of a reported problem.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProblemType {
    MissedCollection,
    DamagedBin,
    ScatteredWaste,
    Other,
}

impl ProblemType {
    pub const ALL: [ProblemType; 4] = [
        ProblemType::MissedCollection,
        ProblemType::DamagedBin,
        ProblemType::ScatteredWaste,
        ProblemType::Other,
    ];

    pub fn new(value: &str) -> ValidationResult<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.value() == trimmed)
            .ok_or_else(|| ValidationError::InvalidProblemType {
                value: value.to_string(),
                allowed: Self::valid_types().iter().map(|s| s.to_string()).collect(),
            })
    }

    pub fn value(&self) -> &'static str {
        match self {
            ProblemType::MissedCollection => "Coleta não realizada",
            ProblemType::DamagedBin => "Lixeira danificada",
            ProblemType::ScatteredWaste => "Lixo espalhado",
            ProblemType::Other => "Outros",
        }
    }

    pub fn valid_types() -> Vec<&'static str> {
        Self::ALL.iter().map(ProblemType::value).collect()
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for ProblemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProblemType {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(&value)
    }
}

impl From<ProblemType> for String {
    fn from(kind: ProblemType) -> Self {
        kind.value().to_string()
    }
}
