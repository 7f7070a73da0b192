//! Kind of collection service a route provides.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collection service kind.
///
/// The canonical values are the Portuguese labels stored and shown by the system
/// (`Coleta regular`, `Coleta seletiva`, `Coleta especial`, `Coleta agendada`).
/// Parsing trims surrounding whitespace but is otherwise exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollectionType {
    Regular,
    Selective,
    Special,
    Scheduled,
}

impl CollectionType {
    pub const ALL: [CollectionType; 4] = [
        CollectionType::Regular,
        CollectionType::Selective,
        CollectionType::Special,
        CollectionType::Scheduled,
    ];

    pub fn new(value: &str) -> ValidationResult<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.value() == trimmed)
            .ok_or_else(|| ValidationError::InvalidCollectionType {
                value: value.to_string(),
                allowed: Self::valid_types().iter().map(|s| s.to_string()).collect(),
            })
    }

    pub fn value(&self) -> &'static str {
        match self {
            CollectionType::Regular => "Coleta regular",
            CollectionType::Selective => "Coleta seletiva",
            CollectionType::Special => "Coleta especial",
            CollectionType::Scheduled => "Coleta agendada",
        }
    }

    /// The allowed canonical values, in declaration order.
    pub fn valid_types() -> Vec<&'static str> {
        Self::ALL.iter().map(CollectionType::value).collect()
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for CollectionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionType {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(&value)
    }
}

impl From<CollectionType> for String {
    fn from(kind: CollectionType) -> Self {
        kind.value().to_string()
    }
}
