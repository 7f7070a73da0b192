//! Human-readable problem report protocol, `PR-YYYY-NNNN`.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "PR";

/// Largest sequence that fits the four-digit field.
pub const MAX_SEQUENCE: u32 = 9999;

/// A protocol number identifying a problem report to the citizen.
///
/// ## Validation Rules
///
/// - Exact form `PR-YYYY-NNNN`: literal `PR`, four-digit year, four-digit sequence
/// - Sequence starts at 1; `0000` is rejected
/// - No surrounding text, no lowercase prefix, no extra digits
///
/// ## Examples
///
/// ```rust
/// use ecorota::domain::value_objects::ProblemProtocol;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let protocol = ProblemProtocol::generate(2026, 42)?;
///     assert_eq!(protocol.value(), "PR-2026-0042");
///     assert_eq!(protocol.year(), 2026);
///     assert_eq!(protocol.sequence(), 42);
///
///     assert!(ProblemProtocol::new("XX-2025-0001").is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemProtocol {
    value: String,
    year: u16,
    sequence: u32,
}

impl ProblemProtocol {
    /// Parse an existing protocol string.
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let value = value.as_ref();
        let (year, sequence) = Self::parse_parts(value)?;
        Ok(Self {
            value: value.to_string(),
            year,
            sequence,
        })
    }

    /// Build the protocol for `sequence` within `year`.
    ///
    /// Sequences outside `1..=9999` and years outside `0..=9999` are rejected
    /// rather than widened.
    pub fn generate(year: i32, sequence: u32) -> ValidationResult<Self> {
        let candidate = format!("{}-{:04}-{:04}", PREFIX, year, sequence);

        if !(0..=9999).contains(&year) {
            return Err(ValidationError::invalid_protocol(
                candidate,
                "year must have four digits",
            ));
        }
        if sequence == 0 || sequence > MAX_SEQUENCE {
            return Err(ValidationError::invalid_protocol(
                candidate,
                format!("sequence must be between 1 and {}", MAX_SEQUENCE),
            ));
        }

        Ok(Self {
            value: candidate,
            year: year as u16,
            sequence,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    fn parse_parts(value: &str) -> ValidationResult<(u16, u32)> {
        let invalid = || ValidationError::invalid_protocol(value, "expected format PR-YYYY-NNNN");

        let mut parts = value.split('-');
        let (Some(prefix), Some(year), Some(sequence), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let four_digits = |s: &str| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());
        if prefix != PREFIX || !four_digits(year) || !four_digits(sequence) {
            return Err(invalid());
        }

        let year: u16 = year.parse().map_err(|_| invalid())?;
        let sequence: u32 = sequence.parse().map_err(|_| invalid())?;
        if sequence == 0 {
            return Err(ValidationError::invalid_protocol(
                value,
                "sequence starts at 0001",
            ));
        }

        Ok((year, sequence))
    }
}

impl fmt::Display for ProblemProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for ProblemProtocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProblemProtocol {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<ProblemProtocol> for String {
    fn from(protocol: ProblemProtocol) -> Self {
        protocol.value
    }
}
