//! Brazilian postal code (CEP) value object.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const POSTAL_CODE_DIGITS: usize = 8;

/// A validated 8-digit postal code.
///
/// Every non-digit character is stripped before validation, so `64000-000`,
/// `64000000` and `64.000-000` all produce the same value. The canonical value is
/// the bare digit string; [`PostalCode::formatted`] gives the `NNNNN-NNN` form.
///
/// ## Examples
///
/// ```rust
/// use ecorota::domain::value_objects::PostalCode;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let cep = PostalCode::new("64000-000")?;
///     assert_eq!(cep.value(), "64000000");
///     assert_eq!(cep.formatted(), "64000-000");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Create a new PostalCode from any string containing exactly 8 digits.
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let raw = value.as_ref();
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(ValidationError::InvalidPostalCode {
                value: raw.to_string(),
                digits: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// The bare 8-digit value.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// The `NNNNN-NNN` form.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl FromStr for PostalCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}
