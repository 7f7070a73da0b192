//! Email value object.
//!
//! Emails identify subscribers and administrators, so they are normalized once at
//! construction time: surrounding whitespace is trimmed and the address is stored
//! lower-cased. Two emails that differ only by case or surrounding blanks are equal.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated, normalized email address.
///
/// ## Validation Rules
///
/// - Surrounding whitespace is trimmed before any check
/// - Must contain exactly one `@`
/// - Local part and domain part must both be non-empty
/// - Must not contain embedded whitespace
/// - Stored lower-cased
///
/// ## Examples
///
/// ```rust
/// use ecorota::domain::value_objects::Email;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let email = Email::new("  ADMIN@EcoRota.COM ")?;
///     assert_eq!(email.value(), "admin@ecorota.com");
///
///     assert!(Email::new("admin @ecorota.com").is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new Email, normalizing and validating the input.
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let raw = value.as_ref();
        let normalized = raw.trim().to_lowercase();
        Self::validate_format(raw, &normalized)?;
        Ok(Self(normalized))
    }

    /// Get the normalized address.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or("")
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or("")
    }

    fn validate_format(raw: &str, normalized: &str) -> ValidationResult<()> {
        if normalized.is_empty() {
            return Err(ValidationError::invalid_email(raw, "email cannot be empty"));
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_email(
                raw,
                "email cannot contain whitespace",
            ));
        }

        let at_count = normalized.matches('@').count();
        if at_count != 1 {
            return Err(ValidationError::invalid_email(
                raw,
                format!("expected exactly one '@', found {}", at_count),
            ));
        }

        let (local, domain) = normalized.split_once('@').unwrap_or(("", ""));
        if local.is_empty() {
            return Err(ValidationError::invalid_email(raw, "missing local part"));
        }
        if domain.is_empty() {
            return Err(ValidationError::invalid_email(raw, "missing domain"));
        }

        Ok(())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
