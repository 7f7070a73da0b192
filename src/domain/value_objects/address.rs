//! Address value object for subscriber residences.
//!
//! An address composes other value objects (postal code, geolocation), so a valid
//! address implies valid parts. Changes go through [`Address::with_changes`], which
//! validates the merged result and leaves the receiver untouched.

use crate::domain::value_objects::{GeoLocation, PostalCode};
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated postal address.
///
/// ## Validation Rules
///
/// - Street is required, trimmed, non-empty
/// - Number is required, trimmed, non-empty
/// - Complement is optional; a blank complement is treated as absent
/// - Postal code and geolocation are optional, already-validated value objects
///
/// ## Examples
///
/// ```rust
/// use ecorota::domain::value_objects::{Address, AddressChanges, PostalCode};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let address = Address::new(
///         "Rua A",
///         "123",
///         Some("Casa"),
///         Some(PostalCode::new("64000-000")?),
///         None,
///     )?;
///     assert_eq!(address.full_address(), "Rua A, 123, Casa - CEP: 64000-000");
///
///     let moved = address.with_changes(AddressChanges {
///         number: Some("456".to_string()),
///         ..Default::default()
///     })?;
///     assert_eq!(moved.number(), "456");
///     assert_eq!(address.number(), "123");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAddress", rename_all = "camelCase")]
pub struct Address {
    street: String,
    number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<PostalCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geo_location: Option<GeoLocation>,
}

/// Partial update for an [`Address`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressChanges {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub postal_code: Option<PostalCode>,
    pub geo_location: Option<GeoLocation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    street: String,
    number: String,
    complement: Option<String>,
    postal_code: Option<PostalCode>,
    geo_location: Option<GeoLocation>,
}

impl Address {
    /// Create a new Address.
    pub fn new(
        street: impl AsRef<str>,
        number: impl AsRef<str>,
        complement: Option<&str>,
        postal_code: Option<PostalCode>,
        geo_location: Option<GeoLocation>,
    ) -> ValidationResult<Self> {
        let street = Self::required(street.as_ref(), "street is required")?;
        let number = Self::required(number.as_ref(), "number is required")?;
        let complement = complement
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Self {
            street,
            number,
            complement,
            postal_code,
            geo_location,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }

    pub fn postal_code(&self) -> Option<&PostalCode> {
        self.postal_code.as_ref()
    }

    pub fn geo_location(&self) -> Option<&GeoLocation> {
        self.geo_location.as_ref()
    }

    pub fn has_geo_location(&self) -> bool {
        self.geo_location.is_some()
    }

    /// Single-line form: `street, number[, complement][ - CEP: NNNNN-NNN]`.
    pub fn full_address(&self) -> String {
        let mut address = format!("{}, {}", self.street, self.number);

        if let Some(complement) = &self.complement {
            address.push_str(", ");
            address.push_str(complement);
        }
        if let Some(postal_code) = &self.postal_code {
            address.push_str(" - CEP: ");
            address.push_str(&postal_code.formatted());
        }

        address
    }

    /// Return a new address with the given fields replaced, re-validated.
    pub fn with_changes(&self, changes: AddressChanges) -> ValidationResult<Self> {
        let complement = changes.complement.or_else(|| self.complement.clone());
        Self::new(
            changes.street.as_deref().unwrap_or(&self.street),
            changes.number.as_deref().unwrap_or(&self.number),
            complement.as_deref(),
            changes.postal_code.or_else(|| self.postal_code.clone()),
            changes.geo_location.or(self.geo_location),
        )
    }

    fn required(value: &str, reason: &str) -> ValidationResult<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::invalid_address(reason));
        }
        Ok(trimmed.to_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_address())
    }
}

impl TryFrom<RawAddress> for Address {
    type Error = ValidationError;

    fn try_from(raw: RawAddress) -> ValidationResult<Self> {
        Self::new(
            raw.street,
            raw.number,
            raw.complement.as_deref(),
            raw.postal_code,
            raw.geo_location,
        )
    }
}
