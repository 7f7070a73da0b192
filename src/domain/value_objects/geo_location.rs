//! Geographic coordinate value object.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A validated (latitude, longitude) pair.
///
/// ## Validation Rules
///
/// - Both coordinates must be finite
/// - Latitude within `[-90, 90]`, inclusive
/// - Longitude within `[-180, 180]`, inclusive
///
/// The textual form is `lat,lng`, e.g. `-5.0892,-42.8016`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a new GeoLocation.
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        Self::validate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a location from optional parts; both or neither must be given.
    pub fn from_optional(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> ValidationResult<Option<Self>> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Self::new(lat, lng).map(Some),
            (None, None) => Ok(None),
            (lat, lng) => Err(ValidationError::InvalidGeoLocation {
                latitude: lat.unwrap_or(f64::NAN),
                longitude: lng.unwrap_or(f64::NAN),
                reason: "latitude and longitude must be provided together".to_string(),
            }),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    fn validate(latitude: f64, longitude: f64) -> ValidationResult<()> {
        let invalid = |reason: String| ValidationError::InvalidGeoLocation {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("coordinates must be finite numbers".to_string()));
        }
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(invalid(format!(
                "latitude must be between {} and {}",
                MIN_LATITUDE, MAX_LATITUDE
            )));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(invalid(format!(
                "longitude must be between {} and {}",
                MIN_LONGITUDE, MAX_LONGITUDE
            )));
        }

        Ok(())
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoLocation {
    type Err = ValidationError;

    /// Parse the `lat,lng` textual form.
    fn from_str(s: &str) -> ValidationResult<Self> {
        let unparsable = || ValidationError::InvalidGeoLocation {
            latitude: f64::NAN,
            longitude: f64::NAN,
            reason: format!("cannot parse '{}' as 'lat,lng'", s),
        };

        let (lat, lng) = s.split_once(',').ok_or_else(unparsable)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| unparsable())?;
        let longitude = lng.trim().parse::<f64>().map_err(|_| unparsable())?;
        Self::new(latitude, longitude)
    }
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = ValidationError;

    fn try_from(raw: RawGeoLocation) -> ValidationResult<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}
