//! Daily collection window.

use crate::error::{ValidationError, ValidationResult};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INTERVAL_SEPARATOR: &str = " - ";

/// A validated `[start, end)` window within one day.
///
/// ## Validation Rules
///
/// - Both bounds use the strict `HH:MM` 24-hour form: two-digit hour `00`-`23`,
///   two-digit minute `00`-`59` (`8:00` and `25:00` are rejected)
/// - Start must be strictly before end
///
/// The persistence form is `HH:MM - HH:MM`.
///
/// ## Examples
///
/// ```rust
/// use ecorota::domain::value_objects::CollectionTime;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let window = CollectionTime::new("08:00", "12:00")?;
///     assert_eq!(window.formatted_interval(), "08:00 - 12:00");
///     assert_eq!(window.duration_minutes(), 240);
///
///     assert!(CollectionTime::new("12:00", "06:00").is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionTime {
    start: NaiveTime,
    end: NaiveTime,
}

impl CollectionTime {
    pub fn new(start: &str, end: &str) -> ValidationResult<Self> {
        let start_time = Self::parse_clock(start)?;
        let end_time = Self::parse_clock(end)?;

        if start_time >= end_time {
            return Err(ValidationError::invalid_collection_time(format!(
                "start time {} must be before end time {}",
                start, end
            )));
        }

        Ok(Self {
            start: start_time,
            end: end_time,
        })
    }

    /// Parse the `HH:MM - HH:MM` persistence form.
    pub fn parse_interval(value: &str) -> ValidationResult<Self> {
        let (start, end) = value.split_once(INTERVAL_SEPARATOR).ok_or_else(|| {
            ValidationError::invalid_collection_time(format!(
                "'{}' is not in the 'HH:MM - HH:MM' form",
                value
            ))
        })?;
        Self::new(start.trim(), end.trim())
    }

    /// Start as `HH:MM`.
    pub fn start_time(&self) -> String {
        Self::format_clock(self.start)
    }

    /// End as `HH:MM`.
    pub fn end_time(&self) -> String {
        Self::format_clock(self.end)
    }

    pub fn formatted_interval(&self) -> String {
        format!(
            "{}{}{}",
            self.start_time(),
            INTERVAL_SEPARATOR,
            self.end_time()
        )
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `time` falls inside the window. The end bound is exclusive.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    fn parse_clock(value: &str) -> ValidationResult<NaiveTime> {
        let invalid = || {
            ValidationError::invalid_collection_time(format!(
                "'{}' is not a valid HH:MM time",
                value
            ))
        };

        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        let hour: u32 = value[..2].parse().map_err(|_| invalid())?;
        let minute: u32 = value[3..].parse().map_err(|_| invalid())?;
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
    }

    fn format_clock(time: NaiveTime) -> String {
        format!("{:02}:{:02}", time.hour(), time.minute())
    }
}

impl fmt::Display for CollectionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted_interval())
    }
}

impl FromStr for CollectionTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::parse_interval(s)
    }
}

impl TryFrom<String> for CollectionTime {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::parse_interval(&value)
    }
}

impl From<CollectionTime> for String {
    fn from(time: CollectionTime) -> Self {
        time.formatted_interval()
    }
}
