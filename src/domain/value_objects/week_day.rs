//! Days of the week used by collection schedules.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day of the week, ordered Monday first.
///
/// The wire form is the lowercase English name (`monday`); parsing trims and is
/// case-insensitive. [`WeekDay::label`] gives the Portuguese name shown to residents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    /// All days in canonical order.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekDay::Monday => "monday",
            WeekDay::Tuesday => "tuesday",
            WeekDay::Wednesday => "wednesday",
            WeekDay::Thursday => "thursday",
            WeekDay::Friday => "friday",
            WeekDay::Saturday => "saturday",
            WeekDay::Sunday => "sunday",
        }
    }

    /// Portuguese display name.
    pub fn label(&self) -> &'static str {
        match self {
            WeekDay::Monday => "Segunda-feira",
            WeekDay::Tuesday => "Terça-feira",
            WeekDay::Wednesday => "Quarta-feira",
            WeekDay::Thursday => "Quinta-feira",
            WeekDay::Friday => "Sexta-feira",
            WeekDay::Saturday => "Sábado",
            WeekDay::Sunday => "Domingo",
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, WeekDay::Saturday | WeekDay::Sunday)
    }

    /// Canonical wire values, for UIs and validation messages.
    pub fn valid_values() -> Vec<&'static str> {
        Self::ALL.iter().map(WeekDay::as_str).collect()
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WeekDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == needle)
            .ok_or_else(|| {
                ValidationError::invalid_collection_days(format!(
                    "unknown week day '{}', expected one of {:?}",
                    s,
                    Self::valid_values()
                ))
            })
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
            chrono::Weekday::Sun => WeekDay::Sunday,
        }
    }
}
