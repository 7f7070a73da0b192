//! The set of weekdays on which a route or ecopoint is served.

use crate::domain::value_objects::WeekDay;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A non-empty, ordered, duplicate-free set of weekdays.
///
/// Days are kept in canonical order (Monday to Sunday) regardless of input order,
/// so two schedules listing the same days compare equal. All set operations return
/// new values; removing every day is a validation error.
///
/// The persistence form is a comma-delimited list of wire names
/// (`monday,wednesday,friday`).
///
/// ## Examples
///
/// ```rust
/// use ecorota::domain::value_objects::{CollectionDays, WeekDay};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let days = CollectionDays::new([WeekDay::Friday, WeekDay::Monday, WeekDay::Monday])?;
///     assert_eq!(days.days(), &[WeekDay::Monday, WeekDay::Friday]);
///     assert_eq!(days.serialize(), "monday,friday");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionDays(Vec<WeekDay>);

impl CollectionDays {
    /// Create a schedule from any collection of days.
    pub fn new(days: impl IntoIterator<Item = WeekDay>) -> ValidationResult<Self> {
        let canonical: BTreeSet<WeekDay> = days.into_iter().collect();
        if canonical.is_empty() {
            return Err(ValidationError::invalid_collection_days(
                "at least one collection day is required",
            ));
        }
        Ok(Self(canonical.into_iter().collect()))
    }

    /// Parse the comma-delimited persistence form.
    pub fn from_string(value: &str) -> ValidationResult<Self> {
        let days = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<WeekDay>)
            .collect::<ValidationResult<Vec<_>>>()?;
        Self::new(days)
    }

    pub fn everyday() -> Self {
        Self(WeekDay::ALL.to_vec())
    }

    pub fn weekdays_only() -> Self {
        Self(WeekDay::ALL.into_iter().filter(|d| !d.is_weekend()).collect())
    }

    pub fn weekends_only() -> Self {
        Self(WeekDay::ALL.into_iter().filter(WeekDay::is_weekend).collect())
    }

    /// Days in canonical order.
    pub fn days(&self) -> &[WeekDay] {
        &self.0
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn has_collection_on(&self, day: WeekDay) -> bool {
        self.0.contains(&day)
    }

    pub fn is_everyday(&self) -> bool {
        self.0.len() == WeekDay::ALL.len()
    }

    /// True when the schedule is exactly Monday to Friday.
    pub fn is_weekdays_only(&self) -> bool {
        *self == Self::weekdays_only()
    }

    pub fn has_weekend_collection(&self) -> bool {
        self.0.iter().any(WeekDay::is_weekend)
    }

    pub fn has_overlap_with(&self, other: &CollectionDays) -> bool {
        self.0.iter().any(|day| other.has_collection_on(*day))
    }

    /// Days present in both schedules, in canonical order.
    pub fn overlap_with(&self, other: &CollectionDays) -> Vec<WeekDay> {
        self.0
            .iter()
            .copied()
            .filter(|day| other.has_collection_on(*day))
            .collect()
    }

    pub fn union_with(&self, other: &CollectionDays) -> Self {
        self.add_days(other.0.iter().copied())
    }

    /// Days of `self` not in `other`. Fails if nothing would remain.
    pub fn difference_with(&self, other: &CollectionDays) -> ValidationResult<Self> {
        self.remove_days(other.0.iter().copied())
    }

    /// Return a new schedule with the given days added.
    pub fn add_days(&self, days: impl IntoIterator<Item = WeekDay>) -> Self {
        let merged: BTreeSet<WeekDay> = self.0.iter().copied().chain(days).collect();
        Self(merged.into_iter().collect())
    }

    /// Return a new schedule without the given days.
    pub fn remove_days(&self, days: impl IntoIterator<Item = WeekDay>) -> ValidationResult<Self> {
        let removed: BTreeSet<WeekDay> = days.into_iter().collect();
        Self::new(self.0.iter().copied().filter(|d| !removed.contains(d)))
    }

    /// Comma-delimited wire form.
    pub fn serialize(&self) -> String {
        self.0
            .iter()
            .map(WeekDay::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Portuguese labels joined for display, e.g. `Segunda-feira, Sexta-feira`.
    pub fn to_localized_string(&self) -> String {
        self.0
            .iter()
            .map(WeekDay::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CollectionDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl FromStr for CollectionDays {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for CollectionDays {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::from_string(&value)
    }
}

impl From<CollectionDays> for String {
    fn from(days: CollectionDays) -> Self {
        days.serialize()
    }
}
