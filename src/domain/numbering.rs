//! Protocol numbering for problem reports.
//!
//! A protocol is `PR-<year>-<sequence>`, with the sequence starting at 1 in every
//! calendar year (UTC). Two strategies are provided:
//!
//! - [`next_protocol_from_snapshot`] counts the reports already created in the
//!   year and adds one. It is a pure function over a snapshot and is **not
//!   atomic**: two submissions reading the same snapshot compute the same number.
//! - [`ProtocolSequence`] hands out sequences atomically per year. The report
//!   workflow uses it, relying on storage to reject a duplicate protocol if the
//!   counter and the store ever disagree.
//!
//! A counter is seeded from the highest sequence already stored for its year,
//! not from the number of stored reports, so deleting a report never makes a
//! number come round again. On a store where nothing was deleted both
//! strategies agree.

use crate::domain::value_objects::ProblemProtocol;
use crate::error::ValidationResult;
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Compute the next protocol for `year` from the creation instants of existing reports.
///
/// Reports created in other years never inflate the count.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use ecorota::domain::numbering::next_protocol_from_snapshot;
///
/// let existing = [
///     Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
/// ];
/// let protocol = next_protocol_from_snapshot(2025, existing).unwrap();
/// assert_eq!(protocol.value(), "PR-2025-0003");
/// ```
pub fn next_protocol_from_snapshot(
    year: i32,
    created_at: impl IntoIterator<Item = DateTime<Utc>>,
) -> ValidationResult<ProblemProtocol> {
    let count = count_in_year(year, created_at);
    ProblemProtocol::generate(year, sequence_after(count))
}

fn count_in_year(year: i32, created_at: impl IntoIterator<Item = DateTime<Utc>>) -> u64 {
    created_at
        .into_iter()
        .filter(|instant| instant.year() == year)
        .count() as u64
}

// Saturates so an oversized count surfaces as a protocol error, not a wrap.
fn sequence_after(count: u64) -> u32 {
    u32::try_from(count.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Source of protocol numbers that never hands out the same number twice.
pub trait ProtocolSequence: Send + Sync {
    /// Reserve the next protocol in `year`.
    ///
    /// Fails with `InvalidProblemProtocol` once the year's sequence passes 9999.
    fn next_protocol(
        &self,
        year: i32,
    ) -> impl Future<Output = ValidationResult<ProblemProtocol>> + Send;

    /// Record that sequences up to `issued` are taken in `year`. Never lowers
    /// the counter.
    fn seed(&self, year: i32, issued: u32) -> impl Future<Output = ()> + Send;
}

/// Per-year counters behind a mutex.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProtocolSequence {
    counters: Arc<Mutex<HashMap<i32, u32>>>,
}

impl InMemoryProtocolSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start each year's counter at the highest sequence among `protocols`.
    pub fn seeded_from<'a>(protocols: impl IntoIterator<Item = &'a ProblemProtocol>) -> Self {
        let mut counters: HashMap<i32, u32> = HashMap::new();
        for protocol in protocols {
            let counter = counters.entry(i32::from(protocol.year())).or_default();
            *counter = (*counter).max(protocol.sequence());
        }
        Self {
            counters: Arc::new(Mutex::new(counters)),
        }
    }

    /// Last sequence handed out for `year` (0 if none).
    pub async fn current(&self, year: i32) -> u32 {
        self.counters.lock().await.get(&year).copied().unwrap_or(0)
    }
}

impl ProtocolSequence for InMemoryProtocolSequence {
    async fn next_protocol(&self, year: i32) -> ValidationResult<ProblemProtocol> {
        let sequence = {
            let mut counters = self.counters.lock().await;
            let counter = counters.entry(year).or_default();
            *counter = counter.saturating_add(1);
            *counter
        };
        ProblemProtocol::generate(year, sequence)
    }

    async fn seed(&self, year: i32, issued: u32) {
        let mut counters = self.counters.lock().await;
        let counter = counters.entry(year).or_default();
        *counter = (*counter).max(issued);
    }
}
