//! Protocol numbering.

use chrono::{TimeZone, Utc};
use ecorota::ValidationError;
use ecorota::domain::numbering::{
    InMemoryProtocolSequence, ProtocolSequence, next_protocol_from_snapshot,
};
use ecorota::domain::value_objects::ProblemProtocol;
use futures::future::join_all;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_snapshot_counts_only_the_requested_year() {
    let existing = [
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap(),
    ];
    let protocol = next_protocol_from_snapshot(2025, existing).unwrap();
    assert_eq!(protocol.value(), "PR-2025-0003");

    let first = next_protocol_from_snapshot(2026, existing).unwrap();
    assert_eq!(first.value(), "PR-2026-0001");
}

#[tokio::test]
async fn test_seeded_sequence_agrees_with_snapshot() {
    let existing = [
        Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 4, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 3, 4, 8, 0, 0).unwrap(),
    ];
    let stored = [
        ProblemProtocol::generate(2025, 1).unwrap(),
        ProblemProtocol::generate(2025, 2).unwrap(),
        ProblemProtocol::generate(2023, 1).unwrap(),
    ];
    let sequence = InMemoryProtocolSequence::seeded_from(&stored);

    for year in [2023, 2024, 2025] {
        let snapshot = next_protocol_from_snapshot(year, existing).unwrap();
        let atomic = sequence.next_protocol(year).await.unwrap();
        assert_eq!(atomic, snapshot);
    }
}

#[tokio::test]
async fn test_concurrent_reservations_are_unique() {
    let sequence = InMemoryProtocolSequence::new();

    let handles: Vec<_> = (0..200)
        .map(|_| {
            let sequence = sequence.clone();
            tokio::spawn(async move { sequence.next_protocol(2026).await })
        })
        .collect();

    let protocols: HashSet<String> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().value().to_string())
        .collect();

    assert_eq!(protocols.len(), 200);
    assert_eq!(sequence.current(2026).await, 200);
    assert!(protocols.contains("PR-2026-0001"));
    assert!(protocols.contains("PR-2026-0200"));
}

#[tokio::test]
async fn test_sequence_never_widens_past_four_digits() {
    let sequence = InMemoryProtocolSequence::new();
    sequence.seed(2026, 9_998).await;

    assert_eq!(
        sequence.next_protocol(2026).await.unwrap().value(),
        "PR-2026-9999"
    );
    assert!(matches!(
        sequence.next_protocol(2026).await,
        Err(ValidationError::InvalidProblemProtocol { .. })
    ));
}

proptest! {
    #[test]
    fn prop_years_are_numbered_independently(
        first in 0u32..40,
        second in 0u32..40,
        year in 2000i32..2100,
    ) {
        let sequence = InMemoryProtocolSequence::new();
        tokio_test::block_on(async {
            for _ in 0..first {
                sequence.next_protocol(year).await.unwrap();
            }
            for _ in 0..second {
                sequence.next_protocol(year + 1).await.unwrap();
            }

            let next = sequence.next_protocol(year).await.unwrap();
            assert_eq!(next.sequence(), first + 1);
            assert_eq!(i32::from(next.year()), year);
            assert_eq!(sequence.current(year + 1).await, second);
        });
    }
}
