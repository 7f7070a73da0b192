//! Concurrent report submissions.

use crate::common::TestWorld;
use crate::common::builders::{report_input, seed};
use chrono::{Datelike, Utc};
use ecorota::config::ProtocolConfig;
use ecorota::domain::numbering::InMemoryProtocolSequence;
use ecorota::services::{ProblemReportFilter, ProblemReportService};
use ecorota::storage::StandardRepository;
use futures::future::join_all;
use std::collections::HashSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reports_get_distinct_protocols() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let subscriber = seeded.subscriber_id();

    let submissions = (0..50).map(|_| world.reports.report_problem(report_input(subscriber)));
    let reports: Vec<_> = join_all(submissions)
        .await
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();

    let protocols: HashSet<&str> = reports.iter().map(|r| r.protocol().value()).collect();
    assert_eq!(protocols.len(), 50);

    let year = Utc::now().year();
    let sequences: HashSet<u32> = reports.iter().map(|r| r.protocol().sequence()).collect();
    assert_eq!(sequences, (1..=50).collect());
    assert!(reports.iter().all(|r| i32::from(r.protocol().year()) == year));

    let stored = world
        .reports
        .list(ProblemReportFilter::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 50);
}

#[tokio::test]
async fn test_restarted_service_continues_numbering() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let subscriber = seeded.subscriber_id();

    for _ in 0..10 {
        world
            .reports
            .report_problem(report_input(subscriber))
            .await
            .unwrap();
    }

    // Same store, fresh counter, default retry budget.
    let restarted = ProblemReportService::new(
        StandardRepository::new(world.storage.clone()),
        InMemoryProtocolSequence::new(),
        ProtocolConfig::default(),
    );
    let mut sequences = Vec::new();
    for _ in 0..3 {
        let report = restarted
            .report_problem(report_input(subscriber))
            .await
            .unwrap();
        sequences.push(report.protocol().sequence());
    }
    assert_eq!(sequences, [11, 12, 13]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_services_sharing_a_store_hand_out_distinct_protocols() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let subscriber = seeded.subscriber_id();

    // Every collision means another insert won, so 19 retries always suffice.
    let service = || {
        ProblemReportService::new(
            StandardRepository::new(world.storage.clone()),
            InMemoryProtocolSequence::new(),
            ProtocolConfig { max_retries: 19 },
        )
    };
    let (first, second) = (service(), service());
    let ours = (0..10).map(|_| first.report_problem(report_input(subscriber)));
    let theirs = (0..10).map(|_| second.report_problem(report_input(subscriber)));
    let (ours, theirs) = futures::join!(join_all(ours), join_all(theirs));

    let protocols: HashSet<String> = ours
        .into_iter()
        .chain(theirs)
        .map(|result| result.unwrap().protocol().value().to_string())
        .collect();
    assert_eq!(protocols.len(), 20);
}
