//! End-to-end collection workflow.

use crate::common::TestWorld;
use crate::common::builders::{ecopoint_input, neighborhood_input, report_input, seed, subscriber_input};
use ecorota::ErrorKind;
use ecorota::domain::entities::NeighborhoodId;
use ecorota::domain::value_objects::{MaterialType, ProblemStatus, WeekDay};
use ecorota::services::{
    ProblemReportFilter, ResolveProblemInput, UpdateProblemReportInput, UpdateRouteInput,
};
use serde_json::json;

#[tokio::test]
async fn test_citizen_report_lifecycle() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;

    let ecopoint = world
        .ecopoints
        .create(ecopoint_input(
            "Ecoponto Centro",
            seeded.neighborhood.id().value(),
            seeded.admin_id(),
        ))
        .await
        .unwrap();
    assert!(ecopoint.accepted_materials().accepts(MaterialType::Battery));
    assert!(ecopoint.collection_days().has_collection_on(WeekDay::Saturday));

    let report = world
        .reports
        .report_problem(report_input(seeded.subscriber_id()))
        .await
        .unwrap();
    assert_eq!(report.status(), ProblemStatus::Pending);
    assert_eq!(report.protocol().sequence(), 1);

    let report = world
        .reports
        .update(
            report.id(),
            UpdateProblemReportInput {
                attachments: Some(vec!["a.jpg".into(), "b.jpg".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(report.attachments().serialize(), "a.jpg,b.jpg");

    let in_analysis = world
        .reports
        .resolve(
            report.id(),
            ResolveProblemInput {
                status: "IN_ANALYSIS".into(),
                admin_id: seeded.admin_id(),
                justification: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(in_analysis.status(), ProblemStatus::InAnalysis);

    let premature = world
        .reports
        .resolve(
            report.id(),
            ResolveProblemInput {
                status: "IN_ANALYSIS".into(),
                admin_id: seeded.admin_id(),
                justification: Some("Ainda aguardando a vistoria".into()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(premature.kind(), ErrorKind::InvalidInput);

    let resolved = world
        .reports
        .resolve(
            report.id(),
            ResolveProblemInput {
                status: "RESOLVED".into(),
                admin_id: seeded.admin_id(),
                justification: Some("Caminhão remanejado para a rua".into()),
            },
        )
        .await
        .unwrap();
    assert!(resolved.status().is_final());
    assert_eq!(resolved.resolved_by(), Some(seeded.admin.id()));

    let listed = world
        .reports
        .list(ProblemReportFilter {
            status: Some("RESOLVED".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed, vec![resolved.clone()]);

    let body = serde_json::to_value(&resolved).unwrap();
    assert_eq!(body["status"], json!("RESOLVED"));
    assert_eq!(body["protocol"], json!(resolved.protocol().value()));
}

#[tokio::test]
async fn test_parents_cannot_be_deleted_while_referenced() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let report = world
        .reports
        .report_problem(report_input(seeded.subscriber_id()))
        .await
        .unwrap();

    let cases = [
        world.routes.delete(seeded.route.id()).await,
        world.neighborhoods.delete(seeded.neighborhood.id()).await,
        world.subscribers.unsubscribe(seeded.subscriber.id()).await,
        world.administrators.delete(seeded.admin.id()).await,
    ];
    for result in cases {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.as_persistence().is_some_and(|e| e.is_dependency()), "{}", err);
    }

    // Children first, then every parent goes.
    world.reports.delete(report.id()).await.unwrap();
    world.subscribers.unsubscribe(seeded.subscriber.id()).await.unwrap();
    world.neighborhoods.delete(seeded.neighborhood.id()).await.unwrap();
    world.routes.delete(seeded.route.id()).await.unwrap();
    world.administrators.delete(seeded.admin.id()).await.unwrap();

    assert_eq!(world.storage.stats().await.total_rows, 0);
}

#[tokio::test]
async fn test_unique_names_and_emails_across_services() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let route_id = seeded.route.id().value();

    let duplicate_neighborhood = world
        .neighborhoods
        .create(neighborhood_input("Centro", route_id, seeded.admin_id()))
        .await
        .unwrap_err();
    assert!(duplicate_neighborhood
        .as_persistence()
        .is_some_and(|e| e.is_conflict_on("name")));

    let duplicate_subscriber = world
        .subscribers
        .subscribe(subscriber_input(
            "MORADOR@ecorota.com",
            seeded.neighborhood.id().value(),
        ))
        .await
        .unwrap_err();
    assert!(duplicate_subscriber
        .as_persistence()
        .is_some_and(|e| e.is_conflict_on("email")));
}

#[tokio::test]
async fn test_updates_keep_audit_trail() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let other_admin = world
        .administrators
        .create(crate::common::builders::admin_input("bia@ecorota.com"))
        .await
        .unwrap();

    let route = world
        .routes
        .update(
            seeded.route.id(),
            UpdateRouteInput {
                collection_days: Some(vec!["sunday".into(), "SATURDAY".into()]),
                admin_id: other_admin.id().value(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(route.collection_days().has_weekend_collection());
    assert_eq!(route.audit().created_by(), seeded.admin.id());
    assert_eq!(route.audit().updated_by(), Some(other_admin.id()));
    assert!(route.audit().updated_at() >= route.audit().created_at());

    // The updater is now referenced too.
    let err = world.administrators.delete(other_admin.id()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_ecopoints_by_neighborhood() {
    let world = TestWorld::new();
    let seeded = seed(&world).await;
    let second = world
        .neighborhoods
        .create(neighborhood_input(
            "Jóquei",
            seeded.route.id().value(),
            seeded.admin_id(),
        ))
        .await
        .unwrap();

    for (name, neighborhood) in [
        ("Ecoponto A", seeded.neighborhood.id()),
        ("Ecoponto B", second.id()),
        ("Ecoponto C", second.id()),
    ] {
        world
            .ecopoints
            .create(ecopoint_input(name, neighborhood.value(), seeded.admin_id()))
            .await
            .unwrap();
    }

    let in_second = world.ecopoints.list(Some(second.id())).await.unwrap();
    assert_eq!(in_second.len(), 2);
    assert!(in_second.iter().all(|e| e.neighborhood_id() == second.id()));
    assert!(world
        .ecopoints
        .list(Some(NeighborhoodId::new(999)))
        .await
        .unwrap()
        .is_empty());
}
