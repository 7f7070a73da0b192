//! Problem report use cases.
//!
//! Reporting a problem reserves a protocol number from a [`ProtocolSequence`]
//! and stores the report. The first report of each year seeds the sequence
//! from the highest protocol already stored, so a service started over an
//! existing store continues where it left off. Storage rejects a protocol that
//! is already taken, in which case the sequence catches up with storage again
//! and the report is retried under a fresh number, up to
//! `protocol.max_retries` extra attempts. Reserved numbers that end up unused
//! (a failed insert, a missing subscriber) leave gaps in the sequence.

use crate::config::ProtocolConfig;
use crate::domain::entities::{
    AdministratorId, NewProblemReport, ProblemReport, ProblemReportChanges, ProblemReportId,
    Resolution, SubscriberId,
};
use crate::domain::numbering::ProtocolSequence;
use crate::domain::value_objects::{
    ProblemAttachments, ProblemDescription, ProblemJustification, ProblemProtocol, ProblemStatus,
    ProblemType,
};
use crate::error::EcoRotaResult;
use crate::services::changed;
use crate::storage::{EntityKind, PersistenceError, ProblemReportRepository};
use chrono::{DateTime, Datelike, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProblemInput {
    pub description: String,
    pub problem_type: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub subscriber_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProblemReportInput {
    pub description: Option<String>,
    pub problem_type: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub subscriber_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveProblemInput {
    pub status: String,
    pub admin_id: u64,
    #[serde(default)]
    pub justification: Option<String>,
}

/// Criteria for listing reports. Every criterion given must match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemReportFilter {
    pub protocol: Option<String>,
    pub status: Option<String>,
    pub subscriber_id: Option<u64>,
}

pub struct ProblemReportService<R, Q> {
    repository: R,
    sequence: Q,
    config: ProtocolConfig,
    seeded_years: Mutex<HashSet<i32>>,
}

impl<R: ProblemReportRepository, Q: ProtocolSequence> ProblemReportService<R, Q> {
    pub fn new(repository: R, sequence: Q, config: ProtocolConfig) -> Self {
        Self {
            repository,
            sequence,
            config,
            seeded_years: Mutex::new(HashSet::new()),
        }
    }

    pub async fn report_problem(&self, input: ReportProblemInput) -> EcoRotaResult<ProblemReport> {
        self.report_problem_at(input, Utc::now()).await
    }

    /// File a report numbered in the calendar year of `now`.
    pub async fn report_problem_at(
        &self,
        input: ReportProblemInput,
        now: DateTime<Utc>,
    ) -> EcoRotaResult<ProblemReport> {
        let description = ProblemDescription::new(&input.description)?;
        let problem_type = ProblemType::new(&input.problem_type)?;
        let attachments = ProblemAttachments::new(input.attachments);
        let subscriber = SubscriberId::new(input.subscriber_id);
        let year = now.year();
        self.ensure_seeded(year).await?;

        let mut attempt = 0;
        loop {
            let protocol = self.sequence.next_protocol(year).await?;
            let draft = NewProblemReport::new(
                protocol,
                attachments.clone(),
                description.clone(),
                problem_type,
                subscriber,
            );

            match self.repository.create(draft).await {
                Ok(report) => {
                    info!(
                        "Problem report {} filed as {} by subscriber {}",
                        report.id(),
                        report.protocol(),
                        subscriber
                    );
                    return Ok(report);
                }
                Err(e)
                    if attempt < self.config.max_retries
                        && e.as_persistence().is_some_and(|p| p.is_conflict_on("protocol")) =>
                {
                    attempt += 1;
                    warn!(
                        "Protocol collision in {} ({}), retrying with a fresh number ({}/{})",
                        year, e, attempt, self.config.max_retries
                    );
                    self.catch_up(year).await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn ensure_seeded(&self, year: i32) -> EcoRotaResult<()> {
        let mut seeded = self.seeded_years.lock().await;
        if !seeded.contains(&year) {
            self.catch_up(year).await?;
            seeded.insert(year);
        }
        Ok(())
    }

    // Raise the sequence to the highest protocol storage holds for `year`.
    async fn catch_up(&self, year: i32) -> EcoRotaResult<()> {
        let highest = self.repository.max_sequence(year).await?;
        self.sequence.seed(year, highest).await;
        debug!("Protocol sequence for {} caught up with storage at {}", year, highest);
        Ok(())
    }

    pub async fn find_by_id(&self, id: ProblemReportId) -> EcoRotaResult<ProblemReport> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::ProblemReport, id).into())
    }

    pub async fn find_by_protocol(&self, protocol: &str) -> EcoRotaResult<ProblemReport> {
        let protocol = ProblemProtocol::new(protocol)?;
        self.repository
            .find_by_protocol(&protocol)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::ProblemReport, protocol).into())
    }

    /// List reports matching `filter`. An unknown protocol or subscriber yields
    /// an empty list, not an error.
    pub async fn list(&self, filter: ProblemReportFilter) -> EcoRotaResult<Vec<ProblemReport>> {
        let protocol = changed(filter.protocol, ProblemProtocol::new)?;
        let status = changed(filter.status, |s| ProblemStatus::new(&s))?;
        let subscriber = filter.subscriber_id.map(SubscriberId::new);

        let mut reports: Vec<ProblemReport> = if let Some(protocol) = &protocol {
            self.repository
                .find_by_protocol(protocol)
                .await?
                .into_iter()
                .collect()
        } else if let Some(subscriber) = subscriber {
            self.repository.find_by_subscriber(subscriber).await?
        } else if let Some(status) = status {
            self.repository.find_by_status(status).await?
        } else {
            self.repository.find_all().await?
        };

        reports.retain(|report| {
            subscriber.is_none_or(|s| report.subscriber_id() == s)
                && status.is_none_or(|s| report.status() == s)
        });
        debug!("Listed {} problem reports", reports.len());
        Ok(reports)
    }

    /// Edit what the citizen reported. Status changes go through [`Self::resolve`].
    pub async fn update(
        &self,
        id: ProblemReportId,
        input: UpdateProblemReportInput,
    ) -> EcoRotaResult<ProblemReport> {
        let changes = ProblemReportChanges {
            description: changed(input.description, ProblemDescription::new)?,
            problem_type: changed(input.problem_type, |t| ProblemType::new(&t))?,
            attachments: input.attachments.map(ProblemAttachments::new),
            subscriber_id: input.subscriber_id.map(SubscriberId::new),
        };
        let report = self.repository.update(id, changes).await?;
        info!("Updated problem report {}", report.protocol());
        Ok(report)
    }

    /// Record an administrator's decision on a report.
    ///
    /// A justification is optional, and refused on a non-final status.
    pub async fn resolve(
        &self,
        id: ProblemReportId,
        input: ResolveProblemInput,
    ) -> EcoRotaResult<ProblemReport> {
        let resolution = Resolution::new(
            ProblemStatus::new(&input.status)?,
            AdministratorId::new(input.admin_id),
            changed(input.justification, ProblemJustification::new)?,
        )?;
        let report = self.repository.resolve(id, resolution).await?;
        info!(
            "Problem report {} moved to {} by administrator {}",
            report.protocol(),
            report.status(),
            input.admin_id
        );
        Ok(report)
    }

    pub async fn delete(&self, id: ProblemReportId) -> EcoRotaResult<()> {
        self.repository.delete(id).await?;
        info!("Deleted problem report {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewAdministrator, NewNeighborhood, NewRoute, NewSubscriber};
    use crate::domain::numbering::InMemoryProtocolSequence;
    use crate::domain::value_objects::{
        Address, CollectionDays, CollectionTime, CollectionType, Email, PopulationEstimate,
    };
    use crate::error::{ErrorKind, ValidationError};
    use crate::storage::{
        AdministratorRepository, InMemoryStorage, NeighborhoodRepository, RouteRepository,
        StandardRepository, SubscriberRepository,
    };
    use chrono::TimeZone;

    type Service = ProblemReportService<StandardRepository<InMemoryStorage>, InMemoryProtocolSequence>;

    struct Fixture {
        service: Service,
        sequence: InMemoryProtocolSequence,
        admin: u64,
        subscriber: u64,
    }

    async fn setup(max_retries: u32) -> Fixture {
        let repository = StandardRepository::new(InMemoryStorage::new());
        let admin = AdministratorRepository::create(
            &repository,
            NewAdministrator::new("Ana", Email::new("ana@ecorota.com").unwrap(), "h".into())
                .unwrap(),
        )
        .await
        .unwrap();
        let route = RouteRepository::create(
            &repository,
            NewRoute::new(
                "Centro",
                CollectionDays::weekdays_only(),
                CollectionTime::new("08:00", "12:00").unwrap(),
                CollectionType::Regular,
                admin.id(),
            )
            .unwrap(),
        )
        .await
        .unwrap();
        let neighborhood = NeighborhoodRepository::create(
            &repository,
            NewNeighborhood::new(
                "Fátima",
                PopulationEstimate::not_informed(),
                None,
                None,
                route.id(),
                admin.id(),
            )
            .unwrap(),
        )
        .await
        .unwrap();
        let subscriber = SubscriberRepository::create(
            &repository,
            NewSubscriber {
                email: Email::new("morador@ecorota.com").unwrap(),
                address: Address::new("Rua A", "10", None, None, None).unwrap(),
                neighborhood_id: neighborhood.id(),
            },
        )
        .await
        .unwrap();

        let sequence = InMemoryProtocolSequence::new();
        Fixture {
            service: ProblemReportService::new(
                repository,
                sequence.clone(),
                ProtocolConfig { max_retries },
            ),
            sequence,
            admin: admin.id().value(),
            subscriber: subscriber.id().value(),
        }
    }

    fn input(subscriber_id: u64) -> ReportProblemInput {
        ReportProblemInput {
            description: "Lixo acumulado na calçada".into(),
            problem_type: "Lixo espalhado".into(),
            attachments: vec![" http://fotos/1.jpg ".into(), "".into()],
            subscriber_id,
        }
    }

    fn in_year(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 3, 10, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_reports_are_numbered_per_year() {
        let fixture = setup(3).await;
        let service = &fixture.service;

        let first = service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();
        let second = service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();
        let next_year = service
            .report_problem_at(input(fixture.subscriber), in_year(2027))
            .await
            .unwrap();

        assert_eq!(first.protocol().value(), "PR-2026-0001");
        assert_eq!(second.protocol().value(), "PR-2026-0002");
        assert_eq!(next_year.protocol().value(), "PR-2027-0001");
        assert_eq!(first.status(), ProblemStatus::Pending);
        assert_eq!(first.attachments().values(), &["http://fotos/1.jpg".to_string()]);
    }

    /// A second service over the same store with its own counter.
    fn sibling(fixture: &Fixture, max_retries: u32) -> Service {
        ProblemReportService::new(
            StandardRepository::new(fixture.service.repository.storage().clone()),
            InMemoryProtocolSequence::new(),
            ProtocolConfig { max_retries },
        )
    }

    #[tokio::test]
    async fn test_restart_continues_after_stored_reports() {
        let fixture = setup(3).await;
        for _ in 0..10 {
            fixture
                .service
                .report_problem_at(input(fixture.subscriber), in_year(2026))
                .await
                .unwrap();
        }

        let restarted = sibling(&fixture, 3);
        let mut protocols = Vec::new();
        for _ in 0..3 {
            let report = restarted
                .report_problem_at(input(fixture.subscriber), in_year(2026))
                .await
                .unwrap();
            protocols.push(report.protocol().value().to_string());
        }
        assert_eq!(protocols, ["PR-2026-0011", "PR-2026-0012", "PR-2026-0013"]);
    }

    #[tokio::test]
    async fn test_restart_never_reuses_a_deleted_number() {
        let fixture = setup(3).await;
        let mut reports = Vec::new();
        for _ in 0..3 {
            reports.push(
                fixture
                    .service
                    .report_problem_at(input(fixture.subscriber), in_year(2026))
                    .await
                    .unwrap(),
            );
        }
        fixture.service.delete(reports[1].id()).await.unwrap();

        let report = sibling(&fixture, 0)
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();
        assert_eq!(report.protocol().value(), "PR-2026-0004");
    }

    #[tokio::test]
    async fn test_protocol_collision_is_retried() {
        let fixture = setup(3).await;
        fixture
            .service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();

        let other = sibling(&fixture, 3);
        let theirs = other
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();
        assert_eq!(theirs.protocol().value(), "PR-2026-0002");

        // Our counter still stands at 1, so 0002 collides once.
        let ours = fixture
            .service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();
        assert_eq!(ours.protocol().value(), "PR-2026-0003");
    }

    #[tokio::test]
    async fn test_protocol_collision_surfaces_after_retries() {
        let fixture = setup(0).await;
        fixture
            .service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();
        sibling(&fixture, 0)
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap();

        let err = fixture
            .service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_exhausted_year_is_a_validation_error() {
        let fixture = setup(3).await;
        fixture.sequence.seed(2026, 9999).await;

        let err = fixture
            .service
            .report_problem_at(input(fixture.subscriber), in_year(2026))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::InvalidProblemProtocol { .. })
        ));
    }

    #[tokio::test]
    async fn test_report_validation_and_missing_subscriber() {
        let fixture = setup(3).await;

        let mut short = input(fixture.subscriber);
        short.description = "curto".into();
        assert!(matches!(
            fixture.service.report_problem(short).await.unwrap_err().as_validation(),
            Some(ValidationError::InvalidProblemDescription { length: 5, .. })
        ));

        let err = fixture.service.report_problem(input(999)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_lifecycle() {
        let fixture = setup(3).await;
        let report = fixture
            .service
            .report_problem(input(fixture.subscriber))
            .await
            .unwrap();

        let duplicate = fixture
            .service
            .report_problem(input(fixture.subscriber))
            .await
            .unwrap();
        let rejected = fixture
            .service
            .resolve(
                duplicate.id(),
                ResolveProblemInput {
                    status: "REJECTED".into(),
                    admin_id: fixture.admin,
                    justification: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(rejected.status(), ProblemStatus::Rejected);
        assert!(rejected.justification().is_none());

        let premature_reason = fixture
            .service
            .resolve(
                report.id(),
                ResolveProblemInput {
                    status: "IN_ANALYSIS".into(),
                    admin_id: fixture.admin,
                    justification: Some("Equipe a caminho do local".into()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(premature_reason.kind(), ErrorKind::InvalidInput);

        let resolved = fixture
            .service
            .resolve(
                report.id(),
                ResolveProblemInput {
                    status: "RESOLVED".into(),
                    admin_id: fixture.admin,
                    justification: Some("Equipe recolheu o lixo na manhã seguinte".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(resolved.status(), ProblemStatus::Resolved);
        assert_eq!(resolved.resolved_by(), Some(AdministratorId::new(fixture.admin)));
        assert!(resolved.justification().is_some());

        let unknown_admin = fixture
            .service
            .resolve(
                report.id(),
                ResolveProblemInput {
                    status: "IN_ANALYSIS".into(),
                    admin_id: 404,
                    justification: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(unknown_admin.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let fixture = setup(3).await;
        let service = &fixture.service;
        let first = service.report_problem(input(fixture.subscriber)).await.unwrap();
        service.report_problem(input(fixture.subscriber)).await.unwrap();
        service
            .resolve(
                first.id(),
                ResolveProblemInput {
                    status: "IN_ANALYSIS".into(),
                    admin_id: fixture.admin,
                    justification: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(service.list(Default::default()).await.unwrap().len(), 2);

        let by_protocol = service
            .list(ProblemReportFilter {
                protocol: Some(first.protocol().value().to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_protocol.len(), 1);
        assert_eq!(by_protocol[0].id(), first.id());

        let in_analysis = service
            .list(ProblemReportFilter {
                status: Some("IN_ANALYSIS".into()),
                subscriber_id: Some(fixture.subscriber),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(in_analysis.len(), 1);

        let unknown = service
            .list(ProblemReportFilter {
                protocol: Some("PR-1999-0001".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(unknown.is_empty());

        assert!(service
            .list(ProblemReportFilter {
                status: Some("DONE".into()),
                ..Default::default()
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let fixture = setup(3).await;
        let report = fixture
            .service
            .report_problem(input(fixture.subscriber))
            .await
            .unwrap();

        let updated = fixture
            .service
            .update(
                report.id(),
                UpdateProblemReportInput {
                    problem_type: Some("Lixeira danificada".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.problem_type(), ProblemType::DamagedBin);
        assert_eq!(updated.protocol(), report.protocol());

        fixture.service.delete(report.id()).await.unwrap();
        assert_eq!(
            fixture
                .service
                .find_by_protocol(report.protocol().value())
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }
}
