//! Problem report aggregate and its lifecycle rules.
//!
//! A report is filed by a subscriber in `PENDING` state with a protocol number.
//! Administrators move it through `IN_ANALYSIS` to `RESOLVED` or `REJECTED`.
//! Lifecycle rules enforced here:
//!
//! - a justification may only be attached in a final state
//! - rejecting a report requires a justification
//! - the administrator who changes the status is recorded as `resolved_by`

use crate::domain::entities::{AdministratorId, ProblemReportId, SubscriberId, Timestamps};
use crate::domain::value_objects::{
    ProblemAttachments, ProblemDescription, ProblemJustification, ProblemProtocol, ProblemStatus,
    ProblemType,
};
use crate::error::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemReport {
    id: ProblemReportId,
    protocol: ProblemProtocol,
    attachments: ProblemAttachments,
    status: ProblemStatus,
    description: ProblemDescription,
    problem_type: ProblemType,
    subscriber_id: SubscriberId,
    resolved_by: Option<AdministratorId>,
    justification: Option<ProblemJustification>,
    #[serde(flatten)]
    timestamps: Timestamps,
}

/// A report ready to be stored. Always starts `PENDING`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProblemReport {
    pub(crate) protocol: ProblemProtocol,
    pub(crate) attachments: ProblemAttachments,
    pub(crate) description: ProblemDescription,
    pub(crate) problem_type: ProblemType,
    pub(crate) subscriber_id: SubscriberId,
}

/// Citizen-editable fields of a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemReportChanges {
    pub description: Option<ProblemDescription>,
    pub problem_type: Option<ProblemType>,
    pub attachments: Option<ProblemAttachments>,
    pub subscriber_id: Option<SubscriberId>,
}

/// An administrator's status decision on a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub status: ProblemStatus,
    pub resolved_by: AdministratorId,
    pub justification: Option<ProblemJustification>,
}

impl NewProblemReport {
    pub fn new(
        protocol: ProblemProtocol,
        attachments: ProblemAttachments,
        description: ProblemDescription,
        problem_type: ProblemType,
        subscriber_id: SubscriberId,
    ) -> Self {
        Self {
            protocol,
            attachments,
            description,
            problem_type,
            subscriber_id,
        }
    }

    pub fn protocol(&self) -> &ProblemProtocol {
        &self.protocol
    }

    pub fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    /// Same draft under a different protocol, used when the first one collided.
    pub fn with_protocol(self, protocol: ProblemProtocol) -> Self {
        Self { protocol, ..self }
    }

    pub fn into_report(self, id: ProblemReportId, at: DateTime<Utc>) -> ProblemReport {
        ProblemReport {
            id,
            protocol: self.protocol,
            attachments: self.attachments,
            status: ProblemStatus::Pending,
            description: self.description,
            problem_type: self.problem_type,
            subscriber_id: self.subscriber_id,
            resolved_by: None,
            justification: None,
            timestamps: Timestamps::created(at),
        }
    }
}

impl Resolution {
    /// Check the lifecycle rules for a status decision.
    pub fn new(
        status: ProblemStatus,
        resolved_by: AdministratorId,
        justification: Option<ProblemJustification>,
    ) -> ValidationResult<Self> {
        check_justification(status, justification.as_ref())?;
        Ok(Self {
            status,
            resolved_by,
            justification,
        })
    }
}

fn check_justification(
    status: ProblemStatus,
    justification: Option<&ProblemJustification>,
) -> ValidationResult<()> {
    if justification.is_some() && !status.allows_justification() {
        return Err(ValidationError::JustificationNotAllowed {
            status: status.value().to_string(),
        });
    }
    Ok(())
}

impl ProblemReport {
    /// Rebuild a report from stored parts, re-checking the justification rule.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ProblemReportId,
        protocol: ProblemProtocol,
        attachments: ProblemAttachments,
        status: ProblemStatus,
        description: ProblemDescription,
        problem_type: ProblemType,
        subscriber_id: SubscriberId,
        resolved_by: Option<AdministratorId>,
        justification: Option<ProblemJustification>,
        timestamps: Timestamps,
    ) -> ValidationResult<Self> {
        check_justification(status, justification.as_ref())?;
        Ok(Self {
            id,
            protocol,
            attachments,
            status,
            description,
            problem_type,
            subscriber_id,
            resolved_by,
            justification,
            timestamps,
        })
    }

    pub fn id(&self) -> ProblemReportId {
        self.id
    }

    pub fn protocol(&self) -> &ProblemProtocol {
        &self.protocol
    }

    pub fn attachments(&self) -> &ProblemAttachments {
        &self.attachments
    }

    pub fn status(&self) -> ProblemStatus {
        self.status
    }

    pub fn description(&self) -> &ProblemDescription {
        &self.description
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    pub fn resolved_by(&self) -> Option<AdministratorId> {
        self.resolved_by
    }

    pub fn justification(&self) -> Option<&ProblemJustification> {
        self.justification.as_ref()
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at()
    }

    pub fn with_changes(&self, changes: ProblemReportChanges, at: DateTime<Utc>) -> Self {
        Self {
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            problem_type: changes.problem_type.unwrap_or(self.problem_type),
            attachments: changes
                .attachments
                .unwrap_or_else(|| self.attachments.clone()),
            subscriber_id: changes.subscriber_id.unwrap_or(self.subscriber_id),
            timestamps: self.timestamps.touched(at),
            ..self.clone()
        }
    }

    /// Apply an administrator's decision.
    ///
    /// Moving back to a non-final state drops any earlier justification.
    pub fn resolve(&self, resolution: Resolution, at: DateTime<Utc>) -> Self {
        let justification = if resolution.status.allows_justification() {
            resolution.justification
        } else {
            None
        };

        Self {
            status: resolution.status,
            resolved_by: Some(resolution.resolved_by),
            justification,
            timestamps: self.timestamps.touched(at),
            ..self.clone()
        }
    }
}
