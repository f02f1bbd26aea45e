#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Review and appeal workflow rules.
//!
//! Citizen reports, filed violations, and appeals share one lifecycle:
//!
//! ```text
//! PENDING ──approve──▶ APPROVED            (terminal)
//!    └─────reject────▶ REJECTED
//!                         └──appeal (once)──▶ PENDING_APPEAL
//!                                                ├─approve─▶ APPROVED
//!                                                └─reject──▶ REJECTED_FINAL
//! ```
//!
//! The backend owns the money side of every transition (reward on
//! approval, penalty on rejection, a *compounding* penalty on a rejected
//! appeal). This crate owns the client side: refuse submissions that the
//! backend would reject anyway (missing notes, second appeals), and hand
//! the caller the exact confirmatory warning copy to show before each
//! transition. It performs no I/O.

use roadwatch_api_models::{AppealStatus, NewAppeal, Report, ReportStatus, ReviewDecision};
use strum_macros::{AsRefStr, Display};

/// Workflow gate failures, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    /// A review decision was applied to a record no longer pending.
    #[error("record is {status}, only PENDING records can be reviewed")]
    NotPending {
        /// The record's actual status.
        status: ReportStatus,
    },

    /// An appeal was filed against a record that was not rejected.
    #[error("record is {status}, only REJECTED records can be appealed")]
    NotRejected {
        /// The record's actual status.
        status: ReportStatus,
    },

    /// An appeal was filed against an already-appealed record. At most
    /// one appeal per record.
    #[error("an appeal has already been submitted for this record")]
    AlreadyAppealed,

    /// An appeal decision was applied to a record with no pending appeal.
    #[error("record has no pending appeal")]
    NoPendingAppeal,
}

/// A workflow transition the client can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewTransition {
    /// `PENDING → APPROVED`; the server credits a reward.
    Approve,
    /// `PENDING → REJECTED`; the server applies a penalty.
    Reject,
    /// `REJECTED → PENDING_APPEAL`; allowed once per record.
    SubmitAppeal,
    /// `PENDING_APPEAL → APPROVED`; the original rejection is overturned.
    ApproveAppeal,
    /// `PENDING_APPEAL → REJECTED_FINAL`; the server applies an
    /// additional, compounding penalty.
    RejectAppeal,
}

impl ReviewTransition {
    /// The report status after this transition settles.
    #[must_use]
    pub const fn resulting_status(self) -> ReportStatus {
        match self {
            Self::Approve | Self::ApproveAppeal => ReportStatus::Approved,
            Self::Reject | Self::SubmitAppeal | Self::RejectAppeal => ReportStatus::Rejected,
        }
    }

    /// The appeal sub-state after this transition settles, when the
    /// transition touches the appeal flow.
    #[must_use]
    pub const fn resulting_appeal_status(self) -> Option<AppealStatus> {
        match self {
            Self::Approve | Self::Reject => None,
            Self::SubmitAppeal => Some(AppealStatus::PendingAppeal),
            Self::ApproveAppeal => Some(AppealStatus::Approved),
            Self::RejectAppeal => Some(AppealStatus::RejectedFinal),
        }
    }

    /// Whether this transition ends the record's lifecycle for good.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approve | Self::ApproveAppeal | Self::RejectAppeal)
    }
}

/// Whether a record is still eligible for an appeal: rejected, and never
/// appealed before.
#[must_use]
pub fn can_appeal(report: &Report) -> bool {
    report.status == ReportStatus::Rejected
        && !report.appeal_submitted
        && report.appeal_status.is_none()
}

/// Gates a reviewer decision on a pending record.
///
/// The decision payload itself (non-empty notes) is validated at
/// construction; this checks the record's state.
///
/// # Errors
///
/// Returns [`ReviewError::NotPending`] when the record already left
/// `PENDING`.
pub fn validate_review(report: &Report, _decision: &ReviewDecision) -> Result<(), ReviewError> {
    if report.status == ReportStatus::Pending {
        Ok(())
    } else {
        Err(ReviewError::NotPending {
            status: report.status,
        })
    }
}

/// Gates an appeal submission. Must pass before any network call — a
/// second appeal is blocked here, client-side.
///
/// # Errors
///
/// Returns [`ReviewError::NotRejected`] for records that were never
/// rejected and [`ReviewError::AlreadyAppealed`] when the one allowed
/// appeal has been used.
pub fn validate_appeal(report: &Report, _appeal: &NewAppeal) -> Result<(), ReviewError> {
    if report.status != ReportStatus::Rejected {
        return Err(ReviewError::NotRejected {
            status: report.status,
        });
    }
    if report.appeal_submitted || report.appeal_status.is_some() {
        return Err(ReviewError::AlreadyAppealed);
    }
    Ok(())
}

/// Gates an appeal adjudication (police side).
///
/// # Errors
///
/// Returns [`ReviewError::NoPendingAppeal`] unless the record carries a
/// `PENDING_APPEAL` sub-state.
pub fn validate_appeal_decision(report: &Report) -> Result<(), ReviewError> {
    if report.appeal_status == Some(AppealStatus::PendingAppeal) {
        Ok(())
    } else {
        Err(ReviewError::NoPendingAppeal)
    }
}

/// The confirmatory warning shown before dispatching a transition.
///
/// The escalation copy on [`ReviewTransition::SubmitAppeal`] and
/// [`ReviewTransition::RejectAppeal`] is required: the compounding
/// penalty is backend policy the client must surface but not enforce.
#[must_use]
pub const fn warning_copy(transition: ReviewTransition) -> &'static str {
    match transition {
        ReviewTransition::Approve => {
            "Approve this report? The reporter will be credited a reward \
             based on the fine amount. This cannot be undone."
        }
        ReviewTransition::Reject => {
            "Reject this report? A penalty will be applied to the reporter. \
             The reporter may appeal this decision once."
        }
        ReviewTransition::SubmitAppeal => {
            "Submit this appeal? You can appeal only once. If the appeal is \
             rejected, an additional penalty will be applied on top of the \
             original one."
        }
        ReviewTransition::ApproveAppeal => {
            "Approve this appeal? The original rejection and its penalty \
             will be overturned."
        }
        ReviewTransition::RejectAppeal => {
            "Reject this appeal? An additional penalty will be applied on \
             top of the original penalty, and no further appeal is \
             possible."
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use roadwatch_api_models::GeoPoint;

    use super::*;

    fn report(status: ReportStatus) -> Report {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        Report {
            id: "rpt_01".to_owned(),
            status,
            vehicle_plate: "DHA-1234".to_owned(),
            violation_type: "NO_HELMET".to_owned(),
            evidence_urls: vec!["https://media.example/e1.jpg".to_owned()],
            location: GeoPoint {
                latitude: 23.78,
                longitude: 90.41,
                address: None,
            },
            note: None,
            citizen_id: "ctz_9".to_owned(),
            review_notes: None,
            reviewed_at: None,
            appeal_submitted: false,
            appeal_status: None,
            reward_amount: None,
            penalty_amount: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn appeal() -> NewAppeal {
        NewAppeal::new("wrong vehicle", vec!["https://media.example/e2.jpg".to_owned()]).unwrap()
    }

    #[test]
    fn review_requires_pending() {
        let decision = ReviewDecision::new(true, "clear footage").unwrap();
        assert!(validate_review(&report(ReportStatus::Pending), &decision).is_ok());
        assert_eq!(
            validate_review(&report(ReportStatus::Approved), &decision),
            Err(ReviewError::NotPending {
                status: ReportStatus::Approved
            })
        );
    }

    #[test]
    fn appeal_requires_rejection() {
        assert_eq!(
            validate_appeal(&report(ReportStatus::Pending), &appeal()),
            Err(ReviewError::NotRejected {
                status: ReportStatus::Pending
            })
        );
        assert!(validate_appeal(&report(ReportStatus::Rejected), &appeal()).is_ok());
    }

    #[test]
    fn second_appeal_is_blocked_before_any_network_call() {
        let mut rejected = report(ReportStatus::Rejected);
        rejected.appeal_submitted = true;
        assert_eq!(
            validate_appeal(&rejected, &appeal()),
            Err(ReviewError::AlreadyAppealed)
        );
        assert!(!can_appeal(&rejected));

        // The flag and the sub-state are checked independently.
        let mut in_flight = report(ReportStatus::Rejected);
        in_flight.appeal_status = Some(AppealStatus::PendingAppeal);
        assert_eq!(
            validate_appeal(&in_flight, &appeal()),
            Err(ReviewError::AlreadyAppealed)
        );
    }

    #[test]
    fn appeal_decision_requires_pending_appeal() {
        let mut rejected = report(ReportStatus::Rejected);
        assert_eq!(
            validate_appeal_decision(&rejected),
            Err(ReviewError::NoPendingAppeal)
        );
        rejected.appeal_status = Some(AppealStatus::PendingAppeal);
        assert!(validate_appeal_decision(&rejected).is_ok());
    }

    #[test]
    fn transition_table() {
        assert_eq!(
            ReviewTransition::Approve.resulting_status(),
            ReportStatus::Approved
        );
        assert_eq!(
            ReviewTransition::SubmitAppeal.resulting_appeal_status(),
            Some(AppealStatus::PendingAppeal)
        );
        assert_eq!(
            ReviewTransition::RejectAppeal.resulting_appeal_status(),
            Some(AppealStatus::RejectedFinal)
        );
        assert!(ReviewTransition::RejectAppeal.is_terminal());
        assert!(!ReviewTransition::Reject.is_terminal());
    }

    #[test]
    fn escalation_copy_names_the_compounding_penalty() {
        assert!(warning_copy(ReviewTransition::SubmitAppeal).contains("additional penalty"));
        assert!(warning_copy(ReviewTransition::RejectAppeal).contains("additional penalty"));
    }
}
