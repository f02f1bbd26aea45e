//! Status vocabularies shared by the RoadWatch record types.
//!
//! Every status is a small fixed enum serialized as
//! `SCREAMING_SNAKE_CASE`, matching the backend's wire format.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Lifecycle of a citizen report or filed violation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    /// Awaiting police review.
    Pending,
    /// Accepted by a reviewer; triggers a reward computation server-side.
    Approved,
    /// Declined by a reviewer; triggers a penalty computation server-side.
    Rejected,
}

impl ReportStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pending, Self::Approved, Self::Rejected]
    }

    /// Whether this status is terminal absent an appeal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Lifecycle of the appeal sub-flow on a rejected record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AppealStatus {
    /// Appeal submitted and awaiting a second review.
    PendingAppeal,
    /// Appeal accepted; the original rejection is overturned.
    Approved,
    /// Appeal declined; an additional penalty applies and no further
    /// appeal is possible.
    RejectedFinal,
}

/// Lifecycle of a fine or payment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Issued but not yet settled.
    Pending,
    /// Settled successfully.
    Paid,
    /// Gateway reported a failure.
    Failed,
    /// Settled, then reversed.
    Refunded,
}

/// Lifecycle of a reported accident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AccidentStatus {
    /// Reported and not yet assigned.
    Active,
    /// A station has dispatched a response.
    Responding,
    /// Closed out.
    Resolved,
}

impl AccidentStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Active, Self::Responding, Self::Resolved]
    }
}

/// Operational state of a traffic camera.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CameraStatus {
    /// Streaming and reachable.
    Online,
    /// Unreachable.
    Offline,
    /// Deliberately taken out of service.
    Maintenance,
}

/// What a notification is about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A report the recipient filed changed status.
    ReportUpdate,
    /// A fine was issued against the recipient.
    FineIssued,
    /// An appeal decision was made.
    AppealDecision,
    /// Platform-level announcement.
    System,
}
