//! Domain records as returned by the RoadWatch backend.
//!
//! Records are read/write-through views: they are created by the backend in
//! response to a POST and mirrored locally. Cross-references (citizen,
//! vehicle, station) are denormalized into the response rather than owned
//! locally, so they appear here as plain id/label fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{
    AccidentStatus, AppealStatus, CameraStatus, NotificationKind, PaymentStatus, ReportStatus,
};

/// Access to a record's server-assigned identity.
///
/// Every mirrored record type implements this so caches can patch or
/// remove a single record by `id` match.
pub trait Identified {
    /// The record's unique id.
    fn record_id(&self) -> &str;
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn record_id(&self) -> &str {
                &self.id
            }
        })+
    };
}

/// A geographic point with an optionally resolved street address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Reverse-geocoded address, when resolution succeeded. Blank address
    /// with usable coordinates is an expected degraded state.
    pub address: Option<String>,
}

/// A citizen-submitted violation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique report ID.
    pub id: String,
    /// Review lifecycle state.
    pub status: ReportStatus,
    /// Registration plate of the reported vehicle (uppercase).
    pub vehicle_plate: String,
    /// Violation type code (e.g., `"NO_HELMET"`).
    pub violation_type: String,
    /// Hosted URLs of the uploaded evidence.
    pub evidence_urls: Vec<String>,
    /// Where the violation was observed.
    pub location: GeoPoint,
    /// Free-text description from the reporter.
    pub note: Option<String>,
    /// ID of the reporting citizen.
    pub citizen_id: String,
    /// Reviewer's notes, set when the report leaves `PENDING`.
    pub review_notes: Option<String>,
    /// When the review decision was made.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Whether an appeal has already been filed. At most one appeal per
    /// report.
    #[serde(default)]
    pub appeal_submitted: bool,
    /// State of the appeal sub-flow, when one exists.
    pub appeal_status: Option<AppealStatus>,
    /// Reward credited to the reporter on approval, as computed
    /// server-side.
    pub reward_amount: Option<f64>,
    /// Penalty applied on rejection (compounded on a rejected appeal).
    pub penalty_amount: Option<f64>,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// A violation filed by police (camera capture or officer observation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Unique violation ID.
    pub id: String,
    /// Review lifecycle state.
    pub status: ReportStatus,
    /// Registration plate of the offending vehicle.
    pub vehicle_plate: String,
    /// Violation type code.
    pub violation_type: String,
    /// Fine issued for this violation, when one exists.
    pub fine_id: Option<String>,
    /// Capturing camera, when filed from camera footage.
    pub camera_id: Option<String>,
    /// Where the violation occurred.
    pub location: GeoPoint,
    /// When the violation occurred.
    pub occurred_at: DateTime<Utc>,
    /// When the violation record was created.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// A fine issued against a violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    /// Unique fine ID.
    pub id: String,
    /// Settlement state.
    pub status: PaymentStatus,
    /// Violation this fine was issued for.
    pub violation_id: String,
    /// Registration plate of the fined vehicle.
    pub vehicle_plate: String,
    /// Amount due.
    pub amount: f64,
    /// When the fine was issued.
    pub issued_at: DateTime<Utc>,
    /// When the fine was settled, if it has been.
    pub paid_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// A payment attempt against a fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment ID.
    pub id: String,
    /// Gateway-reported state.
    pub status: PaymentStatus,
    /// Fine being paid.
    pub fine_id: String,
    /// Amount transferred.
    pub amount: f64,
    /// Gateway method label (e.g., `"CARD"`, `"MOBILE_BANKING"`).
    pub method: String,
    /// Gateway transaction reference.
    pub transaction_ref: Option<String>,
    /// When the payment was initiated.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// An in-app notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification ID.
    pub id: String,
    /// What this notification is about.
    pub kind: NotificationKind,
    /// Notification body text.
    pub body: String,
    /// Whether the recipient has read it. Toggled optimistically
    /// client-side and reconciled against the server response.
    pub read: bool,
    /// Related record (report, fine, appeal), when applicable.
    pub subject_id: Option<String>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// A reported road accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accident {
    /// Unique accident ID.
    pub id: String,
    /// Response lifecycle state.
    pub status: AccidentStatus,
    /// Where the accident happened.
    pub location: GeoPoint,
    /// Severity from 1 (minor) to 5 (critical).
    pub severity: u8,
    /// Free-text description.
    pub description: Option<String>,
    /// Station handling the response, once one is assigned.
    pub station_id: Option<String>,
    /// When the accident was reported.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// A police station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoliceStation {
    /// Unique station ID.
    pub id: String,
    /// Station name.
    pub name: String,
    /// Station location.
    pub location: GeoPoint,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Administrative district.
    pub district: String,
}

/// A traffic camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// Unique camera ID.
    pub id: String,
    /// Operational state.
    pub status: CameraStatus,
    /// Human-readable placement label (e.g., an intersection name).
    pub label: String,
    /// Camera location.
    pub location: GeoPoint,
    /// Last time the camera reported in.
    pub last_heartbeat: Option<DateTime<Utc>>,
    /// When the camera was registered.
    pub created_at: DateTime<Utc>,
    /// Last server-side modification.
    pub updated_at: DateTime<Utc>,
}

/// A violation type from the platform's configured catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationType {
    /// Unique type ID.
    pub id: String,
    /// Stable code used in reports (e.g., `"NO_HELMET"`).
    pub code: String,
    /// Display label.
    pub label: String,
    /// Base fine amount before adjustments.
    pub base_fine: f64,
    /// Whether this type is currently reportable.
    pub active: bool,
}

impl_identified!(
    Report,
    Violation,
    Fine,
    Payment,
    Notification,
    Accident,
    PoliceStation,
    Camera,
    ViolationType,
);

/// Aggregate counters for the analytics dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Reports awaiting review.
    pub pending_reports: u64,
    /// Reports approved to date.
    pub approved_reports: u64,
    /// Reports rejected to date.
    pub rejected_reports: u64,
    /// Accidents currently active.
    pub active_accidents: u64,
    /// Accidents with a response en route.
    pub responding_accidents: u64,
    /// Accidents resolved to date.
    pub resolved_accidents: u64,
    /// Total fine volume issued.
    pub fines_issued: f64,
    /// Total fine volume collected.
    pub fines_collected: f64,
    /// Cameras currently online.
    pub cameras_online: u64,
    /// Cameras currently offline or in maintenance.
    pub cameras_offline: u64,
}
