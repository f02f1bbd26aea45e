//! Request payloads sent to mutation endpoints.
//!
//! Payload constructors enforce the client-local validation rules: a
//! validation failure here never reaches the network. Anything the backend
//! must decide (fine amounts, reward percentages, appeal penalties) is
//! deliberately absent.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Plate format: district prefix, dash, serial (e.g., `DHA-1234`).
static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}-[0-9]{1,4}$").expect("valid regex"));

/// Normalizes a plate to uppercase and validates its format.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPlate`] when the uppercased plate
/// does not match the expected format.
pub fn normalize_plate(plate: &str) -> Result<String, ValidationError> {
    let plate = plate.trim().to_uppercase();
    if PLATE_RE.is_match(&plate) {
        Ok(plate)
    } else {
        Err(ValidationError::InvalidPlate { plate })
    }
}

/// Client-local validation failures.
///
/// These are caught before any network call and surfaced immediately.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The vehicle plate does not match the expected format.
    #[error("invalid vehicle plate '{plate}': expected format like DHA-1234")]
    InvalidPlate {
        /// The rejected plate value (after uppercasing).
        plate: String,
    },

    /// A required free-text field was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The submission carried no evidence.
    #[error("at least one evidence file is required")]
    NoEvidence,

    /// The coordinate pair is outside the valid WGS84 range.
    #[error("coordinates ({latitude}, {longitude}) are out of range")]
    InvalidCoordinates {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
}

/// Captured location sent with a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Reverse-geocoded address, when resolution succeeded. Left blank on
    /// geocoder failure; coordinates remain usable.
    pub address: Option<String>,
}

impl LocationPayload {
    /// Creates a location payload, validating the coordinate range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinates`] if the pair is
    /// outside WGS84 bounds.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            address: None,
        })
    }

    /// Attaches a resolved address.
    #[must_use]
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_owned());
        self
    }
}

/// Payload for submitting a citizen violation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    /// Vehicle plate, uppercased by [`NewReport::new`].
    pub vehicle_plate: String,
    /// Violation type code (e.g., `"NO_HELMET"`).
    pub violation_type: String,
    /// Hosted URLs of already-uploaded evidence. Never empty.
    pub evidence_urls: Vec<String>,
    /// Where the violation was observed.
    pub location: LocationPayload,
    /// Optional free-text description.
    pub note: Option<String>,
}

impl NewReport {
    /// Builds a report payload, uppercasing the plate and enforcing the
    /// client-local rules: plate format, non-empty violation type, at
    /// least one evidence URL.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any rule fails; nothing is sent to
    /// the server in that case.
    pub fn new(
        vehicle_plate: &str,
        violation_type: &str,
        evidence_urls: Vec<String>,
        location: LocationPayload,
    ) -> Result<Self, ValidationError> {
        let plate = normalize_plate(vehicle_plate)?;
        if violation_type.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "violationType",
            });
        }
        if evidence_urls.is_empty() {
            return Err(ValidationError::NoEvidence);
        }
        Ok(Self {
            vehicle_plate: plate,
            violation_type: violation_type.trim().to_owned(),
            evidence_urls,
            location,
            note: None,
        })
    }

    /// Attaches a free-text note.
    #[must_use]
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_owned());
        self
    }
}

/// A reviewer's decision on a pending record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecision {
    /// `true` to approve, `false` to reject.
    pub approve: bool,
    /// Reviewer notes. Required non-empty for either decision.
    pub notes: String,
}

impl ReviewDecision {
    /// Builds a decision, requiring non-empty notes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `notes` is blank.
    pub fn new(approve: bool, notes: &str) -> Result<Self, ValidationError> {
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(ValidationError::EmptyField { field: "notes" });
        }
        Ok(Self {
            approve,
            notes: notes.to_owned(),
        })
    }
}

/// Payload for appealing a rejected record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppeal {
    /// Why the rejection should be reconsidered.
    pub reason: String,
    /// Hosted URLs of newly uploaded evidence. Never empty.
    pub evidence_urls: Vec<String>,
}

impl NewAppeal {
    /// Builds an appeal payload, requiring a reason and new evidence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the reason is blank or no new
    /// evidence was uploaded.
    pub fn new(reason: &str, evidence_urls: Vec<String>) -> Result<Self, ValidationError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::EmptyField { field: "reason" });
        }
        if evidence_urls.is_empty() {
            return Err(ValidationError::NoEvidence);
        }
        Ok(Self {
            reason: reason.to_owned(),
            evidence_urls,
        })
    }
}

/// Payload for initiating a payment against a fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInit {
    /// Fine to pay.
    pub fine_id: String,
    /// Gateway method label (e.g., `"CARD"`, `"MOBILE_BANKING"`).
    pub method: String,
}

impl PaymentInit {
    /// Builds a payment initiation payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when either field is blank.
    pub fn new(fine_id: &str, method: &str) -> Result<Self, ValidationError> {
        if fine_id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "fineId" });
        }
        if method.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "method" });
        }
        Ok(Self {
            fine_id: fine_id.trim().to_owned(),
            method: method.trim().to_owned(),
        })
    }
}
