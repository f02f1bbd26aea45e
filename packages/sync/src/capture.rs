//! Report capture: the full citizen submission flow.
//!
//! Orchestrates the three collaborators a submission touches, with the
//! error policy each one gets:
//!
//! 1. **Client-local validation** (plate format, evidence presence,
//!    coordinate range) — fails immediately, nothing leaves the device.
//! 2. **Evidence upload** — an upload failure halts the flow; a report
//!    without hosted evidence is not submittable.
//! 3. **Reverse geocoding** — failure degrades: the address stays blank,
//!    the coordinates still go out, the submission proceeds.
//! 4. **Submission** — backend errors surface verbatim.

use std::sync::Arc;

use roadwatch_api_models::{normalize_plate, LocationPayload, NewReport, Report, ValidationError};
use roadwatch_geocode::ReverseGeocoder;
use roadwatch_media::{EvidenceFile, EvidenceHost};

use crate::service::ReportsService;
use crate::SyncError;

/// A report as captured by the form, before any network activity.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    /// Vehicle plate as typed (normalized during submission).
    pub vehicle_plate: String,
    /// Violation type code.
    pub violation_type: String,
    /// Evidence files to upload. At least one is required.
    pub files: Vec<EvidenceFile>,
    /// Captured latitude.
    pub latitude: f64,
    /// Captured longitude.
    pub longitude: f64,
    /// Optional free-text description.
    pub note: Option<String>,
}

/// The submission flow, bound to an evidence host and (optionally) a
/// reverse geocoder.
pub struct ReportCapture {
    reports: ReportsService,
    host: Arc<dyn EvidenceHost>,
    geocoder: Option<ReverseGeocoder>,
}

impl ReportCapture {
    /// Creates a flow without address resolution.
    #[must_use]
    pub fn new(reports: ReportsService, host: Arc<dyn EvidenceHost>) -> Self {
        Self {
            reports,
            host,
            geocoder: None,
        }
    }

    /// Enables reverse geocoding of captured coordinates.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: ReverseGeocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Runs the full submission flow for a draft.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] before any network call for
    /// local rule failures, [`SyncError::Upload`] when evidence hosting
    /// fails (the flow halts), and [`SyncError::Api`] when the backend
    /// declines the submission. Geocoding failures are not errors.
    pub async fn submit(&self, draft: ReportDraft) -> Result<Report, SyncError> {
        // Everything checkable locally is checked before bytes move.
        let plate = normalize_plate(&draft.vehicle_plate)?;
        if draft.files.is_empty() {
            return Err(ValidationError::NoEvidence.into());
        }
        let mut location = LocationPayload::new(draft.latitude, draft.longitude)?;

        // Evidence hosting gates the submission.
        let mut evidence_urls = Vec::with_capacity(draft.files.len());
        for file in draft.files {
            evidence_urls.push(self.host.upload(file).await?);
        }

        // Geocoding only decorates; a miss leaves the address blank.
        if let Some(geocoder) = &self.geocoder
            && let Some(resolved) = geocoder
                .reverse_or_none(draft.latitude, draft.longitude)
                .await
        {
            location = location.with_address(&resolved.address);
        }

        let mut report = NewReport::new(&plate, &draft.violation_type, evidence_urls, location)?;
        if let Some(note) = &draft.note {
            report = report.with_note(note);
        }
        self.reports.submit(&report).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use roadwatch_api_models::ReportStatus;
    use roadwatch_media::UploadError;

    use crate::service::ResourceService;
    use crate::test_support::{list_body, mutation_body, report_json, FakeTransport};

    use super::*;

    /// Host fake: pops scripted outcomes per upload.
    struct FakeHost {
        outcomes: Mutex<Vec<Result<String, UploadError>>>,
    }

    impl FakeHost {
        fn with(outcomes: Vec<Result<String, UploadError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
            })
        }
    }

    #[async_trait]
    impl EvidenceHost for FakeHost {
        async fn upload(&self, _file: EvidenceFile) -> Result<String, UploadError> {
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn draft() -> ReportDraft {
        ReportDraft {
            vehicle_plate: "dha-1234".to_owned(),
            violation_type: "NO_HELMET".to_owned(),
            files: vec![EvidenceFile::new("helmet.jpg", vec![0xFF, 0xD8])],
            latitude: 23.7808,
            longitude: 90.4179,
            note: None,
        }
    }

    #[tokio::test]
    async fn full_flow_uploads_then_submits() {
        let transport = FakeTransport::new();
        transport.push_ok(mutation_body(
            report_json("rpt_new", "PENDING"),
            "Report submitted",
        ));
        transport.push_ok(list_body(
            "reports",
            vec![report_json("rpt_new", "PENDING")],
            1,
            1,
            20,
        ));
        let reports: ReportsService = ResourceService::new(transport.client(20));
        let host = FakeHost::with(vec![Ok("https://media.example/e1.jpg".to_owned())]);
        let capture = ReportCapture::new(reports, host);

        let report = capture.submit(draft()).await.unwrap();
        assert_eq!(report.status, ReportStatus::Pending);

        let posted = &transport.recorded()[0];
        let body = posted.body.as_ref().unwrap();
        assert_eq!(body["vehiclePlate"], "DHA-1234");
        assert_eq!(body["evidenceUrls"][0], "https://media.example/e1.jpg");
        assert_eq!(body["location"]["latitude"], 23.7808);
    }

    #[tokio::test]
    async fn upload_failure_halts_before_submission() {
        let transport = FakeTransport::new();
        let reports: ReportsService = ResourceService::new(transport.client(20));
        let host = FakeHost::with(vec![Err(UploadError::Rejected {
            status: 400,
            message: "Invalid upload preset".to_owned(),
        })]);
        let capture = ReportCapture::new(reports, host);

        let err = capture.submit(draft()).await.unwrap_err();
        assert!(matches!(err, SyncError::Upload(_)));
        // The backend never heard about it.
        assert!(transport.recorded().is_empty());
    }

    #[tokio::test]
    async fn invalid_plate_fails_before_any_upload() {
        let transport = FakeTransport::new();
        let reports: ReportsService = ResourceService::new(transport.client(20));
        // Empty outcome list: an upload attempt would panic the fake.
        let host = FakeHost::with(Vec::new());
        let capture = ReportCapture::new(reports, host);

        let mut bad = draft();
        bad.vehicle_plate = "not a plate".to_owned();
        let err = capture.submit(bad).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Validation(ValidationError::InvalidPlate { .. })
        ));
        assert!(transport.recorded().is_empty());
    }

    #[tokio::test]
    async fn missing_geocoder_leaves_address_blank() {
        let transport = FakeTransport::new();
        transport.push_ok(mutation_body(
            report_json("rpt_new", "PENDING"),
            "Report submitted",
        ));
        transport.push_ok(list_body("reports", vec![], 0, 1, 20));
        let reports: ReportsService = ResourceService::new(transport.client(20));
        let host = FakeHost::with(vec![Ok("https://media.example/e1.jpg".to_owned())]);
        let capture = ReportCapture::new(reports, host);

        capture.submit(draft()).await.unwrap();
        let body = transport.recorded()[0].body.clone().unwrap();
        assert_eq!(body["location"]["address"], serde_json::Value::Null);
    }
}
