//! Typed client surface over the transport.
//!
//! One method per backend operation. List responses are normalized into
//! [`ResourceList`] here — including the per-resource items field name —
//! so the store and service layers never see raw envelopes.

use std::collections::BTreeMap;
use std::sync::Arc;

use roadwatch_api_models::{
    Accident, AccidentStatus, Camera, CameraStatus, Fine, MutationResponse, NewAppeal, NewReport,
    Notification, Payment, PaymentInit, PoliceStation, Report, ResourceList, ReviewDecision,
    StatsSummary, Violation, ViolationType,
};
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, Credentials};
use crate::endpoints::{self, EndpointDef};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::{ApiError, GENERIC_REQUEST_ERROR};

/// Typed, authenticated client for the RoadWatch backend.
///
/// Holds no cache and performs no retries; it translates typed requests
/// into HTTP calls and normalizes the response envelopes.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    page_size: u32,
}

impl ApiClient {
    /// Creates a client over the production HTTP transport.
    #[must_use]
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(&config.api_url, credentials)),
            page_size: config.page_size,
        }
    }

    /// Creates a client over an arbitrary transport. Test seam.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, page_size: u32) -> Self {
        Self {
            transport,
            page_size,
        }
    }

    /// Default records-per-page for list calls.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    // ── Generic plumbing ────────────────────────────────────────────

    /// Fetches one page of a collection.
    ///
    /// Filter params are passed through unmodified — the backend does the
    /// filtering, never the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// envelope that does not decode.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        def: &EndpointDef,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<T>, ApiError> {
        let request = ApiRequest::get(def.path)
            .with_param("page", &page.to_string())
            .with_param("limit", &limit.to_string())
            .with_params(filters.iter().map(|(k, v)| (k.clone(), v.clone())));

        log::debug!("[{}] fetching page {page} (limit {limit})", def.label);

        let response = self.transport.execute(&request).await?;
        let body = check_envelope(response)?;
        let list = parse_list(&body, def, limit)?;

        log::debug!(
            "[{}] page {page}: {} of {} records",
            def.label,
            list.items.len(),
            list.total
        );
        Ok(list)
    }

    /// Fetches a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a
    /// record that does not decode.
    pub async fn fetch_record<T: DeserializeOwned>(
        &self,
        def: &EndpointDef,
        id: &str,
    ) -> Result<T, ApiError> {
        let request = ApiRequest::get(&def.record_path(id));
        let response = self.transport.execute(&request).await?;
        let body = check_envelope(response)?;
        decode_data(&body)
    }

    async fn mutate<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        label: &str,
    ) -> Result<MutationResponse<T>, ApiError> {
        log::info!("[{label}] {} {}", request.method.as_str(), request.path);
        let response = self.transport.execute(&request).await?;
        let body = check_envelope(response)?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode {
            message: format!("[{label}] mutation envelope: {e}"),
        })
    }

    async fn mutate_record<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        label: &str,
    ) -> Result<T, ApiError> {
        let envelope: MutationResponse<T> = self.mutate(request, label).await?;
        envelope.data.ok_or_else(|| ApiError::Decode {
            message: format!("[{label}] mutation response carried no record"),
        })
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Lists citizen reports.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_reports(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Report>, ApiError> {
        self.fetch_list(&endpoints::REPORTS, page, limit, filters).await
    }

    /// Fetches one report.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn get_report(&self, id: &str) -> Result<Report, ApiError> {
        self.fetch_record(&endpoints::REPORTS, id).await
    }

    /// Submits a new citizen report. The payload has already passed
    /// client-side validation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn submit_report(&self, report: &NewReport) -> Result<Report, ApiError> {
        let body = to_body(report)?;
        self.mutate_record(ApiRequest::post(endpoints::REPORTS.path, body), "reports")
            .await
    }

    /// Applies a review decision to a pending report. The backend returns
    /// the updated record, which callers patch in place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn review_report(
        &self,
        id: &str,
        decision: &ReviewDecision,
    ) -> Result<Report, ApiError> {
        let body = to_body(decision)?;
        let path = format!("{}/review", endpoints::REPORTS.record_path(id));
        self.mutate_record(ApiRequest::put(&path, body), "reports").await
    }

    /// Files an appeal against a rejected report.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn submit_appeal(&self, id: &str, appeal: &NewAppeal) -> Result<Report, ApiError> {
        let body = to_body(appeal)?;
        let path = format!("{}/appeal", endpoints::REPORTS.record_path(id));
        self.mutate_record(ApiRequest::post(&path, body), "reports").await
    }

    /// Deletes a report. Callers remove the record from local state only
    /// after this resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request failure.
    pub async fn delete_report(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(&endpoints::REPORTS.record_path(id));
        let _: MutationResponse<serde_json::Value> = self.mutate(request, "reports").await?;
        Ok(())
    }

    // ── Violations / fines / payments ───────────────────────────────

    /// Lists police-filed violations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_violations(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Violation>, ApiError> {
        self.fetch_list(&endpoints::VIOLATIONS, page, limit, filters).await
    }

    /// Lists fines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_fines(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Fine>, ApiError> {
        self.fetch_list(&endpoints::FINES, page, limit, filters).await
    }

    /// Lists payment attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_payments(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Payment>, ApiError> {
        self.fetch_list(&endpoints::PAYMENTS, page, limit, filters).await
    }

    /// Initiates a payment against a fine.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn pay_fine(&self, init: &PaymentInit) -> Result<Payment, ApiError> {
        let body = to_body(init)?;
        self.mutate_record(ApiRequest::post(endpoints::PAYMENTS.path, body), "payments")
            .await
    }

    // ── Notifications ───────────────────────────────────────────────

    /// Lists notifications for the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_notifications(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Notification>, ApiError> {
        self.fetch_list(&endpoints::NOTIFICATIONS, page, limit, filters).await
    }

    /// Sets a notification's read flag. The server responds with the
    /// updated record, used to reconcile the optimistic local toggle.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn mark_notification_read(
        &self,
        id: &str,
        read: bool,
    ) -> Result<Notification, ApiError> {
        let path = format!("{}/read", endpoints::NOTIFICATIONS.record_path(id));
        let body = serde_json::json!({ "read": read });
        self.mutate_record(ApiRequest::put(&path, body), "notifications").await
    }

    // ── Accidents / stations / cameras ──────────────────────────────

    /// Lists accidents.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_accidents(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Accident>, ApiError> {
        self.fetch_list(&endpoints::ACCIDENTS, page, limit, filters).await
    }

    /// Moves an accident through its response lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn update_accident_status(
        &self,
        id: &str,
        status: AccidentStatus,
    ) -> Result<Accident, ApiError> {
        let path = format!("{}/status", endpoints::ACCIDENTS.record_path(id));
        let body = serde_json::json!({ "status": status });
        self.mutate_record(ApiRequest::put(&path, body), "accidents").await
    }

    /// Lists police stations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_stations(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<PoliceStation>, ApiError> {
        self.fetch_list(&endpoints::STATIONS, page, limit, filters).await
    }

    /// Lists traffic cameras.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_cameras(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Camera>, ApiError> {
        self.fetch_list(&endpoints::CAMERAS, page, limit, filters).await
    }

    /// Sets a camera's operational status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn update_camera_status(
        &self,
        id: &str,
        status: CameraStatus,
    ) -> Result<Camera, ApiError> {
        let path = format!("{}/status", endpoints::CAMERAS.record_path(id));
        let body = serde_json::json!({ "status": status });
        self.mutate_record(ApiRequest::put(&path, body), "cameras").await
    }

    // ── Catalog / analytics ─────────────────────────────────────────

    /// Lists the violation type catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn list_violation_types(
        &self,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<ViolationType>, ApiError> {
        self.fetch_list(&endpoints::VIOLATION_TYPES, page, limit, filters).await
    }

    /// Fetches the analytics summary counters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on request or decode failure.
    pub async fn fetch_stats(&self) -> Result<StatsSummary, ApiError> {
        let request = ApiRequest::get(endpoints::STATS_PATH);
        let response = self.transport.execute(&request).await?;
        let body = check_envelope(response)?;
        decode_data(&body)
    }
}

/// Serializes a payload into a JSON body.
fn to_body<T: serde::Serialize>(payload: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode {
        message: format!("request body: {e}"),
    })
}

/// Applies the error contract to a settled response.
///
/// Non-2xx becomes [`ApiError::Status`] carrying the body's `message`
/// verbatim (generic fallback when absent). A 2xx envelope with
/// `success: false` becomes [`ApiError::Rejected`].
fn check_envelope(response: ApiResponse) -> Result<serde_json::Value, ApiError> {
    let message_of = |body: &serde_json::Value| {
        body.get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| GENERIC_REQUEST_ERROR.to_owned(), ToOwned::to_owned)
    };

    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            message: message_of(&response.body),
        });
    }

    if let Some(success) = response.body.get("success").and_then(serde_json::Value::as_bool)
        && !success
    {
        return Err(ApiError::Rejected {
            message: message_of(&response.body),
        });
    }

    Ok(response.body)
}

/// Decodes the `data` field of a single-record envelope.
fn decode_data<T: DeserializeOwned>(body: &serde_json::Value) -> Result<T, ApiError> {
    let data = body.get("data").ok_or_else(|| ApiError::Decode {
        message: "response envelope has no data field".to_owned(),
    })?;
    serde_json::from_value(data.clone()).map_err(|e| ApiError::Decode {
        message: format!("data field: {e}"),
    })
}

/// Normalizes a list envelope into a [`ResourceList`].
///
/// Looks for the items array under the endpoint's configured field name,
/// falling back to a literal `items` field. `totalPages` is computed when
/// the backend omits it.
fn parse_list<T: DeserializeOwned>(
    body: &serde_json::Value,
    def: &EndpointDef,
    requested_limit: u32,
) -> Result<ResourceList<T>, ApiError> {
    let data = body.get("data").ok_or_else(|| ApiError::Decode {
        message: format!("[{}] list envelope has no data field", def.label),
    })?;

    let items_value = data
        .get(def.items_field)
        .or_else(|| data.get("items"))
        .ok_or_else(|| ApiError::Decode {
            message: format!(
                "[{}] list data has neither '{}' nor 'items'",
                def.label, def.items_field
            ),
        })?;

    let items: Vec<T> = serde_json::from_value(items_value.clone()).map_err(|e| {
        ApiError::Decode {
            message: format!("[{}] items: {e}", def.label),
        }
    })?;

    let total = data
        .get("total")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(items.len() as u64);
    let page = data
        .get("page")
        .and_then(serde_json::Value::as_u64)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(1);
    let limit = data
        .get("limit")
        .and_then(serde_json::Value::as_u64)
        .and_then(|l| u32::try_from(l).ok())
        .unwrap_or(requested_limit);

    let mut list = ResourceList::new(items, total, page, limit);
    if let Some(total_pages) = data.get("totalPages").and_then(serde_json::Value::as_u64)
        && let Ok(total_pages) = u32::try_from(total_pages)
    {
        list.total_pages = total_pages;
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use roadwatch_api_models::ReportStatus;

    use super::*;

    /// In-memory transport: pops canned responses, records requests.
    struct FakeTransport {
        responses: Mutex<Vec<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        fn with_responses(responses: Vec<ApiResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.responses.lock().unwrap().remove(0))
        }
    }

    fn report_json(id: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "status": status,
            "vehiclePlate": "DHA-1234",
            "violationType": "NO_HELMET",
            "evidenceUrls": ["https://media.example/e1.jpg"],
            "location": {"latitude": 23.78, "longitude": 90.41, "address": null},
            "note": null,
            "citizenId": "ctz_9",
            "reviewNotes": null,
            "reviewedAt": null,
            "appealSubmitted": false,
            "appealStatus": null,
            "rewardAmount": null,
            "penaltyAmount": null,
            "createdAt": "2025-06-01T10:00:00Z",
            "updatedAt": "2025-06-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn normalizes_resource_specific_items_field() {
        let transport = FakeTransport::with_responses(vec![ApiResponse {
            status: 200,
            body: serde_json::json!({
                "success": true,
                "data": {
                    "reports": [report_json("rpt_01", "PENDING")],
                    "total": 41,
                    "page": 1,
                    "limit": 20
                }
            }),
        }]);
        let client = ApiClient::with_transport(transport, 20);

        let list = client
            .list_reports(1, 20, &BTreeMap::new())
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].status, ReportStatus::Pending);
        assert_eq!(list.total, 41);
        assert_eq!(list.total_pages, 3);
    }

    #[tokio::test]
    async fn filters_pass_through_unmodified() {
        let transport = FakeTransport::with_responses(vec![ApiResponse {
            status: 200,
            body: serde_json::json!({
                "success": true,
                "data": {"reports": [], "total": 0, "page": 1, "limit": 20}
            }),
        }]);
        let client = ApiClient::with_transport(transport.clone(), 20);

        let mut filters = BTreeMap::new();
        filters.insert("status".to_owned(), "PENDING".to_owned());
        filters.insert("search".to_owned(), "dha".to_owned());
        client.list_reports(2, 20, &filters).await.unwrap();

        let requests = transport.recorded();
        assert_eq!(requests.len(), 1);
        let query = &requests[0].query;
        assert!(query.contains(&("page".to_owned(), "2".to_owned())));
        assert!(query.contains(&("status".to_owned(), "PENDING".to_owned())));
        assert!(query.contains(&("search".to_owned(), "dha".to_owned())));
    }

    #[tokio::test]
    async fn non_2xx_surfaces_backend_message_verbatim() {
        let transport = FakeTransport::with_responses(vec![ApiResponse {
            status: 403,
            body: serde_json::json!({"success": false, "message": "Review already completed"}),
        }]);
        let client = ApiClient::with_transport(transport, 20);

        let decision = ReviewDecision::new(true, "clear footage").unwrap();
        let err = client.review_report("rpt_01", &decision).await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Review already completed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_message_falls_back_to_generic() {
        let transport = FakeTransport::with_responses(vec![ApiResponse {
            status: 500,
            body: serde_json::Value::Null,
        }]);
        let client = ApiClient::with_transport(transport, 20);

        let err = client
            .list_reports(1, 20, &BTreeMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), GENERIC_REQUEST_ERROR);
    }

    #[tokio::test]
    async fn unsuccessful_2xx_envelope_is_rejected() {
        let transport = FakeTransport::with_responses(vec![ApiResponse {
            status: 200,
            body: serde_json::json!({"success": false, "message": "Appeal window closed"}),
        }]);
        let client = ApiClient::with_transport(transport, 20);

        let appeal = NewAppeal::new("wrong vehicle", vec!["https://m.example/e2.jpg".to_owned()])
            .unwrap();
        let err = client.submit_appeal("rpt_01", &appeal).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { ref message } if message == "Appeal window closed"));
    }

    #[tokio::test]
    async fn mutation_returns_updated_record() {
        let transport = FakeTransport::with_responses(vec![ApiResponse {
            status: 200,
            body: serde_json::json!({
                "success": true,
                "data": report_json("rpt_01", "APPROVED"),
                "message": "Report approved"
            }),
        }]);
        let client = ApiClient::with_transport(transport, 20);

        let decision = ReviewDecision::new(true, "clear footage").unwrap();
        let report = client.review_report("rpt_01", &decision).await.unwrap();
        assert_eq!(report.status, ReportStatus::Approved);
    }
}
