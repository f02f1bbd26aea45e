//! In-memory transport and canned payloads shared by the service tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use roadwatch_api::{ApiClient, ApiError, ApiRequest, ApiResponse, Transport};

/// One scripted response, optionally delayed to simulate a slow backend.
struct Scripted {
    response: ApiResponse,
    delay: Option<Duration>,
}

/// FIFO transport fake: pops scripted responses, records every request.
pub struct FakeTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Builds an [`ApiClient`] over this transport.
    pub fn client(self: &Arc<Self>, page_size: u32) -> Arc<ApiClient> {
        Arc::new(ApiClient::with_transport(
            Arc::clone(self) as Arc<dyn Transport>,
            page_size,
        ))
    }

    pub fn push_ok(&self, body: serde_json::Value) {
        self.push_status(200, body);
    }

    pub fn push_status(&self, status: u16, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Scripted {
            response: ApiResponse { status, body },
            delay: None,
        });
    }

    pub fn push_ok_delayed(&self, body: serde_json::Value, delay: Duration) {
        self.responses.lock().unwrap().push_back(Scripted {
            response: ApiResponse { status: 200, body },
            delay: Some(delay),
        });
    }

    pub fn recorded(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeTransport ran out of scripted responses");
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(scripted.response)
    }
}

/// A list envelope with the given items field name.
pub fn list_body(
    items_field: &str,
    items: Vec<serde_json::Value>,
    total: u64,
    page: u32,
    limit: u32,
) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            items_field: items,
            "total": total,
            "page": page,
            "limit": limit
        }
    })
}

/// A mutation envelope wrapping one record.
pub fn mutation_body(record: serde_json::Value, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": record,
        "message": message
    })
}

/// A report record in wire shape.
pub fn report_json(id: &str, status: &str) -> serde_json::Value {
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

/// A notification record in wire shape.
pub fn notification_json(id: &str, read: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "kind": "REPORT_UPDATE",
        "body": "Your report was reviewed",
        "read": read,
        "subjectId": "rpt_01",
        "createdAt": "2025-06-01T10:00:00Z",
        "updatedAt": "2025-06-01T10:00:00Z"
    })
}

/// An accident record in wire shape.
pub fn accident_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "location": {"latitude": 23.75, "longitude": 90.39, "address": null},
        "severity": 3,
        "description": "two-vehicle collision",
        "stationId": null,
        "createdAt": "2025-06-01T09:00:00Z",
        "updatedAt": "2025-06-01T09:00:00Z"
    })
}

/// A fine record in wire shape.
pub fn fine_json(id: &str, status: &str, amount: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "violationId": "vio_01",
        "vehiclePlate": "DHA-1234",
        "amount": amount,
        "issuedAt": "2025-06-01T10:00:00Z",
        "paidAt": null,
        "createdAt": "2025-06-01T10:00:00Z",
        "updatedAt": "2025-06-01T10:00:00Z"
    })
}

/// A payment record in wire shape.
pub fn payment_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "fineId": "fin_01",
        "amount": 500.0,
        "method": "MOBILE_BANKING",
        "transactionRef": "txn_778",
        "createdAt": "2025-06-02T10:00:00Z",
        "updatedAt": "2025-06-02T10:00:00Z"
    })
}

/// A camera record in wire shape.
pub fn camera_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "label": "Bijoy Sarani crossing",
        "location": {"latitude": 23.76, "longitude": 90.40, "address": null},
        "lastHeartbeat": "2025-06-02T10:00:00Z",
        "createdAt": "2025-05-01T10:00:00Z",
        "updatedAt": "2025-06-02T10:00:00Z"
    })
}

/// A stats summary in wire shape.
pub fn stats_json(pending: u64, approved: u64, rejected: u64) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "pendingReports": pending,
            "approvedReports": approved,
            "rejectedReports": rejected,
            "activeAccidents": 1,
            "respondingAccidents": 0,
            "resolvedAccidents": 4,
            "finesIssued": 15000.0,
            "finesCollected": 9000.0,
            "camerasOnline": 12,
            "camerasOffline": 2
        }
    })
}
