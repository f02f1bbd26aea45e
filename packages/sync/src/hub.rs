//! One handle over every resource service, plus the cross-store effects.
//!
//! Stores never observe each other: approving a report changes the stats
//! counters on the server, but the stats store only learns about it when
//! someone refreshes it. The hub owns that coupling — every mutation that
//! moves records between status buckets dispatches the stats refresh
//! alongside, in one place, instead of each call site remembering to.

use std::sync::Arc;
use std::time::Duration;

use roadwatch_api::ApiClient;
use roadwatch_api_models::{
    Accident, AccidentStatus, NewAppeal, Payment, PaymentInit, Report, ReviewDecision,
};
use roadwatch_poll::PollHandle;

use crate::service::{
    AccidentsService, CamerasService, FinesService, NotificationsService, PaymentsService,
    ReportsService, ResourceService, StationsService, ViolationTypesService, ViolationsService,
};
use crate::stats::StatsService;
use crate::SyncError;

/// All resource services over one API client.
pub struct SyncHub {
    /// Citizen violation reports.
    pub reports: ReportsService,
    /// Police-filed violations.
    pub violations: ViolationsService,
    /// Issued fines.
    pub fines: FinesService,
    /// Payment attempts.
    pub payments: PaymentsService,
    /// In-app notifications.
    pub notifications: NotificationsService,
    /// Road accidents.
    pub accidents: AccidentsService,
    /// Police stations.
    pub stations: StationsService,
    /// Traffic cameras.
    pub cameras: CamerasService,
    /// Violation type catalog.
    pub violation_types: ViolationTypesService,
    /// Analytics counters.
    pub stats: StatsService,
}

impl SyncHub {
    /// Builds every service over the given client.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            reports: ResourceService::new(Arc::clone(&client)),
            violations: ResourceService::new(Arc::clone(&client)),
            fines: ResourceService::new(Arc::clone(&client)),
            payments: ResourceService::new(Arc::clone(&client)),
            notifications: ResourceService::new(Arc::clone(&client)),
            accidents: ResourceService::new(Arc::clone(&client)),
            stations: ResourceService::new(Arc::clone(&client)),
            cameras: ResourceService::new(Arc::clone(&client)),
            violation_types: ResourceService::new(Arc::clone(&client)),
            stats: StatsService::new(client),
        }
    }

    /// Applies a review decision and refreshes the stats counters, so
    /// the PENDING/APPROVED buckets move together with the record.
    ///
    /// # Errors
    ///
    /// Returns the review's [`SyncError`]; a stats refresh failure is
    /// logged, not propagated.
    pub async fn review_report(
        &self,
        id: &str,
        decision: &ReviewDecision,
    ) -> Result<Report, SyncError> {
        let updated = self.reports.review(id, decision).await?;
        self.refresh_stats_after("review").await;
        Ok(updated)
    }

    /// Files an appeal and refreshes the stats counters.
    ///
    /// # Errors
    ///
    /// Returns the appeal's [`SyncError`].
    pub async fn submit_appeal(&self, id: &str, appeal: &NewAppeal) -> Result<Report, SyncError> {
        let updated = self.reports.appeal(id, appeal).await?;
        self.refresh_stats_after("appeal").await;
        Ok(updated)
    }

    /// Moves an accident through its lifecycle and refreshes the stats
    /// counters.
    ///
    /// # Errors
    ///
    /// Returns the update's [`SyncError`].
    pub async fn update_accident_status(
        &self,
        id: &str,
        status: AccidentStatus,
    ) -> Result<Accident, SyncError> {
        let updated = self.accidents.update_status(id, status).await?;
        self.refresh_stats_after("accident update").await;
        Ok(updated)
    }

    /// Pays a fine and refreshes the stats counters (collected volume).
    ///
    /// # Errors
    ///
    /// Returns the payment's [`SyncError`].
    pub async fn pay_fine(&self, init: &PaymentInit) -> Result<Payment, SyncError> {
        let payment = self.fines.pay(init).await?;
        self.refresh_stats_after("payment").await;
        Ok(payment)
    }

    /// Initial dashboard load: reports, accidents, and stats fetched
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure; the other stores still settle
    /// their own results.
    pub async fn refresh_dashboard(&self) -> Result<(), SyncError> {
        let (reports, accidents, stats) = futures::future::join3(
            self.reports.fetch(),
            self.accidents.fetch(),
            self.stats.refresh(),
        )
        .await;
        reports?;
        accidents?;
        stats
    }

    /// Starts the dashboard stats poll loop. Dropping the handle stops
    /// it.
    #[must_use]
    pub fn start_stats_polling(&self, period: Duration) -> PollHandle {
        self.stats.spawn_refresh_loop(period)
    }

    async fn refresh_stats_after(&self, action: &str) {
        if let Err(e) = self.stats.refresh().await {
            log::warn!("[stats] refresh after {action} failed: {}", e.user_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use roadwatch_api_models::ReportStatus;

    use crate::test_support::{list_body, mutation_body, report_json, stats_json, FakeTransport};

    use super::*;

    #[tokio::test]
    async fn approval_moves_the_stats_buckets() {
        let transport = FakeTransport::new();
        // Initial dashboard state: list + stats.
        transport.push_ok(list_body(
            "reports",
            vec![report_json("rpt_01", "PENDING")],
            1,
            1,
            20,
        ));
        transport.push_ok(stats_json(5, 2, 1));
        // Review mutation, then the coupled stats refresh.
        transport.push_ok(mutation_body(
            report_json("rpt_01", "APPROVED"),
            "Report approved",
        ));
        transport.push_ok(stats_json(4, 3, 1));

        let client = transport.client(20);
        let hub = SyncHub::new(client);
        hub.reports.fetch().await.unwrap();
        hub.stats.refresh().await.unwrap();

        let before = hub.stats.summary().unwrap();
        assert_eq!((before.pending_reports, before.approved_reports), (5, 2));

        let decision = ReviewDecision::new(true, "clear footage").unwrap();
        let updated = hub.review_report("rpt_01", &decision).await.unwrap();
        assert_eq!(updated.status, ReportStatus::Approved);

        let after = hub.stats.summary().unwrap();
        assert_eq!(
            (after.pending_reports, after.approved_reports),
            (4, 3),
            "PENDING decrements and APPROVED increments after the refresh"
        );
    }

    #[tokio::test]
    async fn failed_stats_refresh_does_not_mask_the_mutation() {
        let transport = FakeTransport::new();
        transport.push_ok(list_body(
            "reports",
            vec![report_json("rpt_01", "PENDING")],
            1,
            1,
            20,
        ));
        transport.push_ok(mutation_body(
            report_json("rpt_01", "APPROVED"),
            "Report approved",
        ));
        transport.push_status(502, serde_json::json!({"message": "Bad gateway"}));

        let hub = SyncHub::new(transport.client(20));
        hub.reports.fetch().await.unwrap();

        let decision = ReviewDecision::new(true, "clear footage").unwrap();
        let updated = hub.review_report("rpt_01", &decision).await.unwrap();
        assert_eq!(updated.status, ReportStatus::Approved);
        assert_eq!(hub.stats.error().as_deref(), Some("Bad gateway"));
    }

    #[tokio::test]
    async fn dashboard_refresh_settles_all_three_stores() {
        let transport = FakeTransport::new();
        transport.push_ok(list_body(
            "reports",
            vec![report_json("rpt_01", "PENDING")],
            1,
            1,
            20,
        ));
        transport.push_ok(list_body("accidents", vec![], 0, 1, 20));
        transport.push_ok(stats_json(5, 2, 1));

        let hub = SyncHub::new(transport.client(20));
        hub.refresh_dashboard().await.unwrap();

        assert!(hub.stats.summary().is_some());
        let reports = hub.reports.store();
        assert_eq!(reports.lock().unwrap().data().unwrap().total, 1);
        let accidents = hub.accidents.store();
        assert_eq!(accidents.lock().unwrap().data().unwrap().total, 0);
    }
}
