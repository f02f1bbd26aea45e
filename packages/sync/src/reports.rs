//! Report-specific operations: submission, review, appeal, deletion.

use roadwatch_api_models::{NewAppeal, NewReport, Report, ReviewDecision};

use crate::service::ReportsService;
use crate::SyncError;

impl ReportsService {
    /// Submits a citizen report. The payload has already passed
    /// client-side validation ([`NewReport::new`] uppercases the plate
    /// and requires evidence); evidence was uploaded by the caller
    /// beforehand.
    ///
    /// Submission shapes the list, so the current page is refetched
    /// after the server confirms. A refetch failure does not mask the
    /// successful submission.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] when the backend declines.
    pub async fn submit(&self, report: &NewReport) -> Result<Report, SyncError> {
        let created = self.client().submit_report(report).await?;
        log::info!(
            "[reports] submitted {} for plate {}",
            created.id,
            created.vehicle_plate
        );
        self.refetch_after_mutation("submit").await;
        Ok(created)
    }

    /// Applies a reviewer decision.
    ///
    /// The workflow gate runs first, against the cached record (fetched
    /// on demand when not cached): a record that already left `PENDING`
    /// is refused without a network call. On success the server's
    /// returned record is patched in place — a status-only toggle needs
    /// no refetch.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Review`] when the gate refuses and
    /// [`SyncError::Api`] when the backend declines.
    pub async fn review(
        &self,
        id: &str,
        decision: &ReviewDecision,
    ) -> Result<Report, SyncError> {
        let record = match self.cached(id) {
            Some(record) => record,
            None => self.client().get_report(id).await?,
        };
        roadwatch_review::validate_review(&record, decision)?;

        let updated = self.client().review_report(id, decision).await?;
        log::info!("[reports] {} reviewed -> {}", id, updated.status);
        if !self.lock().patch_record(updated.clone()) {
            log::debug!("[reports] reviewed record {id} not in the cached page");
        }
        Ok(updated)
    }

    /// Files an appeal against a rejected report.
    ///
    /// The appeal-once gate runs before any network call; callers are
    /// expected to have shown
    /// [`roadwatch_review::warning_copy`]`(SubmitAppeal)` — the
    /// compounding-penalty escalation — before invoking this.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Review`] when the record is not appealable
    /// and [`SyncError::Api`] when the backend declines.
    pub async fn appeal(&self, id: &str, appeal: &NewAppeal) -> Result<Report, SyncError> {
        let record = match self.cached(id) {
            Some(record) => record,
            None => self.client().get_report(id).await?,
        };
        roadwatch_review::validate_appeal(&record, appeal)?;

        let updated = self.client().submit_appeal(id, appeal).await?;
        log::info!("[reports] appeal filed for {id}");
        if !self.lock().patch_record(updated.clone()) {
            log::debug!("[reports] appealed record {id} not in the cached page");
        }
        Ok(updated)
    }

    /// Deletes a report. The record leaves local state only after the
    /// server confirms; the page is then refetched to heal totals.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] when the backend declines.
    pub async fn delete(&self, id: &str) -> Result<(), SyncError> {
        self.client().delete_report(id).await?;
        self.lock().remove_record(id);
        log::info!("[reports] deleted {id}");
        self.refetch_after_mutation("delete").await;
        Ok(())
    }
}
