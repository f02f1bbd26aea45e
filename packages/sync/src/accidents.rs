//! Accident response lifecycle operations.

use roadwatch_api_models::{Accident, AccidentStatus};

use crate::service::AccidentsService;
use crate::SyncError;

impl AccidentsService {
    /// Moves an accident to a new response state
    /// (`ACTIVE → RESPONDING → RESOLVED`).
    ///
    /// The server returns the updated record, which is patched in place;
    /// status toggles never refetch. Stats counters move too — callers
    /// going through [`crate::SyncHub`] get that refresh dispatched
    /// alongside.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] when the backend declines.
    pub async fn update_status(
        &self,
        id: &str,
        status: AccidentStatus,
    ) -> Result<Accident, SyncError> {
        let updated = self.client().update_accident_status(id, status).await?;
        log::info!("[accidents] {id} -> {status}");
        if !self.lock().patch_record(updated.clone()) {
            log::debug!("[accidents] updated record {id} not in the cached page");
        }
        Ok(updated)
    }
}
