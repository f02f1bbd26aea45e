//! Camera fleet operations.

use roadwatch_api_models::{Camera, CameraStatus};

use crate::service::CamerasService;
use crate::SyncError;

impl CamerasService {
    /// Sets a camera's operational status (e.g., taking one into
    /// maintenance). The server's returned record is patched in place.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] when the backend declines.
    pub async fn set_status(&self, id: &str, status: CameraStatus) -> Result<Camera, SyncError> {
        let updated = self.client().update_camera_status(id, status).await?;
        log::info!("[cameras] {id} -> {status}");
        if !self.lock().patch_record(updated.clone()) {
            log::debug!("[cameras] updated record {id} not in the cached page");
        }
        Ok(updated)
    }
}
