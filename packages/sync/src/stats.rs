//! Analytics summary service.
//!
//! The stats endpoint returns a single object rather than a collection,
//! so this service carries its own small lifecycle state instead of a
//! [`roadwatch_store::ResourceStore`]. The semantics match: loading flag
//! while in flight, stale data preserved on failure, and sequence
//! fencing so an old in-flight refresh cannot overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use roadwatch_api::ApiClient;
use roadwatch_api_models::StatsSummary;
use roadwatch_poll::PollHandle;

use crate::SyncError;

#[derive(Debug, Default)]
struct StatsState {
    data: Option<StatsSummary>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

/// Fetch-and-cache service for the analytics counters.
pub struct StatsService {
    client: Arc<ApiClient>,
    state: Arc<Mutex<StatsState>>,
}

impl Clone for StatsService {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            state: Arc::clone(&self.state),
        }
    }
}

impl StatsService {
    /// Creates a service with no cached summary.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(StatsState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StatsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached summary, if any.
    #[must_use]
    pub fn summary(&self) -> Option<StatsSummary> {
        self.lock().data.clone()
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// The last recorded refresh error.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Refetches the counters. Dispatched alongside any mutation that
    /// moves records between status buckets (see [`crate::SyncHub`]),
    /// and on a poll cadence by the dashboards.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] on request failure; the prior summary
    /// is left in place.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let seq = {
            let mut state = self.lock();
            state.issued += 1;
            state.loading = true;
            state.issued
        };

        match self.client.fetch_stats().await {
            Ok(summary) => {
                let mut state = self.lock();
                if seq == state.issued {
                    state.data = Some(summary);
                    state.loading = false;
                    state.error = None;
                }
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                let mut state = self.lock();
                if seq == state.issued {
                    state.loading = false;
                    state.error = Some(message);
                }
                Err(SyncError::Api(e))
            }
        }
    }

    /// Starts a dashboard refresh loop. The returned handle is a scoped
    /// resource: dropping it (or calling `stop`) guarantees no further
    /// refreshes are dispatched.
    #[must_use]
    pub fn spawn_refresh_loop(&self, period: Duration) -> PollHandle {
        let service = self.clone();
        PollHandle::spawn("stats", period, move || {
            let service = service.clone();
            async move {
                if let Err(e) = service.refresh().await {
                    log::warn!("[stats] scheduled refresh failed: {}", e.user_message());
                }
            }
        })
    }
}
