//! Generic list service and the per-resource endpoint bindings.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use roadwatch_api::{ApiClient, ApiError};
use roadwatch_api_models::{
    Accident, Camera, Fine, Identified, Notification, Payment, PoliceStation, Report,
    ResourceList, Violation, ViolationType,
};
use roadwatch_store::{FilterValue, ResourceStore};

use crate::SyncError;

/// A store shared between the service and any number of readers.
pub type SharedStore<T> = Arc<Mutex<ResourceStore<T>>>;

/// Binds a record type to its collection endpoint on the client.
#[async_trait]
pub trait ListEndpoint: Identified + Clone + Send + Sync + Sized + 'static {
    /// Label for stores and log messages.
    const LABEL: &'static str;

    /// Fetches one page of this record's collection.
    async fn list(
        client: &ApiClient,
        page: u32,
        limit: u32,
        filters: &BTreeMap<String, String>,
    ) -> Result<ResourceList<Self>, ApiError>;
}

macro_rules! impl_list_endpoint {
    ($($ty:ty => ($label:literal, $method:ident)),+ $(,)?) => {
        $(
            #[async_trait]
            impl ListEndpoint for $ty {
                const LABEL: &'static str = $label;

                async fn list(
                    client: &ApiClient,
                    page: u32,
                    limit: u32,
                    filters: &BTreeMap<String, String>,
                ) -> Result<ResourceList<Self>, ApiError> {
                    client.$method(page, limit, filters).await
                }
            }
        )+
    };
}

impl_list_endpoint!(
    Report => ("reports", list_reports),
    Violation => ("violations", list_violations),
    Fine => ("fines", list_fines),
    Payment => ("payments", list_payments),
    Notification => ("notifications", list_notifications),
    Accident => ("accidents", list_accidents),
    PoliceStation => ("stations", list_stations),
    Camera => ("cameras", list_cameras),
    ViolationType => ("violation types", list_violation_types),
);

/// Fetch-and-cache service for one resource family.
///
/// Holds the family's store behind a mutex so concurrent dispatches from
/// different tasks interleave safely; the lock is never held across an
/// await point.
pub struct ResourceService<T> {
    client: Arc<ApiClient>,
    store: SharedStore<T>,
}

impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: ListEndpoint> ResourceService<T> {
    /// Creates a service with an empty store sized to the client's
    /// default page size.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        let limit = client.page_size();
        Self {
            client,
            store: Arc::new(Mutex::new(ResourceStore::new(T::LABEL, limit))),
        }
    }

    /// The shared store, for selector reads.
    #[must_use]
    pub fn store(&self) -> SharedStore<T> {
        Arc::clone(&self.store)
    }

    /// The underlying API client.
    #[must_use]
    pub(crate) const fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, ResourceStore<T>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A clone of the cached record with the given id, if present.
    #[must_use]
    pub fn cached(&self, id: &str) -> Option<T> {
        self.lock()
            .data()
            .and_then(|list| list.items.iter().find(|item| item.record_id() == id).cloned())
    }

    /// Fetches the current page with the current filters and settles the
    /// result into the store.
    ///
    /// The issued sequence number is captured before the request leaves;
    /// if a newer fetch is dispatched while this one is in flight, this
    /// settlement is discarded by the store's fencing.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] on request failure. The store records
    /// the user-facing message either way.
    pub async fn fetch(&self) -> Result<(), SyncError> {
        let (seq, page, limit, params) = {
            let mut store = self.lock();
            let seq = store.begin_fetch();
            (
                seq,
                store.page(),
                store.limit(),
                store.filters().to_query_params(),
            )
        };

        log::debug!("[{}] fetch seq {seq} (page {page})", T::LABEL);

        match T::list(&self.client, page, limit, &params).await {
            Ok(list) => {
                self.lock().apply_success(seq, list);
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.lock().apply_failure(seq, &message);
                Err(SyncError::Api(e))
            }
        }
    }

    /// Merges a partial filter update (page resets to 1) and refetches.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] if the refetch fails.
    pub async fn set_filters<I, K>(&self, partial: I) -> Result<(), SyncError>
    where
        I: IntoIterator<Item = (K, Option<FilterValue>)>,
        K: Into<String>,
    {
        self.lock().set_filters(partial);
        self.fetch().await
    }

    /// Clears every filter (page resets to 1) and refetches.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] if the refetch fails.
    pub async fn clear_filters(&self) -> Result<(), SyncError> {
        self.lock().clear_filters();
        self.fetch().await
    }

    /// Moves the page cursor and refetches.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] if the refetch fails.
    pub async fn set_page(&self, page: u32) -> Result<(), SyncError> {
        self.lock().set_page(page);
        self.fetch().await
    }

    /// Refetches the current page after a list-shaping mutation. Failures
    /// are logged, not propagated — the mutation itself already
    /// succeeded, and the stale list heals on the next fetch.
    pub(crate) async fn refetch_after_mutation(&self, action: &str) {
        if let Err(e) = self.fetch().await {
            log::warn!(
                "[{}] refetch after {action} failed: {}",
                T::LABEL,
                e.user_message()
            );
        }
    }
}

/// Citizen violation reports.
pub type ReportsService = ResourceService<Report>;
/// Police-filed violations.
pub type ViolationsService = ResourceService<Violation>;
/// Issued fines.
pub type FinesService = ResourceService<Fine>;
/// Payment attempts.
pub type PaymentsService = ResourceService<Payment>;
/// In-app notifications.
pub type NotificationsService = ResourceService<Notification>;
/// Road accidents.
pub type AccidentsService = ResourceService<Accident>;
/// Police stations.
pub type StationsService = ResourceService<PoliceStation>;
/// Traffic cameras.
pub type CamerasService = ResourceService<Camera>;
/// Violation type catalog.
pub type ViolationTypesService = ResourceService<ViolationType>;
