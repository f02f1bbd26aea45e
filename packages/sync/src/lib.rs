#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Resource services: the glue between the API client and the stores.
//!
//! Each remote collection gets a [`service::ResourceService`] owning that
//! family's [`roadwatch_store::ResourceStore`]. A service is the only
//! thing that fetches: store updates (filters, page cursor) never load
//! data by themselves — the service re-dispatches after changing them,
//! making the view-layer coupling of the original app an explicit,
//! testable contract.
//!
//! Mutations follow one reconciliation policy everywhere:
//!
//! - **list-shaping** mutations (submit, delete, payment) refetch the
//!   current page after the server confirms;
//! - **status-only** mutations where the server returns the updated
//!   record (review, appeal, read toggles, accident/camera status) patch
//!   that record in place.
//!
//! Cross-store effects — a review decision moving the stats counters —
//! are dispatched explicitly by [`SyncHub`], not discovered by accident.

pub mod accidents;
pub mod cameras;
pub mod capture;
pub mod fines;
pub mod hub;
pub mod notifications;
pub mod reports;
pub mod service;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use capture::{ReportCapture, ReportDraft};
pub use hub::SyncHub;
pub use service::{
    AccidentsService, CamerasService, FinesService, NotificationsService, PaymentsService,
    ReportsService, ResourceService, StationsService, ViolationTypesService, ViolationsService,
};
pub use stats::StatsService;

use roadwatch_api::ApiError;
use roadwatch_api_models::ValidationError;
use roadwatch_media::UploadError;
use roadwatch_review::ReviewError;

/// Errors from service operations.
///
/// Validation and review gate failures happen before any network call;
/// API failures carry the backend's message for verbatim display.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Client-local payload validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A workflow gate refused the operation.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Evidence hosting failed; the submission flow halts.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The request itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SyncError {
    /// The message to surface to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Review(e) => e.to_string(),
            Self::Upload(e) => e.to_string(),
            Self::Api(e) => e.user_message(),
        }
    }
}
