#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Domain records and wire types for the RoadWatch API.
//!
//! These types are deserialized from the backend's JSON responses. They are
//! kept separate from the client and store crates so the API contract can
//! evolve independently of how the data is fetched or cached.

pub mod records;
pub mod requests;
pub mod status;

use serde::{Deserialize, Serialize};

pub use records::{
    Accident, Camera, Fine, GeoPoint, Identified, Notification, Payment, PoliceStation, Report,
    StatsSummary, Violation, ViolationType,
};
pub use requests::{
    LocationPayload, NewAppeal, NewReport, PaymentInit, ReviewDecision, ValidationError,
    normalize_plate,
};
pub use status::{
    AccidentStatus, AppealStatus, CameraStatus, NotificationKind, PaymentStatus, ReportStatus,
};

/// One page of a remote collection, as mirrored locally.
///
/// `page` is 1-based. The server is responsible for clamping `page` into
/// `[1, total_pages]`; the client never clamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList<T> {
    /// Records in server-assigned order (never reordered locally).
    pub items: Vec<T>,
    /// Total number of records matching the query, across all pages.
    pub total: u64,
    /// 1-based page number of this slice.
    pub page: u32,
    /// Maximum number of records per page.
    pub limit: u32,
    /// Total number of pages. Computed from `total` and `limit` when the
    /// backend omits it.
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> ResourceList<T> {
    /// Creates a list page, computing `total_pages` from `total` and
    /// `limit`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = Self::pages_for(total, limit);
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// `ceil(total / limit)`, with `limit == 0` treated as a single page.
    #[must_use]
    pub const fn pages_for(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 1;
        }
        let pages = total.div_ceil(limit as u64);
        if pages > u32::MAX as u64 {
            u32::MAX
        } else {
            pages as u32
        }
    }

    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns an empty first page.
    #[must_use]
    pub const fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit,
            total_pages: 0,
        }
    }
}

/// Envelope returned by mutation endpoints (`POST`/`PUT`/`DELETE`).
///
/// Non-2xx responses carry `message`, which is surfaced to users verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse<T> {
    /// Whether the backend accepted the mutation.
    pub success: bool,
    /// The affected record, when the endpoint returns one.
    pub data: Option<T>,
    /// Human-readable outcome message.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceil() {
        assert_eq!(ResourceList::<()>::pages_for(0, 10), 0);
        assert_eq!(ResourceList::<()>::pages_for(1, 10), 1);
        assert_eq!(ResourceList::<()>::pages_for(10, 10), 1);
        assert_eq!(ResourceList::<()>::pages_for(11, 10), 2);
        assert_eq!(ResourceList::<()>::pages_for(101, 25), 5);
    }

    #[test]
    fn zero_limit_is_single_page() {
        assert_eq!(ResourceList::<()>::pages_for(42, 0), 1);
    }

    #[test]
    fn has_more_respects_last_page() {
        let list: ResourceList<u8> = ResourceList::new(vec![1, 2], 12, 2, 10);
        assert!(!list.has_more());
        let list: ResourceList<u8> = ResourceList::new(vec![1, 2], 12, 1, 10);
        assert!(list.has_more());
    }
}
