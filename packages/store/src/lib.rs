#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client-side cache for one remote collection per store.
//!
//! A [`ResourceStore`] owns the mirrored page, the active filters, and the
//! pagination cursor for a single resource family. It is the sole mutable
//! owner of that family's cached state — no two stores share data, and
//! cross-store consistency (a report approval moving a stats counter) is
//! the service layer's job.
//!
//! The store is deliberately passive: updating filters or the page cursor
//! never fetches anything. The owning service reads the cursor, issues the
//! request, and settles the result back in through the fetch lifecycle:
//!
//! ```text
//! begin_fetch() -> seq     (loading = true)
//! apply_success(seq, page) (data replaced, error cleared)
//! apply_failure(seq, msg)  (data untouched, error recorded)
//! ```
//!
//! Every fetch gets a monotonically increasing sequence number and only
//! the latest issued sequence may settle. When a user changes filters
//! twice in quick succession, the first (now stale) in-flight response is
//! discarded on arrival instead of overwriting the newer result.

pub mod filter;
pub mod selectors;
pub mod store;

pub use filter::{FilterSet, FilterValue};
pub use store::{AsyncResourceState, FetchSeq, OptimisticToken, ResourceStore};
