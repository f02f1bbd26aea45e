//! The resource store and its fetch lifecycle.

use roadwatch_api_models::{Identified, ResourceList};

use crate::filter::{FilterSet, FilterValue};

/// Sequence number identifying one issued fetch.
pub type FetchSeq = u64;

/// Async lifecycle state for one mirrored collection.
///
/// Invariants:
/// - `loading == true` implies a request is in flight.
/// - A successful settlement replaces `data` and clears `error`.
/// - A failed settlement leaves `data` untouched (stale-but-present) and
///   records `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncResourceState<T> {
    /// The last successfully fetched page, if any.
    pub data: Option<ResourceList<T>>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Serialized message from the last failed fetch. Cleared on success.
    pub error: Option<String>,
}

impl<T> Default for AsyncResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Captured prior state for an optimistic record patch, used to undo the
/// local change when the server rejects it.
#[derive(Debug, Clone)]
pub struct OptimisticToken<T> {
    previous: T,
    index: usize,
}

/// Client-side cache plus filter/pagination state for one resource
/// family.
///
/// The store never performs I/O and its reducers never fail — errors are
/// recorded as strings for the UI layer to render.
#[derive(Debug)]
pub struct ResourceStore<T> {
    state: AsyncResourceState<T>,
    filters: FilterSet,
    page: u32,
    limit: u32,
    /// Sequence of the most recently issued fetch. Only this sequence may
    /// settle; anything older is discarded on arrival.
    issued: FetchSeq,
    /// Label for log messages.
    label: &'static str,
}

impl<T> ResourceStore<T> {
    /// Creates an empty store with the given page size.
    #[must_use]
    pub const fn new(label: &'static str, limit: u32) -> Self {
        Self {
            state: AsyncResourceState {
                data: None,
                loading: false,
                error: None,
            },
            filters: FilterSet::new(),
            page: 1,
            limit,
            issued: 0,
            label,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &AsyncResourceState<T> {
        &self.state
    }

    /// The cached page, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&ResourceList<T>> {
        self.state.data.as_ref()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// The last recorded fetch error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// The active filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// The 1-based page cursor.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Records per page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    // ── Filters and pagination ──────────────────────────────────────

    /// Shallow-merges a partial filter update (a `None` value clears its
    /// key) and resets the page cursor to 1.
    ///
    /// Resetting on every filter change is deliberate: a narrowed result
    /// set makes the old cursor meaningless.
    pub fn set_filters<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, Option<FilterValue>)>,
        K: Into<String>,
    {
        self.filters.merge(partial);
        self.page = 1;
    }

    /// Clears every filter and resets the page cursor to 1.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Moves the page cursor. Does not itself trigger a fetch — the
    /// owning service re-dispatches after moving the cursor. Pages are
    /// 1-based; values below 1 are treated as 1. Upper clamping is the
    /// server's job.
    pub const fn set_page(&mut self, page: u32) {
        self.page = if page == 0 { 1 } else { page };
    }

    /// Changes the page size.
    pub const fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    // ── Fetch lifecycle ─────────────────────────────────────────────

    /// Marks a fetch as issued: sets `loading` and returns the sequence
    /// number the settlement must present.
    pub const fn begin_fetch(&mut self) -> FetchSeq {
        self.issued += 1;
        self.state.loading = true;
        self.issued
    }

    /// Settles a successful fetch. Returns `false` (and changes nothing)
    /// when `seq` is not the latest issued fetch — the response is stale
    /// and a newer request owns the state.
    pub fn apply_success(&mut self, seq: FetchSeq, list: ResourceList<T>) -> bool {
        if seq != self.issued {
            log::debug!(
                "[{}] discarding stale fetch result (seq {seq}, latest {})",
                self.label,
                self.issued
            );
            return false;
        }
        self.state.data = Some(list);
        self.state.loading = false;
        self.state.error = None;
        true
    }

    /// Settles a failed fetch. Prior `data` is left untouched so the UI
    /// can keep rendering the stale list alongside the error. Stale
    /// failures are discarded like stale successes.
    pub fn apply_failure(&mut self, seq: FetchSeq, message: &str) -> bool {
        if seq != self.issued {
            log::debug!(
                "[{}] discarding stale fetch error (seq {seq}, latest {})",
                self.label,
                self.issued
            );
            return false;
        }
        self.state.loading = false;
        self.state.error = Some(message.to_owned());
        true
    }
}

impl<T: Identified> ResourceStore<T> {
    /// Replaces the record with the same id in place. Used after
    /// status-only mutations where the server returns the updated record;
    /// list-shaping mutations refetch instead.
    ///
    /// Returns `false` when no cached record matches.
    pub fn patch_record(&mut self, record: T) -> bool {
        let Some(list) = self.state.data.as_mut() else {
            return false;
        };
        let Some(slot) = list
            .items
            .iter_mut()
            .find(|item| item.record_id() == record.record_id())
        else {
            return false;
        };
        *slot = record;
        true
    }

    /// Removes a record after a confirmed `DELETE`, adjusting `total`
    /// and `total_pages`. Records are never removed speculatively.
    pub fn remove_record(&mut self, id: &str) -> bool {
        let Some(list) = self.state.data.as_mut() else {
            return false;
        };
        let before = list.items.len();
        list.items.retain(|item| item.record_id() != id);
        if list.items.len() == before {
            return false;
        }
        list.total = list.total.saturating_sub(1);
        list.total_pages = ResourceList::<T>::pages_for(list.total, list.limit);
        true
    }

    /// Applies an optimistic patch, returning a token that can restore
    /// the prior record if the server rejects the mutation.
    pub fn optimistic_patch(&mut self, record: T) -> Option<OptimisticToken<T>>
    where
        T: Clone,
    {
        let list = self.state.data.as_mut()?;
        let index = list
            .items
            .iter()
            .position(|item| item.record_id() == record.record_id())?;
        let previous = list.items[index].clone();
        list.items[index] = record;
        Some(OptimisticToken { previous, index })
    }

    /// Undoes an optimistic patch. The compensating write goes back to
    /// the same slot; if the list was replaced in the meantime (a fetch
    /// settled), the rollback is dropped — the fresh server state wins.
    pub fn rollback(&mut self, token: OptimisticToken<T>) {
        let Some(list) = self.state.data.as_mut() else {
            return;
        };
        let Some(slot) = list.items.get_mut(token.index) else {
            return;
        };
        if slot.record_id() == token.previous.record_id() {
            *slot = token.previous;
        }
    }
}
