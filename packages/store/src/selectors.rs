//! Derived read-only views over store state.
//!
//! Selectors never mutate and are cheap to recompute from the current
//! slice of state. Anything aggregate the UI needs (counts by status,
//! amount sums, filter badges) goes through here instead of reaching into
//! the cached page directly.

use std::collections::BTreeMap;

use crate::store::ResourceStore;

/// The cached items, or an empty slice when nothing has loaded yet.
#[must_use]
pub fn items<T>(store: &ResourceStore<T>) -> &[T] {
    store.data().map_or(&[], |list| list.items.as_slice())
}

/// The cached items matching a predicate.
#[must_use]
pub fn filtered<'a, T>(store: &'a ResourceStore<T>, predicate: impl Fn(&T) -> bool) -> Vec<&'a T> {
    items(store).iter().filter(|item| predicate(item)).collect()
}

/// Number of cached items matching a predicate.
#[must_use]
pub fn count_by<T>(store: &ResourceStore<T>, predicate: impl Fn(&T) -> bool) -> usize {
    items(store).iter().filter(|item| predicate(item)).count()
}

/// Cached items bucketed by a key (typically a status enum).
#[must_use]
pub fn counts_by_key<T, K: Ord>(
    store: &ResourceStore<T>,
    key_of: impl Fn(&T) -> K,
) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for item in items(store) {
        *counts.entry(key_of(item)).or_insert(0) += 1;
    }
    counts
}

/// Sum of a numeric projection over the cached items (fine amounts,
/// payment volumes).
#[must_use]
pub fn sum_by<T>(store: &ResourceStore<T>, amount_of: impl Fn(&T) -> f64) -> f64 {
    items(store).iter().map(amount_of).sum()
}

/// Whether any filter key is active — drives the "clear filters" badge.
#[must_use]
pub fn has_active_filters<T>(store: &ResourceStore<T>) -> bool {
    !store.filters().is_empty()
}

/// Whether the store is showing stale data: a cached page alongside a
/// recorded fetch error.
#[must_use]
pub fn is_stale<T>(store: &ResourceStore<T>) -> bool {
    store.data().is_some() && store.error().is_some()
}
