//! Active query parameters narrowing a list request.
//!
//! Keys are absent when unset — never null-valued. Values are the flat
//! primitives the API accepts and are passed to the backend unmodified;
//! the client never re-filters locally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Text filter (status vocabularies, search terms, method labels).
    Text(String),
    /// Numeric filter (severity, amounts).
    Number(f64),
    /// Boolean filter (read/unread).
    Flag(bool),
}

impl FilterValue {
    /// The value as it appears in a query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                // Render integral values without a trailing ".0".
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Flag(b) => b.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// The active filter keys for one resource family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Shallow-merges a partial update. A `None` value intentionally
    /// clears its key; absent keys are left untouched.
    pub fn merge<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, Option<FilterValue>)>,
        K: Into<String>,
    {
        for (key, value) in partial {
            let key = key.into();
            match value {
                Some(value) => {
                    self.entries.insert(key, value);
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }
    }

    /// Sets a single key.
    pub fn set(&mut self, key: &str, value: impl Into<FilterValue>) {
        self.entries.insert(key.to_owned(), value.into());
    }

    /// Removes a single key.
    pub fn unset(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Looks up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    /// Whether any filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of active keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Renders the set as flat query parameters, unmodified values in
    /// key order.
    #[must_use]
    pub fn to_query_params(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_query_string()))
            .collect()
    }
}
