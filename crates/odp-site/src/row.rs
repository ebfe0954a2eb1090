//! Row model for dataset records.
//!
//! Rows arrive from CSV sources as opaque key-to-value string mappings.
//! The engine reads a handful of conventional fields (`slug`, `name`,
//! grouping and geometry fields) by key lookup and passes the rest
//! through untouched to the render sink.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One record of an input dataset.
///
/// Field lookup treats empty values as absent, matching CSV sources
/// where a missing cell and an empty cell are indistinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field, treating an empty value as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The row's slug, if present and non-empty.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.get("slug")
    }

    /// Set a field value, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert) for fixtures.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Whether the row has a value for `key`, even an empty one.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over all fields in key order, including empty values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of fields, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Row {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
