//! Gallery filter: which collection and query constraints define the gallery

use std::collections::BTreeMap;

/// Identifies the collection endpoint and query constraints of the current
/// gallery.
///
/// A filter is immutable for the lifetime of one browsing run and replaced
/// wholesale on change. Deciding that the filter identity actually changed
/// is the caller's obligation; the session reloads unconditionally when
/// handed a new filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryFilter {
    path: String,
    params: BTreeMap<String, String>,
}

impl GalleryFilter {
    /// Filter over the collection at `path` with no query constraints
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add one query constraint
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Collection path, appended to the service base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query constraints of this filter
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Query pairs for one page request
    ///
    /// The cursor pair `c` comes first when present, followed by the filter
    /// parameters in key order.
    pub fn query_pairs(&self, cursor: Option<&str>) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 1);
        if let Some(cursor) = cursor {
            pairs.push(("c".to_string(), cursor.to_string()));
        }
        for (key, value) in &self.params {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}
