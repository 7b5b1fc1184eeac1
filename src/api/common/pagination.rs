//
//  pantry-cli
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Paginated list container.
//!
//! List endpoints either return a bare array or an envelope carrying the
//! page and some metadata:
//!
//! ```json
//! {"data": [{"id": 1, "name": "Kitchen"}], "meta": {"total": 1, "page": 1}}
//! ```
//!
//! [`Paginated`] is the canonical form both are normalized into. The
//! metadata is kept as raw JSON because its layout differs per endpoint;
//! [`Paginated::total`] and [`Paginated::page`] read the common keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of results plus optional metadata.
///
/// Serializes as `{"data": [...]}` or `{"data": [...], "meta": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items on this page. May be empty.
    pub data: Vec<T>,

    /// Metadata from the `meta` (or `pagination`) field of the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            meta: None,
        }
    }
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data, meta: None }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Total number of items across all pages, when the server reports it.
    ///
    /// Looks at `total`, `totalItems`, `total_items` and `count`.
    pub fn total(&self) -> Option<u64> {
        self.meta_number(&["total", "totalItems", "total_items", "count"])
    }

    /// Current page number, when the server reports it.
    pub fn page(&self) -> Option<u64> {
        self.meta_number(&["page", "currentPage", "current_page"])
    }

    fn meta_number(&self, keys: &[&str]) -> Option<u64> {
        let meta = self.meta.as_ref()?;
        keys.iter().find_map(|key| meta.get(*key).and_then(Value::as_u64))
    }
}

impl<T> IntoIterator for Paginated<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Paginated<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_without_meta_when_absent() {
        let page = Paginated::new(vec![1, 2]);
        assert_eq!(serde_json::to_value(&page).unwrap(), json!({"data": [1, 2]}));
    }

    #[test]
    fn test_total_and_page_from_meta() {
        let page = Paginated::new(vec!["a"]).with_meta(json!({"totalItems": 40, "page": 3}));
        assert_eq!(page.total(), Some(40));
        assert_eq!(page.page(), Some(3));
        assert_eq!(Paginated::<u8>::default().total(), None);
    }
}
