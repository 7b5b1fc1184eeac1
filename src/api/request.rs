//
//  pantry-cli
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request descriptors.
//!
//! [`RequestOptions`] describes one call: method, query, JSON body and extra
//! headers. [`QueryParams`] keeps query pairs in insertion order and lets a
//! pair be absent, so optional filters can be pushed without branching.
//!
//! ```rust
//! use pantry_cli::api::request::QueryParams;
//!
//! let query = QueryParams::new()
//!     .with("page", Some(2))
//!     .with("search", None::<String>)
//!     .with("sort", Some("name"));
//! assert_eq!(query.encode(), "page=2&sort=name");
//! ```

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::common::ApiError;

/// Ordered query parameters. Absent values are kept but never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair. `None` values are skipped when the URL is built.
    pub fn push<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        self.pairs
            .push((key.into(), value.map(|value| value.to_string())));
        self
    }

    /// Builder form of [`QueryParams::push`].
    pub fn with<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.push(key, value);
        self
    }

    /// Pairs with a value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
    }

    /// True when no pair has a value.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Form-url-encodes the present pairs, e.g. `a=1&b=two+words`.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.present() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.push(key, value);
        }
        query
    }
}

/// Everything needed to issue one request, apart from the endpoint.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: QueryParams,
    pub body: Option<Value>,
    /// Caller headers. These win over the client's defaults.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: QueryParams::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Builds options from a method name in any case (`"patch"` → `PATCH`).
    pub fn with_method_name(name: &str) -> Result<Self, ApiError> {
        let normalized = name.trim().to_ascii_uppercase();
        let method = Method::from_bytes(normalized.as_bytes())
            .map_err(|_| ApiError::InvalidMethod(name.to_string()))?;
        Ok(Self::new(method))
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Every method except GET and HEAD carries a body.
    pub fn is_body_bearing(&self) -> bool {
        is_body_bearing(&self.method)
    }
}

pub(crate) fn is_body_bearing(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_keeps_insertion_order_and_skips_absent() {
        let query: QueryParams = [
            ("z", Some("1")),
            ("a", None),
            ("m", Some("two words")),
            ("z", Some("3")),
        ]
        .into_iter()
        .collect();
        let present: Vec<_> = query.present().collect();
        assert_eq!(present, vec![("z", "1"), ("m", "two words"), ("z", "3")]);
        assert_eq!(query.encode(), "z=1&m=two+words&z=3");
    }

    #[test]
    fn test_query_is_empty_when_all_values_absent() {
        let query = QueryParams::new().with("page", None::<u32>);
        assert!(query.is_empty());
        assert_eq!(query.encode(), "");
    }

    #[test]
    fn test_method_name_is_uppercased() {
        let options = RequestOptions::with_method_name("patch").unwrap();
        assert_eq!(options.method, Method::PATCH);
        assert!(options.is_body_bearing());

        let options = RequestOptions::with_method_name(" head ").unwrap();
        assert_eq!(options.method, Method::HEAD);
        assert!(!options.is_body_bearing());

        assert!(matches!(
            RequestOptions::with_method_name("BAD METHOD"),
            Err(ApiError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_json_body() {
        let options = RequestOptions::post().json(&json!({"name": "Milk"})).unwrap();
        assert_eq!(options.body, Some(json!({"name": "Milk"})));
        assert!(!RequestOptions::get().is_body_bearing());
        assert!(RequestOptions::delete().is_body_bearing());
    }
}
