//
//  pantry-cli
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Normalization
//!
//! The backend is not consistent about what it sends back. Depending on the
//! endpoint a successful response may be a bare array, an envelope with a
//! `data` array, a bare object, an empty body or plain text.
//!
//! Normalization happens in two steps:
//!
//! 1. [`parse_body`] turns status, content type and bytes into a [`Payload`]
//!    (`Null`, `Json` or `Text`). It never fails.
//! 2. A shape normalizer turns the payload into what the caller expects:
//!    [`normalize_array`] into `Vec<T>`, [`normalize_paginated`] into
//!    [`Paginated<T>`], [`normalize_entity`] into a single `T`.
//!
//! The array and paginated normalizers never fail either. Unknown shapes
//! become empty lists and elements that do not fit `T` are skipped.
//!
//! ```rust
//! use pantry_cli::api::response::{normalize_array, parse_body};
//!
//! let payload = parse_body(200, Some("application/json"), br#"{"data": [1, 2]}"#);
//! let numbers: Vec<u32> = normalize_array(payload);
//! assert_eq!(numbers, vec![1, 2]);
//! ```

use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::common::{ApiError, Paginated};

/// A response body after the raw parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No content: a 204 or an empty body.
    Null,
    /// A JSON document.
    Json(Value),
    /// A body that is not JSON.
    Text(String),
}

impl Payload {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts the payload into a JSON value. Text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

/// The wire shapes a payload can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Nothing useful: null, empty, or a falsy scalar.
    Empty,
    /// A bare JSON array.
    List(Vec<Value>),
    /// An object with a `data` array and optional `meta`/`pagination`.
    Wrapped { data: Vec<Value>, meta: Option<Value> },
    /// Any other JSON object.
    Object(Map<String, Value>),
    /// Text, or a truthy JSON scalar.
    Text(String),
}

impl From<Payload> for Envelope {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Null => Self::Empty,
            Payload::Json(value) => Self::from(value),
            Payload::Text(text) => Self::Text(text),
        }
    }
}

impl From<Value> for Envelope {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(mut fields) => match fields.remove("data") {
                Some(Value::Array(data)) => {
                    let meta = take_present(&mut fields, "meta")
                        .or_else(|| take_present(&mut fields, "pagination"));
                    Self::Wrapped { data, meta }
                }
                Some(other) => {
                    fields.insert("data".to_string(), other);
                    Self::Object(fields)
                }
                None => Self::Object(fields),
            },
            Value::String(text) if !text.is_empty() => Self::Text(text),
            scalar if is_truthy(&scalar) => Self::Text(scalar.to_string()),
            _ => Self::Empty,
        }
    }
}

fn take_present(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|value| !value.is_null())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Turns a raw response into a [`Payload`].
///
/// - 204 is `Null` without looking at the body
/// - a JSON content type is parsed as JSON; a parse failure falls through
/// - otherwise the body is text: blank is `Null`, something that looks like
///   a JSON object or array is parsed if possible, anything else is `Text`
pub fn parse_body(status: u16, content_type: Option<&str>, body: &[u8]) -> Payload {
    if status == 204 {
        return Payload::Null;
    }

    if content_type.is_some_and(|ct| ct.contains("application/json")) {
        if let Ok(value) = serde_json::from_slice::<Value>(body) {
            return Payload::Json(value);
        }
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Payload::Null;
    }

    if looks_like_json(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return Payload::Json(value);
        }
    }

    Payload::Text(text.into_owned())
}

fn looks_like_json(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}

/// Reads a `reqwest` response into a [`Payload`].
///
/// Only a transport failure while reading the body is an error.
pub async fn read_payload(response: Response) -> Result<Payload, reqwest::Error> {
    let status = response.status().as_u16();
    if status == 204 {
        return Ok(Payload::Null);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.bytes().await?;

    Ok(parse_body(status, content_type.as_deref(), &body))
}

/// Normalizes a payload into a list.
///
/// | Shape | Result |
/// |-------|--------|
/// | empty / falsy | `[]` |
/// | bare array | the array |
/// | `{"data": [...]}` | the `data` array |
/// | anything else | `[]` |
pub fn normalize_array<T: DeserializeOwned>(payload: Payload) -> Vec<T> {
    match Envelope::from(payload) {
        Envelope::List(items) | Envelope::Wrapped { data: items, .. } => decode_items(items),
        Envelope::Empty | Envelope::Object(_) | Envelope::Text(_) => Vec::new(),
    }
}

/// Normalizes a payload into a [`Paginated`] page.
///
/// A bare array becomes `{data}`, an envelope keeps its `meta` (or
/// `pagination`) field, anything else is an empty page.
pub fn normalize_paginated<T: DeserializeOwned>(payload: Payload) -> Paginated<T> {
    match Envelope::from(payload) {
        Envelope::List(items) => Paginated::new(decode_items(items)),
        Envelope::Wrapped { data, meta } => Paginated {
            data: decode_items(data),
            meta,
        },
        Envelope::Empty | Envelope::Object(_) | Envelope::Text(_) => Paginated::default(),
    }
}

/// Normalizes a payload into a single entity.
///
/// Accepts the entity itself or an envelope `{"data": {...}}` whose top
/// level has no `id`. Unlike the list normalizers this can fail, since
/// there is no sensible empty value for a single entity.
pub fn normalize_entity<T: DeserializeOwned>(payload: Payload) -> Result<T, ApiError> {
    let value = match payload.into_value() {
        Value::Object(mut fields)
            if !fields.contains_key("id") && fields.get("data").is_some_and(Value::is_object) =>
        {
            fields.remove("data").unwrap_or(Value::Null)
        }
        value => value,
    };
    serde_json::from_value(value).map_err(ApiError::Decode)
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping list element with unexpected shape");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn json_payload(value: Value) -> Payload {
        Payload::Json(value)
    }

    #[test]
    fn test_parse_body_204_is_null() {
        assert_eq!(parse_body(204, Some("application/json"), b"{\"a\":1}"), Payload::Null);
    }

    #[test]
    fn test_parse_body_json_content_type() {
        assert_eq!(
            parse_body(200, Some("application/json; charset=utf-8"), b"[1,2]"),
            Payload::Json(json!([1, 2]))
        );
    }

    #[test]
    fn test_parse_body_broken_json_falls_back_to_text() {
        assert_eq!(
            parse_body(200, Some("application/json"), b"not json"),
            Payload::Text("not json".to_string())
        );
        assert_eq!(parse_body(200, Some("application/json"), b"   "), Payload::Null);
    }

    #[test]
    fn test_parse_body_sniffs_json_in_text() {
        assert_eq!(
            parse_body(200, Some("text/plain"), b" {\"ok\":true} "),
            Payload::Json(json!({"ok": true}))
        );
        assert_eq!(parse_body(200, None, b"[1, 2"), Payload::Text("[1, 2".to_string()));
        assert_eq!(parse_body(200, None, b"{oops}"), Payload::Text("{oops}".to_string()));
        assert_eq!(parse_body(200, None, b"hello"), Payload::Text("hello".to_string()));
        assert_eq!(parse_body(200, None, b""), Payload::Null);
    }

    #[test]
    fn test_normalize_array_shapes() {
        assert_eq!(normalize_array::<u32>(Payload::Null), Vec::<u32>::new());
        assert_eq!(normalize_array::<u32>(json_payload(json!([1, 2]))), vec![1, 2]);
        assert_eq!(normalize_array::<u32>(json_payload(json!({"data": [1, 2]}))), vec![1, 2]);
        assert_eq!(normalize_array::<u32>(json_payload(json!({"foo": 1}))), Vec::<u32>::new());
        assert_eq!(normalize_array::<u32>(json_payload(json!(false))), Vec::<u32>::new());
        assert_eq!(normalize_array::<u32>(Payload::Text("x".into())), Vec::<u32>::new());
        assert_eq!(
            normalize_array::<u32>(json_payload(json!({"data": {"id": 1}}))),
            Vec::<u32>::new()
        );
    }

    #[test]
    fn test_normalize_array_skips_mismatched_elements() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Named {
            name: String,
        }

        let items: Vec<Named> =
            normalize_array(json_payload(json!([{"name": "Milk"}, {"id": 3}, {"name": "Eggs"}])));
        assert_eq!(
            items,
            vec![
                Named { name: "Milk".into() },
                Named { name: "Eggs".into() }
            ]
        );
    }

    #[test]
    fn test_normalize_paginated_shapes() {
        let page: Paginated<u32> =
            normalize_paginated(json_payload(json!({"data": [1], "meta": {"total": 1}})));
        assert_eq!(page, Paginated::new(vec![1]).with_meta(json!({"total": 1})));

        let page: Paginated<u32> = normalize_paginated(json_payload(json!([1, 2])));
        assert_eq!(serde_json::to_value(&page).unwrap(), json!({"data": [1, 2]}));

        let page: Paginated<u32> =
            normalize_paginated(json_payload(json!({"data": [4], "pagination": {"page": 2}})));
        assert_eq!(page.meta, Some(json!({"page": 2})));

        let page: Paginated<u32> =
            normalize_paginated(json_payload(json!({"data": [], "meta": null, "pagination": {"page": 1}})));
        assert_eq!(page.meta, Some(json!({"page": 1})));

        let page: Paginated<u32> = normalize_paginated(json_payload(json!({"foo": 1})));
        assert_eq!(page, Paginated::default());
        assert_eq!(normalize_paginated::<u32>(Payload::Null), Paginated::default());
    }

    #[test]
    fn test_normalize_entity_unwraps_data_envelope() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Item {
            id: u64,
        }

        let item: Item = normalize_entity(json_payload(json!({"data": {"id": 9}}))).unwrap();
        assert_eq!(item, Item { id: 9 });

        let item: Item = normalize_entity(json_payload(json!({"id": 4, "data": {"x": 1}}))).unwrap();
        assert_eq!(item, Item { id: 4 });

        let err = normalize_entity::<Item>(Payload::Text("nope".into())).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_envelope_classification() {
        assert_eq!(Envelope::from(json!("")), Envelope::Empty);
        assert_eq!(Envelope::from(json!(0)), Envelope::Empty);
        assert_eq!(Envelope::from(json!("ok")), Envelope::Text("ok".into()));
        assert_eq!(Envelope::from(json!(3)), Envelope::Text("3".into()));
        assert!(matches!(Envelope::from(json!({"id": 1})), Envelope::Object(_)));
    }
}
