//
//  pantry-cli
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Functions
//!
//! One module per resource family. Each module defines the resource's wire
//! types and adds its operations to [`PantryClient`](super::PantryClient).
//!
//! Every operation does the same four things and nothing else: build the
//! path, build the query, serialize the body, and normalize the result.
//! Validation, authorization and conflict detection belong to the server.
//!
//! | Module | Resource | List shape |
//! |--------|----------|------------|
//! | [`users`] | accounts, profile, passwords | n/a |
//! | [`products`] | products | `Vec<Product>` |
//! | [`categories`] | categories | `Vec<Category>` |
//! | [`pantries`] | pantries and sharing | `Paginated<Pantry>` |
//! | [`pantry_items`] | items inside a pantry | `Vec<PantryItem>` |
//! | [`shopping_lists`] | lists, list actions, list items | `Paginated<ShoppingList>` |
//!
//! JSON field names are camelCase on the wire.

pub mod categories;
pub mod pantries;
pub mod pantry_items;
pub mod products;
pub mod shopping_lists;
pub mod users;

pub use categories::*;
pub use pantries::*;
pub use pantry_items::*;
pub use products::*;
pub use shopping_lists::*;
pub use users::*;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::request::QueryParams;
use super::response::Payload;

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Pagination and sorting shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl ListParams {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    /// Appends `page`, `perPage`, `sortBy` and `order` to `query`.
    pub fn append_to(&self, query: &mut QueryParams) {
        query
            .push("page", self.page)
            .push("perPage", self.per_page)
            .push("sortBy", self.sort_by.as_deref())
            .push("order", self.order);
    }
}

/// What action endpoints (share, purchase, reset, password changes, ...)
/// send back.
///
/// These endpoints answer with a message object, plain text or nothing at
/// all depending on the server version, so every shape is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Every other field of the response object.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Acknowledgement {
    pub fn from_payload(payload: Payload) -> Self {
        match payload {
            Payload::Json(Value::Object(mut details)) => {
                let message = match details.remove("message") {
                    Some(Value::String(message)) => Some(message),
                    Some(other) => {
                        details.insert("message".to_string(), other);
                        None
                    }
                    None => None,
                };
                Self { message, details }
            }
            Payload::Json(Value::String(text)) | Payload::Text(text) => Self {
                message: Some(text.trim().to_string()).filter(|text| !text.is_empty()),
                details: Map::new(),
            },
            Payload::Json(_) | Payload::Null => Self::default(),
        }
    }
}

/// Body for the share endpoints of pantries and shopping lists.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// Email of the user to grant access to
    pub email: String,
    /// Access level, e.g. `viewer` or `editor`; the server default applies when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

impl ShareRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            permission: None,
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }
}

/// A user a pantry or shopping list is shared with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedUser {
    #[serde(alias = "userId")]
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
