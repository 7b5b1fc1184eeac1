//
//  pantry-cli
//  api/resources/shopping_lists.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Shopping Lists
//!
//! Lists, list actions (purchase, reset, move to a pantry), sharing, and
//! the items on a list.
//!
//! Writes to the items of one list are serialized under
//! `shopping-list:{id}:items`; item reads are not.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Acknowledgement, ListParams, Product, ShareRequest, SharedUser};
use crate::api::common::{ApiError, Paginated};
use crate::api::endpoints;
use crate::api::queue::SerialQueue;
use crate::api::request::{QueryParams, RequestOptions};
use crate::api::response::{normalize_array, normalize_entity, normalize_paginated};
use crate::api::PantryClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// e.g. `active` or `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for [`PantryClient::create_shopping_list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewShoppingList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for [`PantryClient::update_shopping_list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShoppingListChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Query for [`PantryClient::get_shopping_lists`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingListFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub list: ListParams,
}

impl ShoppingListFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("status", self.status.as_deref());
        self.list.append_to(&mut query);
        query
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveToPantry {
    pantry_id: u64,
}

/// An entry on a shopping list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    /// Free-text name for entries without a product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default)]
    pub purchased: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListItem {
    pub fn label(&self) -> String {
        if let Some(name) = self.product.as_ref().map(|p| &p.name).filter(|n| !n.is_empty()) {
            return name.clone();
        }
        if let Some(name) = self.name.as_ref().filter(|n| !n.is_empty()) {
            return name.clone();
        }
        match self.product_id {
            Some(product_id) => format!("product #{}", product_id),
            None => format!("item #{}", self.id),
        }
    }
}

/// Body for [`PantryClient::add_list_item`]. Either `product_id` or `name`
/// identifies what to buy.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for [`PantryClient::update_list_item`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Queue key shared by the item writes of one list.
pub fn list_items_key(list_id: u64) -> String {
    SerialQueue::key("shopping-list", Some(list_id), "items")
}

impl PantryClient {
    pub async fn get_shopping_lists(
        &self,
        filter: &ShoppingListFilter,
    ) -> Result<Paginated<ShoppingList>, ApiError> {
        let options = RequestOptions::get().query(filter.to_query());
        let payload = self.request_payload(endpoints::SHOPPING_LISTS, options).await?;
        Ok(normalize_paginated(payload))
    }

    pub async fn get_shopping_list(&self, id: u64) -> Result<ShoppingList, ApiError> {
        let payload = self
            .request_payload(&endpoints::shopping_list(id), RequestOptions::get())
            .await?;
        normalize_entity(payload)
    }

    pub async fn create_shopping_list(&self, list: &NewShoppingList) -> Result<ShoppingList, ApiError> {
        let options = RequestOptions::post().json(list)?;
        let payload = self.request_payload(endpoints::SHOPPING_LISTS, options).await?;
        normalize_entity(payload)
    }

    pub async fn update_shopping_list(
        &self,
        id: u64,
        changes: &ShoppingListChanges,
    ) -> Result<ShoppingList, ApiError> {
        let options = RequestOptions::put().json(changes)?;
        let payload = self.request_payload(&endpoints::shopping_list(id), options).await?;
        normalize_entity(payload)
    }

    pub async fn delete_shopping_list(&self, id: u64) -> Result<(), ApiError> {
        self.request_payload(&endpoints::shopping_list(id), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Marks every item on the list as purchased.
    pub async fn purchase_shopping_list(&self, id: u64) -> Result<Acknowledgement, ApiError> {
        let payload = self
            .request_payload(&endpoints::shopping_list_purchase(id), RequestOptions::post())
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    /// Clears the purchased flag on every item.
    pub async fn reset_shopping_list(&self, id: u64) -> Result<Acknowledgement, ApiError> {
        let payload = self
            .request_payload(&endpoints::shopping_list_reset(id), RequestOptions::post())
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    /// Moves the purchased items into a pantry.
    pub async fn move_shopping_list_to_pantry(
        &self,
        id: u64,
        pantry_id: u64,
    ) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(&MoveToPantry { pantry_id })?;
        let payload = self
            .request_payload(&endpoints::shopping_list_move_to_pantry(id), options)
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn share_shopping_list(
        &self,
        id: u64,
        share: &ShareRequest,
    ) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(share)?;
        let payload = self
            .request_payload(&endpoints::shopping_list_share(id), options)
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn get_shopping_list_shared_users(&self, id: u64) -> Result<Vec<SharedUser>, ApiError> {
        let payload = self
            .request_payload(&endpoints::shopping_list_shared_users(id), RequestOptions::get())
            .await?;
        Ok(normalize_array(payload))
    }

    pub async fn revoke_shopping_list_share(
        &self,
        id: u64,
        user_id: u64,
    ) -> Result<Acknowledgement, ApiError> {
        let payload = self
            .request_payload(
                &endpoints::shopping_list_share_user(id, user_id),
                RequestOptions::delete(),
            )
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn get_list_items(&self, list_id: u64) -> Result<Vec<ListItem>, ApiError> {
        let payload = self
            .request_payload(&endpoints::list_items(list_id), RequestOptions::get())
            .await?;
        Ok(normalize_array(payload))
    }

    pub fn add_list_item<'a>(
        &'a self,
        list_id: u64,
        item: &NewListItem,
    ) -> impl Future<Output = Result<ListItem, ApiError>> + 'a {
        let options = RequestOptions::post().json(item);
        self.queue().enqueue(list_items_key(list_id), async move {
            let payload = self
                .request_payload(&endpoints::list_items(list_id), options?)
                .await?;
            normalize_entity(payload)
        })
    }

    pub fn update_list_item<'a>(
        &'a self,
        list_id: u64,
        item_id: u64,
        changes: &ListItemChanges,
    ) -> impl Future<Output = Result<ListItem, ApiError>> + 'a {
        let options = RequestOptions::put().json(changes);
        self.queue().enqueue(list_items_key(list_id), async move {
            let payload = self
                .request_payload(&endpoints::list_item(list_id, item_id), options?)
                .await?;
            normalize_entity(payload)
        })
    }

    /// Shorthand for an update that only flips the purchased flag.
    pub fn set_list_item_purchased(
        &self,
        list_id: u64,
        item_id: u64,
        purchased: bool,
    ) -> impl Future<Output = Result<ListItem, ApiError>> + '_ {
        let changes = ListItemChanges {
            purchased: Some(purchased),
            ..Default::default()
        };
        self.update_list_item(list_id, item_id, &changes)
    }

    pub fn delete_list_item(
        &self,
        list_id: u64,
        item_id: u64,
    ) -> impl Future<Output = Result<(), ApiError>> + '_ {
        self.queue().enqueue(list_items_key(list_id), async move {
            self.request_payload(&endpoints::list_item(list_id, item_id), RequestOptions::delete())
                .await?;
            Ok(())
        })
    }
}
