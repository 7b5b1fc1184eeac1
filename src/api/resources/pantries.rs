//
//  pantry-cli
//  api/resources/pantries.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pantry endpoints and pantry sharing.
//!
//! Pantry lists come back paginated. Items inside a pantry live in
//! [`pantry_items`](super::pantry_items).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Acknowledgement, ListParams, ShareRequest, SharedUser};
use crate::api::common::{ApiError, Paginated};
use crate::api::endpoints;
use crate::api::request::{QueryParams, RequestOptions};
use crate::api::response::{normalize_array, normalize_entity, normalize_paginated};
use crate::api::PantryClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pantry {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for [`PantryClient::create_pantry`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPantry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for [`PantryClient::update_pantry`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PantryChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query for [`PantryClient::get_pantries`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PantryFilter {
    pub search: Option<String>,
    /// Only pantries shared with the current user (`true`) or owned by them (`false`)
    pub shared: Option<bool>,
    pub list: ListParams,
}

impl PantryFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("shared", self.shared);
        self.list.append_to(&mut query);
        query
    }
}

impl PantryClient {
    pub async fn get_pantries(&self, filter: &PantryFilter) -> Result<Paginated<Pantry>, ApiError> {
        let options = RequestOptions::get().query(filter.to_query());
        let payload = self.request_payload(endpoints::PANTRIES, options).await?;
        Ok(normalize_paginated(payload))
    }

    pub async fn get_pantry(&self, id: u64) -> Result<Pantry, ApiError> {
        let payload = self
            .request_payload(&endpoints::pantry(id), RequestOptions::get())
            .await?;
        normalize_entity(payload)
    }

    pub async fn create_pantry(&self, pantry: &NewPantry) -> Result<Pantry, ApiError> {
        let options = RequestOptions::post().json(pantry)?;
        let payload = self.request_payload(endpoints::PANTRIES, options).await?;
        normalize_entity(payload)
    }

    pub async fn update_pantry(&self, id: u64, changes: &PantryChanges) -> Result<Pantry, ApiError> {
        let options = RequestOptions::put().json(changes)?;
        let payload = self.request_payload(&endpoints::pantry(id), options).await?;
        normalize_entity(payload)
    }

    pub async fn delete_pantry(&self, id: u64) -> Result<(), ApiError> {
        self.request_payload(&endpoints::pantry(id), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Grants another user access to a pantry.
    pub async fn share_pantry(&self, id: u64, share: &ShareRequest) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(share)?;
        let payload = self.request_payload(&endpoints::pantry_share(id), options).await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn get_pantry_shared_users(&self, id: u64) -> Result<Vec<SharedUser>, ApiError> {
        let payload = self
            .request_payload(&endpoints::pantry_shared_users(id), RequestOptions::get())
            .await?;
        Ok(normalize_array(payload))
    }

    /// Revokes a user's access to a pantry.
    pub async fn revoke_pantry_share(&self, id: u64, user_id: u64) -> Result<Acknowledgement, ApiError> {
        let payload = self
            .request_payload(&endpoints::pantry_share_user(id, user_id), RequestOptions::delete())
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_pantries_keeps_meta() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/pantries")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 1, "name": "Milk"}], "meta": {"total": 1}}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let page = client.get_pantries(&PantryFilter::default()).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.data[0].name, "Milk");
        assert_eq!(page.meta, Some(json!({"total": 1})));
        assert_eq!(page.total(), Some(1));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_pantries_bare_array_has_no_meta() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/pantries")
            .match_query(Matcher::UrlEncoded("shared".into(), "true".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 2, "name": "Garage"}]"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let filter = PantryFilter {
            shared: Some(true),
            ..Default::default()
        };
        let page = client.get_pantries(&filter).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.meta, None);
    }

    #[tokio::test]
    async fn test_share_and_revoke() {
        let mut server = mockito::Server::new_async().await;
        let share = server
            .mock("POST", "/api/pantries/3/share")
            .match_body(Matcher::Json(json!({"email": "bo@example.com"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Pantry shared"}"#)
            .create_async()
            .await;
        let revoke = server
            .mock("DELETE", "/api/pantries/3/share/8")
            .with_status(204)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let ack = client
            .share_pantry(3, &ShareRequest::new("bo@example.com"))
            .await
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("Pantry shared"));

        client.revoke_pantry_share(3, 8).await.unwrap();

        share.assert_async().await;
        revoke.assert_async().await;
    }

    #[tokio::test]
    async fn test_shared_users_from_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/pantries/3/shared-users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 8, "email": "bo@example.com", "permission": "editor"}]}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let users = client.get_pantry_shared_users(3).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].permission.as_deref(), Some("editor"));
    }
}
