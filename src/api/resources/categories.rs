//
//  pantry-cli
//  api/resources/categories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product category endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ListParams;
use crate::api::common::ApiError;
use crate::api::endpoints;
use crate::api::request::{QueryParams, RequestOptions};
use crate::api::response::{normalize_array, normalize_entity};
use crate::api::PantryClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for [`PantryClient::create_category`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body for [`PantryClient::update_category`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Query for [`PantryClient::get_categories`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    pub search: Option<String>,
    pub list: ListParams,
}

impl CategoryFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("search", self.search.as_deref());
        self.list.append_to(&mut query);
        query
    }
}

impl PantryClient {
    pub async fn get_categories(&self, filter: &CategoryFilter) -> Result<Vec<Category>, ApiError> {
        let options = RequestOptions::get().query(filter.to_query());
        let payload = self.request_payload(endpoints::CATEGORIES, options).await?;
        Ok(normalize_array(payload))
    }

    pub async fn get_category(&self, id: u64) -> Result<Category, ApiError> {
        let payload = self
            .request_payload(&endpoints::category(id), RequestOptions::get())
            .await?;
        normalize_entity(payload)
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let options = RequestOptions::post().json(category)?;
        let payload = self.request_payload(endpoints::CATEGORIES, options).await?;
        normalize_entity(payload)
    }

    pub async fn update_category(
        &self,
        id: u64,
        changes: &CategoryChanges,
    ) -> Result<Category, ApiError> {
        let options = RequestOptions::put().json(changes)?;
        let payload = self.request_payload(&endpoints::category(id), options).await?;
        normalize_entity(payload)
    }

    pub async fn delete_category(&self, id: u64) -> Result<(), ApiError> {
        self.request_payload(&endpoints::category(id), RequestOptions::delete())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_categories_ignores_non_list_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/categories")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "nothing here"}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let categories = client.get_categories(&CategoryFilter::default()).await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_update_category_sends_partial_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/categories/4")
            .match_body(Matcher::Json(json!({"color": "#ff0000"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"id": 4, "name": "Dairy", "color": "#ff0000"}"##)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let category = client
            .update_category(
                4,
                &CategoryChanges {
                    color: Some("#ff0000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(category.name, "Dairy");
        assert_eq!(category.color.as_deref(), Some("#ff0000"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_category_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/categories/4")
            .with_status(200)
            .with_body("just text")
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let err = client.get_category(4).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
