//
//  pantry-cli
//  api/resources/products.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product catalogue endpoints.

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
pub struct Product {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for [`PantryClient::create_product`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Body for [`PantryClient::update_product`]. Only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Query for [`PantryClient::get_products`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Free-text match on the product name
    pub search: Option<String>,
    pub category_id: Option<u64>,
    pub list: ListParams,
}

impl ProductFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("categoryId", self.category_id);
        self.list.append_to(&mut query);
        query
    }
}

impl PantryClient {
    /// Lists products. Always a plain list, whatever envelope the server uses.
    pub async fn get_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let options = RequestOptions::get().query(filter.to_query());
        let payload = self.request_payload(endpoints::PRODUCTS, options).await?;
        Ok(normalize_array(payload))
    }

    pub async fn get_product(&self, id: u64) -> Result<Product, ApiError> {
        let payload = self
            .request_payload(&endpoints::product(id), RequestOptions::get())
            .await?;
        normalize_entity(payload)
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let options = RequestOptions::post().json(product)?;
        let payload = self.request_payload(endpoints::PRODUCTS, options).await?;
        normalize_entity(payload)
    }

    pub async fn update_product(&self, id: u64, changes: &ProductChanges) -> Result<Product, ApiError> {
        let options = RequestOptions::put().json(changes)?;
        let payload = self.request_payload(&endpoints::product(id), options).await?;
        normalize_entity(payload)
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        self.request_payload(&endpoints::product(id), RequestOptions::delete())
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
    async fn test_get_products_bare_array() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "name": "Milk"}]"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let products = client.get_products(&ProductFilter::default()).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].name, "Milk");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_products_envelope_and_filter_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search".into(), "oat milk".into()),
                Matcher::UrlEncoded("categoryId".into(), "3".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 5, "name": "Oat milk"}, {"name": "no id"}], "meta": {"total": 2}}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let filter = ProductFilter {
            search: Some("oat milk".into()),
            category_id: Some(3),
            list: ListParams::page(2),
        };
        let products = client.get_products(&filter).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Oat milk");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_products_empty_body_is_empty_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/products")
            .with_status(204)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        assert!(client.get_products(&ProductFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_product_unwraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/products")
            .match_body(Matcher::Json(json!({"name": "Rice", "categoryId": 2})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"id": 9, "name": "Rice", "categoryId": 2}}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let product = client
            .create_product(&NewProduct {
                name: "Rice".into(),
                category_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(product.id, 9);
        assert_eq!(product.category_id, Some(2));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/products/42")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "not found"}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let err = client.delete_product(42).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
