//
//  pantry-cli
//  api/resources/pantry_items.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pantry Items
//!
//! Every operation on the items of one pantry, reads included, goes through
//! the client's [`SerialQueue`] under the key `pantry:{id}:items`. Two calls
//! for the same pantry never overlap on the wire and complete in the order
//! they were made; calls for different pantries run concurrently.
//!
//! The queue position is taken when the method is *called*, not when the
//! returned future is first polled:
//!
//! ```rust,no_run
//! use pantry_cli::api::{PantryClient, PantryItemChanges};
//!
//! # async fn example() -> Result<(), pantry_cli::api::ApiError> {
//! let client = PantryClient::new("http://localhost:8000")?;
//! let changes = PantryItemChanges { quantity: Some(2.0), ..Default::default() };
//!
//! let update = client.update_pantry_item(7, 1, &changes);
//! let delete = client.delete_pantry_item(7, 2);
//! // The delete is sent only once the update has finished.
//! let (updated, deleted) = tokio::join!(delete, update);
//! # let _ = (updated, deleted);
//! # Ok(())
//! # }
//! ```
//!
//! [`SerialQueue`]: crate::api::SerialQueue

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ListParams, Product};
use crate::api::common::ApiError;
use crate::api::endpoints;
use crate::api::queue::SerialQueue;
use crate::api::request::{QueryParams, RequestOptions};
use crate::api::response::{normalize_array, normalize_entity};
use crate::api::PantryClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantry_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    /// The product, when the server embeds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// As sent by the server, usually an ISO 8601 date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PantryItem {
    /// The embedded product's name, or the product id.
    pub fn label(&self) -> String {
        match (&self.product, self.product_id) {
            (Some(product), _) if !product.name.is_empty() => product.name.clone(),
            (_, Some(product_id)) => format!("product #{}", product_id),
            _ => format!("item #{}", self.id),
        }
    }
}

/// Body for [`PantryClient::add_pantry_item`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPantryItem {
    pub product_id: u64,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for [`PantryClient::update_pantry_item`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query for [`PantryClient::get_pantry_items`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PantryItemFilter {
    pub search: Option<String>,
    pub category_id: Option<u64>,
    pub list: ListParams,
}

impl PantryItemFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("search", self.search.as_deref())
            .push("categoryId", self.category_id);
        self.list.append_to(&mut query);
        query
    }
}

/// Queue key shared by every operation on one pantry's items.
pub fn pantry_items_key(pantry_id: u64) -> String {
    SerialQueue::key("pantry", Some(pantry_id), "items")
}

impl PantryClient {
    pub fn get_pantry_items<'a>(
        &'a self,
        pantry_id: u64,
        filter: &PantryItemFilter,
    ) -> impl Future<Output = Result<Vec<PantryItem>, ApiError>> + 'a {
        let options = RequestOptions::get().query(filter.to_query());
        self.queue().enqueue(pantry_items_key(pantry_id), async move {
            let payload = self
                .request_payload(&endpoints::pantry_items(pantry_id), options)
                .await?;
            Ok(normalize_array(payload))
        })
    }

    pub fn get_pantry_item(
        &self,
        pantry_id: u64,
        item_id: u64,
    ) -> impl Future<Output = Result<PantryItem, ApiError>> + '_ {
        self.queue().enqueue(pantry_items_key(pantry_id), async move {
            let payload = self
                .request_payload(&endpoints::pantry_item(pantry_id, item_id), RequestOptions::get())
                .await?;
            normalize_entity(payload)
        })
    }

    pub fn add_pantry_item<'a>(
        &'a self,
        pantry_id: u64,
        item: &NewPantryItem,
    ) -> impl Future<Output = Result<PantryItem, ApiError>> + 'a {
        let options = RequestOptions::post().json(item);
        self.queue().enqueue(pantry_items_key(pantry_id), async move {
            let payload = self
                .request_payload(&endpoints::pantry_items(pantry_id), options?)
                .await?;
            normalize_entity(payload)
        })
    }

    pub fn update_pantry_item<'a>(
        &'a self,
        pantry_id: u64,
        item_id: u64,
        changes: &PantryItemChanges,
    ) -> impl Future<Output = Result<PantryItem, ApiError>> + 'a {
        let options = RequestOptions::put().json(changes);
        self.queue().enqueue(pantry_items_key(pantry_id), async move {
            let payload = self
                .request_payload(&endpoints::pantry_item(pantry_id, item_id), options?)
                .await?;
            normalize_entity(payload)
        })
    }

    pub fn delete_pantry_item(
        &self,
        pantry_id: u64,
        item_id: u64,
    ) -> impl Future<Output = Result<(), ApiError>> + '_ {
        self.queue().enqueue(pantry_items_key(pantry_id), async move {
            self.request_payload(&endpoints::pantry_item(pantry_id, item_id), RequestOptions::delete())
                .await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::time::sleep;

    type Log = Arc<Mutex<Vec<String>>>;

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_string();
                let length = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return head;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Answers one request per connection and logs when each request
    /// arrives and when its response goes out. PUT answers are held back.
    async fn slow_put_server(log: Log) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let log = log.clone();
                tokio::spawn(async move {
                    let head = read_request(&mut socket).await;
                    let method = head.split_whitespace().next().unwrap_or_default().to_string();
                    log.lock().unwrap().push(format!("{}:start", method));

                    let response = if method == "PUT" {
                        sleep(Duration::from_millis(100)).await;
                        let body = r#"{"id": 1, "quantity": 2}"#;
                        format!(
                            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    } else {
                        "HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n".to_string()
                    };

                    log.lock().unwrap().push(format!("{}:end", method));
                    socket.write_all(response.as_bytes()).await.unwrap();
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_update_and_delete_never_overlap() {
        let log: Log = Arc::default();
        let base_url = slow_put_server(log.clone()).await;

        let client = PantryClient::new(&base_url).unwrap();
        let changes = PantryItemChanges {
            quantity: Some(2.0),
            ..Default::default()
        };

        let (updated, deleted) = tokio::join!(
            client.update_pantry_item(7, 1, &changes),
            client.delete_pantry_item(7, 2)
        );

        assert_eq!(updated.unwrap().quantity, Some(2.0));
        deleted.unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["PUT:start", "PUT:end", "DELETE:start", "DELETE:end"]
        );
        assert_eq!(client.queue().len(), 1);
        assert_eq!(pantry_items_key(7), "pantry:7:items");
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let mut server = mockito::Server::new_async().await;
        let update = server
            .mock("PUT", "/api/pantries/7/items/1")
            .match_body(Matcher::Json(json!({"quantity": 2.0})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 1, "quantity": 2}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let changes = PantryItemChanges {
            quantity: Some(2.0),
            ..Default::default()
        };
        let item = client.update_pantry_item(7, 1, &changes).await.unwrap();

        assert_eq!(item.id, 1);
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_queue_slot_is_taken_at_call_time() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/pantries/7/items/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        assert!(client.queue().is_empty());

        let pending = client.get_pantry_item(7, 1);
        assert_eq!(client.queue().len(), 1);

        assert_eq!(pending.await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_failed_item_write_does_not_block_next() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/pantries/7/items/9")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "not found"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/pantries/7/items")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 1, "product": {"id": 3, "name": "Milk"}}]}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let (deleted, items) = tokio::join!(
            client.delete_pantry_item(7, 9),
            client.get_pantry_items(7, &PantryItemFilter::default())
        );

        let err = deleted.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.error_object().unwrap().message, "not found");

        let items = items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label(), "Milk");
    }

    #[tokio::test]
    async fn test_add_item_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/pantries/2/items")
            .match_body(Matcher::Json(json!({"productId": 3, "quantity": 1.5, "unit": "kg"})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 10, "productId": 3, "quantity": 1.5, "unit": "kg"}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let item = client
            .add_pantry_item(
                2,
                &NewPantryItem {
                    product_id: 3,
                    quantity: 1.5,
                    unit: Some("kg".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(item.label(), "product #3");
        mock.assert_async().await;
    }
}
