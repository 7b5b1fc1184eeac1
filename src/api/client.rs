//
//  pantry-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Pantry API
//!
//! [`PantryClient`] is the single choke point every resource method goes
//! through. It owns URL construction, default headers, response
//! normalization and error shaping.
//!
//! ## Features
//!
//! - Relative endpoints resolved against a configurable base URL
//! - Bearer token read from a [`TokenProvider`] on every request
//! - Tolerant body parsing (JSON, text or nothing)
//! - Non-2xx responses turned into [`ErrorObject`]s
//! - A [`SerialQueue`] for operations that must not overlap

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use super::common::{ApiError, ErrorObject};
use super::queue::SerialQueue;
use super::request::{is_body_bearing, QueryParams, RequestOptions};
use super::response::{read_payload, Payload};
use crate::auth::{StaticToken, TokenProvider};
use crate::config::ApiConfig;

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The HTTP client for the pantry and shopping-list API.
///
/// Cheap to clone: clones share the connection pool, the token provider and
/// the serial queue.
///
/// ```rust,no_run
/// use pantry_cli::api::PantryClient;
///
/// # async fn example() -> Result<(), pantry_cli::api::ApiError> {
/// let client = PantryClient::new("http://localhost:8000")?.with_token("secret");
/// let products = client.get_products(&Default::default()).await?;
/// println!("{} products", products.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PantryClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without a trailing slash; empty means "same origin"
    base_url: String,
    /// Where the bearer token comes from
    tokens: Arc<dyn TokenProvider>,
    /// Serializes operations per resource key
    queue: SerialQueue,
}

impl PantryClient {
    /// Creates a client with no token and a fresh queue.
    ///
    /// Trailing slashes are stripped from `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("pantry/{}", crate::VERSION))
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    /// Creates a client from the `[api]` section of the configuration.
    ///
    /// A configured `timeout_secs` becomes the transport timeout; without
    /// it the reqwest default applies.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(format!("pantry/{}", crate::VERSION));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self::with_http(builder.build()?, &config.base_url))
    }

    fn with_http(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            tokens: Arc::new(StaticToken::none()),
            queue: SerialQueue::new(),
        }
    }

    /// Sets where the bearer token is read from.
    pub fn with_token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Uses a fixed bearer token.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_token_provider(Arc::new(StaticToken::new(token)))
    }

    /// Replaces the serial queue, e.g. to share one between clients.
    pub fn with_queue(mut self, queue: SerialQueue) -> Self {
        self.queue = queue;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn queue(&self) -> &SerialQueue {
        &self.queue
    }

    /// Builds the full request URL for an endpoint.
    ///
    /// Absolute `http://` and `https://` endpoints are used as they are;
    /// anything else is appended to the base URL. Present query pairs are
    /// appended in insertion order.
    ///
    /// ```rust
    /// use pantry_cli::api::{PantryClient, QueryParams};
    ///
    /// let client = PantryClient::new("http://localhost:8000/").unwrap();
    /// let query = QueryParams::new().with("page", Some(2));
    /// assert_eq!(
    ///     client.build_url("/api/pantries", &query),
    ///     "http://localhost:8000/api/pantries?page=2"
    /// );
    /// ```
    pub fn build_url(&self, endpoint: &str, query: &QueryParams) -> String {
        let mut url = if is_absolute(endpoint) || self.base_url.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        };

        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query.encode());
        }
        url
    }

    /// Headers for one request: defaults first, then caller headers on top.
    pub fn request_headers(
        &self,
        method: &Method,
        extra: &[(String, String)],
    ) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if is_body_bearing(method) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = self.tokens.token().filter(|token| !token.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in extra {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Issues a request and returns the normalized payload.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] for any non-2xx status
    /// - [`ApiError::Network`] if no response was received
    /// - [`ApiError::InvalidHeader`] / [`ApiError::Encode`] for bad input
    pub async fn request_payload(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Payload, ApiError> {
        let RequestOptions {
            method,
            query,
            body,
            headers,
        } = options;

        let url = self.build_url(endpoint, &query);
        let headers = self.request_headers(&method, &headers)?;

        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if is_body_bearing(&method) {
            if let Some(body) = &body {
                request = request.body(serde_json::to_vec(body).map_err(ApiError::Encode)?);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let payload = read_payload(response).await?;

        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(ApiError::Api(ErrorObject::from_payload(status.as_u16(), payload)));
        }

        Ok(payload)
    }

    /// Issues a request and reads the payload as `T`.
    ///
    /// An empty body is read as JSON `null` and a text body as a JSON
    /// string, so `T = serde_json::Value`, `Option<_>` and `()` all accept a
    /// 204.
    ///
    /// # Errors
    ///
    /// Everything [`request_payload`](Self::request_payload) returns, plus
    /// [`ApiError::Decode`] when the body does not fit `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let payload = self.request_payload(endpoint, options).await?;
        serde_json::from_value(payload.into_value()).map_err(ApiError::Decode)
    }
}

fn is_absolute(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}
