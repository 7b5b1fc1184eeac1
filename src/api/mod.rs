//
//  pantry-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client for the household pantry and shopping-list API.
//!
//! ## Architecture
//!
//! - [`client`]: URL building, default headers, the core request function
//! - [`response`]: body parsing and shape normalization
//! - [`request`]: request descriptors and query parameters
//! - [`queue`]: per-key serialization of operations
//! - [`resources`]: one method per resource operation
//! - [`endpoints`]: the endpoint table
//! - [`common`]: error and pagination types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pantry_cli::api::{PantryClient, PantryFilter};
//!
//! # async fn example() -> Result<(), pantry_cli::api::ApiError> {
//! let client = PantryClient::new("http://localhost:8000")?.with_token("your-token");
//! let pantries = client.get_pantries(&PantryFilter::default()).await?;
//! for pantry in &pantries {
//!     println!("{} {}", pantry.id, pantry.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - `Api`: the server answered with a non-2xx status
//! - `Network`: no response was received
//! - `Decode`: a single entity did not have the expected shape
//! - `Encode` / `InvalidMethod` / `InvalidHeader`: the request could not be built
//!
//! List endpoints never fail on shape: unexpected payloads become empty lists.

/// Core HTTP client.
///
/// Provides [`PantryClient`], which handles:
/// - Base URL resolution and query strings
/// - Bearer token injection
/// - Error shaping for non-2xx responses
pub mod client;

/// Shared error and pagination types.
pub mod common;

/// Fixed endpoint paths.
pub mod endpoints;

/// Per-key serial queue.
pub mod queue;

/// Request descriptors.
pub mod request;

/// Resource operations (products, categories, pantries, shopping lists, users).
pub mod resources;

/// Response parsing and normalization.
pub mod response;

pub use client::{PantryClient, DEFAULT_BASE_URL};
pub use common::{ApiError, ErrorObject, Paginated};
pub use queue::SerialQueue;
pub use request::{QueryParams, RequestOptions};
pub use resources::*;
pub use response::{Envelope, Payload};
