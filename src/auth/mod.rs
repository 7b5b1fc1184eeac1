//
//  pantry-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Where the bearer token lives and how the API client gets hold of it.
//!
//! ## Module Structure
//!
//! - [`store`]: the [`KeyValueStore`] trait plus file and in-memory backends
//! - [`keychain`]: a [`KeyValueStore`] on top of the system keyring
//! - [`session`]: [`Session`], the token and cached profile on top of a store
//!
//! ## Token Providers
//!
//! The API client never reads storage directly. It asks a [`TokenProvider`]
//! on every request:
//!
//! ```rust
//! use std::sync::Arc;
//! use pantry_cli::api::PantryClient;
//! use pantry_cli::auth::{MemoryStore, Session, TokenProvider};
//!
//! let session = Session::new(Arc::new(MemoryStore::new()));
//! session.set_token("abc").unwrap();
//! assert_eq!(session.token(), Some("abc".to_string()));
//!
//! let client = PantryClient::new("http://localhost:8000")
//!     .unwrap()
//!     .with_token_provider(Arc::new(session));
//! ```

mod keychain;
mod session;
mod store;

pub use keychain::*;
pub use session::*;
pub use store::*;

/// Supplies the current bearer token, if any.
///
/// Called once per request; implementations must not cache on behalf of the
/// client.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// A token fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A provider that never has a token.
    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
