//
//  pantry-cli
//  auth/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The signed-in session.
//!
//! Two values are persisted: the bearer token under `auth-token` and a
//! cached copy of the user's profile under `user`. The profile is a
//! convenience for display only; a missing or unreadable copy is never an
//! error.

use std::sync::Arc;

use anyhow::Result;

use super::{KeyValueStore, TokenProvider};
use crate::api::User;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth-token";

/// Storage key for the cached user profile.
pub const USER_KEY: &str = "user";

/// Token and cached profile on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token. Storage failures are logged and read as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The cached profile, if one is stored and still readable.
    ///
    /// An unreadable copy is removed so it is not tried again.
    pub fn user(&self) -> Option<User> {
        let raw = match self.store.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read cached profile");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cached profile");
                if let Err(e) = self.store.remove(USER_KEY) {
                    tracing::warn!(error = %e, "Could not remove cached profile");
                }
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &raw)
    }

    /// Stores a fresh token and, when known, the profile that came with it.
    pub fn establish(&self, token: &str, user: Option<&User>) -> Result<()> {
        self.set_token(token)?;
        match user {
            Some(user) => self.set_user(user),
            None => self.store.remove(USER_KEY),
        }
    }

    /// Forgets the token and the cached profile.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}

impl TokenProvider for Session {
    fn token(&self) -> Option<String> {
        Session::token(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserId;
    use crate::auth::MemoryStore;

    fn session() -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Session::new(store.clone()), store)
    }

    fn user() -> User {
        User {
            id: Some(UserId::Number(1)),
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_token_lifecycle() {
        let (session, _) = session();
        assert!(!session.is_authenticated());

        session.set_token("abc").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(TokenProvider::token(&session), Some("abc".to_string()));

        session.clear().unwrap();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let (session, _) = session();
        session.set_token("").unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_establish_stores_profile() {
        let (session, _) = session();
        session.establish("abc", Some(&user())).unwrap();
        assert_eq!(session.user(), Some(user()));

        session.establish("def", None).unwrap();
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), Some("def".to_string()));
    }

    #[test]
    fn test_profile_with_string_id_is_kept() {
        let (session, store) = session();
        store
            .set(USER_KEY, r#"{"id":"1","email":"ana@example.com"}"#)
            .unwrap();

        let user = session.user().unwrap();
        assert_eq!(user.id, Some("1".into()));
        assert!(store.get(USER_KEY).unwrap().is_some());
    }

    #[test]
    fn test_unreadable_profile_is_discarded() {
        let (session, store) = session();
        store.set(USER_KEY, "{broken").unwrap();

        assert_eq!(session.user(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }
}
