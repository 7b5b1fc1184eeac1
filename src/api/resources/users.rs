//
//  pantry-cli
//  api/resources/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Account endpoints: login, registration, verification, profile and
//! password management.
//!
//! ```rust,no_run
//! use pantry_cli::api::{Credentials, PantryClient};
//!
//! # async fn example() -> Result<(), pantry_cli::api::ApiError> {
//! let client = PantryClient::new("http://localhost:8000")?;
//! let auth = client
//!     .login(&Credentials::new("ana@example.com", "hunter22"))
//!     .await?;
//! if let Some(token) = auth.token {
//!     println!("signed in, token has {} characters", token.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Acknowledgement;
use crate::api::common::ApiError;
use crate::api::endpoints;
use crate::api::request::RequestOptions;
use crate::api::response::normalize_entity;
use crate::api::PantryClient;

/// A user id. Depending on the server version it arrives as a number or a
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A user account as the server describes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// "Name Surname", falling back to the email, then to the id.
    pub fn display_name(&self) -> String {
        let full_name = [self.name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full_name.is_empty() {
            full_name
        } else if let Some(email) = &self.email {
            email.clone()
        } else {
            self.id
                .as_ref()
                .map(|id| format!("user #{}", id))
                .unwrap_or_default()
        }
    }
}

/// Login body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// What a successful login returns.
///
/// The token is accepted as `token`, `accessToken` or `access_token`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, alias = "accessToken", alias = "access_token")]
    pub token: Option<String>,

    #[serde(default)]
    pub user: Option<User>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registration body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Account verification body: the code sent by email.
#[derive(Debug, Clone, Serialize)]
pub struct AccountVerification {
    pub email: String,
    pub code: String,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
struct ForgotPassword<'a> {
    email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub email: String,
    pub code: String,
    pub password: String,
}

impl PantryClient {
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let options = RequestOptions::post().json(credentials)?;
        let payload = self.request_payload(endpoints::LOGIN, options).await?;
        normalize_entity(payload)
    }

    pub async fn register(&self, registration: &Registration) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(registration)?;
        let payload = self.request_payload(endpoints::REGISTER, options).await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn verify_account(
        &self,
        verification: &AccountVerification,
    ) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(verification)?;
        let payload = self.request_payload(endpoints::VERIFY_ACCOUNT, options).await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let payload = self
            .request_payload(endpoints::PROFILE, RequestOptions::get())
            .await?;
        normalize_entity(payload)
    }

    pub async fn update_profile(&self, changes: &ProfileChanges) -> Result<User, ApiError> {
        let options = RequestOptions::put().json(changes)?;
        let payload = self.request_payload(endpoints::PROFILE, options).await?;
        normalize_entity(payload)
    }

    /// Ends the session on the server. The caller clears its own token.
    pub async fn logout(&self) -> Result<Acknowledgement, ApiError> {
        let payload = self
            .request_payload(endpoints::LOGOUT, RequestOptions::post())
            .await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(change)?;
        let payload = self.request_payload(endpoints::CHANGE_PASSWORD, options).await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(&ForgotPassword { email })?;
        let payload = self.request_payload(endpoints::FORGOT_PASSWORD, options).await?;
        Ok(Acknowledgement::from_payload(payload))
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<Acknowledgement, ApiError> {
        let options = RequestOptions::post().json(reset)?;
        let payload = self.request_payload(endpoints::RESET_PASSWORD, options).await?;
        Ok(Acknowledgement::from_payload(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_display_name_fallbacks() {
        let user = User {
            name: Some("Ana".into()),
            surname: Some("Lopez".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Ana Lopez");

        let user = User {
            email: Some("ana@example.com".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ana@example.com");

        let user = User {
            id: Some(UserId::Number(4)),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "user #4");

        let user = User {
            id: Some("u-17".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "user #u-17");
    }

    #[tokio::test]
    async fn test_login_reads_token_and_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/users/login")
            .match_body(Matcher::Json(json!({"email": "ana@example.com", "password": "pw"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"accessToken": "tok", "user": {"id": 1, "name": "Ana"}}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let auth = client
            .login(&Credentials::new("ana@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(auth.token.as_deref(), Some("tok"));
        assert_eq!(auth.user.and_then(|u| u.name).as_deref(), Some("Ana"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_accepts_string_user_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "tok", "user": {"id": "1", "email": "ana@example.com"}}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let auth = client
            .login(&Credentials::new("ana@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(auth.token.as_deref(), Some("tok"));
        let user = auth.user.unwrap();
        assert_eq!(user.id, Some(UserId::Text("1".into())));
        assert_eq!(serde_json::to_value(&user).unwrap()["id"], json!("1"));
    }

    #[tokio::test]
    async fn test_login_failure_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid credentials"}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let err = client
            .login(&Credentials::new("ana@example.com", "bad"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.error_object().unwrap().message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_profile_update_sends_only_present_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/users/profile")
            .match_header("authorization", "Bearer tok")
            .match_body(Matcher::Json(json!({"surname": "Diaz"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"name": "Ana", "surname": "Diaz"}}"#)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap().with_token("tok");
        let user = client
            .update_profile(&ProfileChanges {
                surname: Some("Diaz".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(user.display_name(), "Ana Diaz");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_logout_accepts_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users/logout")
            .with_status(204)
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let ack = client.logout().await.unwrap();
        assert_eq!(ack, Acknowledgement::default());
    }

    #[tokio::test]
    async fn test_forgot_password_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/users/forgot-password")
            .match_body(Matcher::Json(json!({"email": "ana@example.com"})))
            .with_status(200)
            .with_body("Email sent")
            .create_async()
            .await;

        let client = PantryClient::new(&server.url()).unwrap();
        let ack = client.forgot_password("ana@example.com").await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Email sent"));
        mock.assert_async().await;
    }
}
