//! Hosted authentication collaborator.
//!
//! Sign-in exchanges an email/password pair for an opaque [`Session`];
//! failures are classified so each reason maps to a distinct user-visible
//! message. There is no lockout or backoff logic.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Errors returned by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No account exists for the given email.
    #[error("no admin account found with this email")]
    UserNotFound,

    /// The password did not match.
    #[error("incorrect password")]
    WrongPassword,

    /// The email is not well formed.
    #[error("invalid email format")]
    InvalidEmail,

    /// Email or password was left empty.
    #[error("please enter both email and password")]
    CredentialsMissing,

    /// Anything else: network failures, unexpected statuses, unknown codes.
    #[error("login failed: {0}")]
    Other(String),
}

/// An authenticated session handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identifier of the signed-in user.
    pub user_id: String,
    /// Email the session was created for.
    pub email: String,
    /// Opaque bearer token.
    pub token: String,
}

/// The hosted authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`] on failure.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Invalidate the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Other`] if the service rejects the request.
    async fn sign_out(&self, session: Session) -> Result<(), AuthError>;
}

/// Error codes the hosted service returns in its 4xx bodies.
const CODE_USER_NOT_FOUND: &str = "USER_NOT_FOUND";
const CODE_WRONG_PASSWORD: &str = "WRONG_PASSWORD";
const CODE_INVALID_EMAIL: &str = "INVALID_EMAIL";

#[derive(Debug, Deserialize)]
struct SessionBody {
    user_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
}

/// Authentication over the hosted service's HTTP API.
#[derive(Debug, Clone)]
pub struct RestAuth {
    client: Client,
    sessions_url: Url,
    api_key: Option<String>,
}

impl RestAuth {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions endpoint cannot be derived from the
    /// base URL.
    pub fn new(base_url: &Url, api_key: Option<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: Client::new(),
            sessions_url: base_url.join("v1/sessions")?,
            api_key,
        })
    }

    fn classify(status: StatusCode, body: Option<ErrorBody>) -> AuthError {
        let Some(body) = body else {
            return AuthError::Other(format!("authentication service returned {status}"));
        };
        match body.error.code.as_str() {
            CODE_USER_NOT_FOUND => AuthError::UserNotFound,
            CODE_WRONG_PASSWORD => AuthError::WrongPassword,
            CODE_INVALID_EMAIL => AuthError::InvalidEmail,
            other => AuthError::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut request = self.client.post(self.sessions_url.clone()).json(
            &serde_json::json!({ "email": email, "password": password }),
        );
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Other(e.to_string()))?;
        let status = response.status();

        if status.is_success() {
            let body: SessionBody = response
                .json()
                .await
                .map_err(|e| AuthError::Other(e.to_string()))?;
            return Ok(Session {
                user_id: body.user_id,
                email: email.to_string(),
                token: body.token,
            });
        }

        if status.is_client_error() {
            let body = response.json::<ErrorBody>().await.ok();
            return Err(Self::classify(status, body));
        }
        Err(AuthError::Other(format!(
            "authentication service returned {status}"
        )))
    }

    async fn sign_out(&self, session: Session) -> Result<(), AuthError> {
        let url = Url::parse(&format!("{}/current", self.sessions_url))
            .map_err(|e| AuthError::Other(e.to_string()))?;
        self.client
            .delete(url)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(|e| AuthError::Other(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::Other(e.to_string()))?;
        Ok(())
    }
}

/// In-process provider with a fixed credential table, used by tests and
/// offline demos.
#[derive(Debug, Default)]
pub struct StaticAuth {
    accounts: HashMap<String, String>,
}

impl StaticAuth {
    /// Create an empty provider (every sign-in fails with `UserNotFound`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    #[must_use]
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts
            .insert(email.to_lowercase(), password.to_string());
        self
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        let Some(expected) = self.accounts.get(&email.to_lowercase()) else {
            return Err(AuthError::UserNotFound);
        };
        if expected != password {
            return Err(AuthError::WrongPassword);
        }
        Ok(Session {
            user_id: format!("static-{}", email.to_lowercase()),
            email: email.to_string(),
            token: "static-token".to_string(),
        })
    }

    async fn sign_out(&self, _session: Session) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages_are_distinct() {
        let messages = [
            AuthError::UserNotFound.to_string(),
            AuthError::WrongPassword.to_string(),
            AuthError::InvalidEmail.to_string(),
            AuthError::CredentialsMissing.to_string(),
            AuthError::Other("boom".to_string()).to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_classify_known_codes() {
        let body = |code: &str| ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
            },
        };

        assert_eq!(
            RestAuth::classify(StatusCode::NOT_FOUND, Some(body(CODE_USER_NOT_FOUND))),
            AuthError::UserNotFound
        );
        assert_eq!(
            RestAuth::classify(StatusCode::UNAUTHORIZED, Some(body(CODE_WRONG_PASSWORD))),
            AuthError::WrongPassword
        );
        assert_eq!(
            RestAuth::classify(StatusCode::BAD_REQUEST, Some(body(CODE_INVALID_EMAIL))),
            AuthError::InvalidEmail
        );
        assert_eq!(
            RestAuth::classify(StatusCode::BAD_REQUEST, Some(body("RATE_LIMITED"))),
            AuthError::Other("RATE_LIMITED".to_string())
        );
    }

    #[test]
    fn test_classify_without_body() {
        let error = RestAuth::classify(StatusCode::BAD_REQUEST, None);
        assert!(matches!(error, AuthError::Other(_)));
    }

    #[tokio::test]
    async fn test_static_auth_sign_in() {
        let auth = StaticAuth::new().with_account("admin@example.com", "hunter2");

        let session = auth.sign_in("admin@example.com", "hunter2").await.unwrap();
        assert_eq!(session.email, "admin@example.com");
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_static_auth_classifies_failures() {
        let auth = StaticAuth::new().with_account("admin@example.com", "hunter2");

        assert_eq!(
            auth.sign_in("nobody@example.com", "x").await.unwrap_err(),
            AuthError::UserNotFound
        );
        assert_eq!(
            auth.sign_in("admin@example.com", "wrong").await.unwrap_err(),
            AuthError::WrongPassword
        );
        assert_eq!(
            auth.sign_in("not-an-email", "x").await.unwrap_err(),
            AuthError::InvalidEmail
        );
    }

    #[tokio::test]
    async fn test_static_auth_email_lookup_is_case_insensitive() {
        let auth = StaticAuth::new().with_account("Admin@Example.com", "pw");
        assert!(auth.sign_in("admin@example.com", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn test_static_auth_sign_out() {
        let auth = StaticAuth::new().with_account("admin@example.com", "pw");
        let session = auth.sign_in("admin@example.com", "pw").await.unwrap();
        assert!(auth.sign_out(session).await.is_ok());
    }
}
