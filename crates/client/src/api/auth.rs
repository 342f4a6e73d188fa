//! Authentication endpoints of the backend API.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use super::{ApiClient, ApiError, ensure_success};

/// Role granted to an account by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

/// An authenticated account as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend-assigned identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Contact phone, if provided at registration.
    #[serde(default)]
    pub phone: Option<String>,
    /// Shipping address, if provided at registration.
    #[serde(default)]
    pub address: Option<String>,
    /// Granted role.
    #[serde(default)]
    pub role: UserRole,
}

/// Details for creating a new account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Deserialize)]
struct AuthEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Deserialize)]
struct MeEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Auth surface of the backend API.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an account. Returns the issued bearer token and the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the details
    /// (e.g., the email is taken) and transport-level errors otherwise.
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn register(&self, account: &NewAccount) -> Result<(SecretString, User), ApiError> {
        let envelope: AuthEnvelope = self.client.post("/auth/register", account).await?;
        unpack_credentials(envelope)
    }

    /// Exchange email and password for a bearer token and the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for bad credentials and
    /// transport-level errors otherwise.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(SecretString, User), ApiError> {
        let body = json!({ "email": email, "password": password });
        let envelope: AuthEnvelope = self.client.post("/auth/login", &body).await?;
        unpack_credentials(envelope)
    }

    /// Fetch the account the current bearer token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthExpired`] if the token is missing or stale.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let envelope: MeEnvelope = self.client.get("/auth/me").await?;
        ensure_success(envelope.success, envelope.message)?;
        envelope.user.ok_or(ApiError::AuthExpired)
    }
}

fn unpack_credentials(envelope: AuthEnvelope) -> Result<(SecretString, User), ApiError> {
    ensure_success(envelope.success, envelope.message)?;
    match (envelope.token, envelope.user) {
        (Some(token), Some(user)) => Ok((SecretString::from(token), user)),
        _ => Err(ApiError::Rejected(
            "login response is missing a token".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_document_id() {
        let user: User = serde_json::from_str(
            r#"{"_id": "u1", "name": "Ada", "email": "ada@example.com", "role": "admin"}"#,
        )
        .expect("valid");
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let user: User =
            serde_json::from_str(r#"{"id": "u2", "name": "Bo", "email": "bo@example.com"}"#)
                .expect("valid");
        assert_eq!(user.role, UserRole::Customer);
    }

    #[test]
    fn test_login_envelope_without_token_is_rejected() {
        let envelope: AuthEnvelope = serde_json::from_str(
            r#"{"success": true, "user": {"id": "u1", "name": "A", "email": "a@b.c"}}"#,
        )
        .expect("valid");
        assert!(unpack_credentials(envelope).is_err());
    }
}
