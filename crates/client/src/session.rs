//! Bearer-token session lifecycle.
//!
//! The stored token is the durable credential: it lives in the local store
//! under its own key and is shared with the API client through the
//! [`TokenCell`]. The session manager owns authority-mode transitions -
//! after a successful `login`/`restore` the application moves its cart
//! service into authenticated mode, after `logout` back to guest. A token
//! that expires mid-session only fails individual calls; nothing down in
//! the API layer flips the mode behind the manager's back.

use secrecy::{ExposeSecret, SecretString};

use crate::api::{ApiClient, ApiError, AuthApi, NewAccount, TokenCell, User};
use crate::storage::{LocalStore, keys};

/// Manages the account session for one device.
pub struct SessionManager<S> {
    store: S,
    auth: AuthApi,
    token: TokenCell,
    user: Option<User>,
}

impl<S: LocalStore> SessionManager<S> {
    /// Create a signed-out manager wired to the given API client's token
    /// cell.
    pub fn new(store: S, api: &ApiClient) -> Self {
        Self {
            store,
            auth: api.auth(),
            token: api.token(),
            user: None,
        }
    }

    /// Restore a previous session from the stored token, if any.
    ///
    /// Returns `Ok(true)` when a session was restored. A stored token the
    /// backend no longer accepts is discarded and the manager stays signed
    /// out; that is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] or [`ApiError::Server`] when the
    /// backend could not be consulted at all; the stored token is kept for
    /// the next attempt in that case.
    pub async fn restore(&mut self) -> Result<bool, ApiError> {
        let stored: Option<String> = self.store.get(keys::TOKEN, None);
        let Some(stored) = stored else {
            return Ok(false);
        };

        self.token.set(SecretString::from(stored));
        match self.auth.current_user().await {
            Ok(user) => {
                tracing::debug!(user = %user.email, "session restored");
                self.user = Some(user);
                Ok(true)
            }
            Err(ApiError::AuthExpired | ApiError::Rejected(_)) => {
                tracing::debug!("stored token no longer valid, discarding");
                self.forget_token();
                Ok(false)
            }
            Err(e) => {
                self.token.clear();
                Err(e)
            }
        }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for bad credentials and
    /// transport-level errors otherwise.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        let (token, user) = self.auth.login(email, password).await?;
        self.adopt_session(token, user.clone());
        Ok(user)
    }

    /// Register a new account and log straight into it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the details
    /// and transport-level errors otherwise.
    pub async fn register(&mut self, account: &NewAccount) -> Result<User, ApiError> {
        let (token, user) = self.auth.register(account).await?;
        self.adopt_session(token, user.clone());
        Ok(user)
    }

    /// Log out, discarding the token locally. The backend holds no
    /// server-side session to end.
    pub fn logout(&mut self) {
        self.forget_token();
        self.user = None;
    }

    /// Whether a user is currently signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn adopt_session(&mut self, token: SecretString, user: User) {
        // The token must outlive the process, so it is persisted in the
        // clear the way a browser's local storage would hold it.
        if !self.store.set(keys::TOKEN, &token.expose_secret()) {
            tracing::warn!("token persist failed; session will not survive a restart");
        }
        self.token.set(token);
        self.user = Some(user);
    }

    fn forget_token(&mut self) {
        self.token.clear();
        self.store.remove(keys::TOKEN);
    }
}
