//! Shared command plumbing: configuration, wiring, errors.

pub mod auth;
pub mod cart;
pub mod favorites;
pub mod orders;
pub mod products;

use thiserror::Error;
use thimble_client::CartError;
use thimble_client::api::{ApiClient, ApiError, CartApi};
use thimble_client::cart::CartService;
use thimble_client::config::{ClientConfig, ConfigError};
use thimble_client::session::SessionManager;
use thimble_client::storage::JsonFileStore;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cart(#[from] CartError),

    /// The command needs a signed-in account.
    #[error("not signed in; run `thimble auth login` first")]
    SignedOut,
}

/// Wiring shared by every command: the API client and the device-local
/// store, both rooted in the environment configuration.
pub struct Context {
    pub api: ApiClient,
    pub store: JsonFileStore,
}

impl Context {
    /// Build the context from environment variables.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config)?;
        let store = JsonFileStore::new(&config.data_dir);
        Ok(Self { api, store })
    }

    /// Restore the stored session, if one exists.
    ///
    /// Returns the manager and whether a session is live. An unreachable
    /// backend is an error; a stale token is not.
    pub async fn session(&self) -> Result<(SessionManager<JsonFileStore>, bool), CliError> {
        let mut session = SessionManager::new(self.store.clone(), &self.api);
        let restored = session.restore().await?;
        Ok((session, restored))
    }

    /// Build the cart service in the mode matching the stored session.
    ///
    /// When signed in but the remote cart cannot be fetched, the service
    /// still enters authenticated mode and falls back to the last local
    /// mirror; the command proceeds on that view.
    pub async fn cart(&self) -> Result<CartService<JsonFileStore, CartApi>, CliError> {
        let (_, signed_in) = self.session().await?;
        let mut cart = CartService::new(self.store.clone(), self.api.cart());
        if signed_in && let Err(e) = cart.sign_in().await {
            tracing::warn!("remote cart unavailable ({e}); showing the last local mirror");
        }
        Ok(cart)
    }
}
