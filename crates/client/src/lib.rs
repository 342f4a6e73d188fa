//! Thimble storefront client library.
//!
//! The backend API owns all authoritative state (inventory, payment,
//! persistence, authorization). This crate is the device-side half: it keeps
//! a durable local mirror of the cart and favorites, talks to the backend
//! over HTTP+JSON, and reconciles the two.
//!
//! # Architecture
//!
//! - [`storage`] - synchronous key-value store on the device (JSON files)
//! - [`api`] - classified HTTP client for the backend endpoints
//! - [`cart`] - cart reconciliation between local mirror and remote service
//! - [`favorites`] - purely local favorites list
//! - [`session`] - bearer-token session lifecycle
//!
//! # Example
//!
//! ```rust,ignore
//! use thimble_client::api::ApiClient;
//! use thimble_client::cart::CartService;
//! use thimble_client::config::ClientConfig;
//! use thimble_client::storage::JsonFileStore;
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let store = JsonFileStore::new(&config.data_dir);
//! let mut cart = CartService::new(store, api.cart());
//!
//! cart.add(&product, "M", "Black", 1).await?;
//! println!("{} items, total {}", cart.count(), cart.total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod favorites;
pub mod session;
pub mod storage;

pub use error::{CartError, CartResult};
