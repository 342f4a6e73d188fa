//! Thimble Core - Shared types library.
//!
//! This crate provides common types used across all Thimble components:
//! - `client` - Storefront client library (storage, API, cart reconciliation)
//! - `cli` - Terminal front-end for the client library
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Normalized IDs, prices, products, cart line items, and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
