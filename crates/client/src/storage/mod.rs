//! Durable key-value storage on the client device.
//!
//! The adapter contract is deliberately blunt: every operation is
//! synchronous and never fails from the caller's point of view. A read that
//! goes wrong (missing key, corrupt value, unreadable disk) yields the
//! caller-provided default; a write that goes wrong reports `false` and the
//! failure is not retried. Callers treat lost durability as non-fatal - the
//! in-memory effect of an operation always stands.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Well-known store keys.
pub mod keys {
    /// Mirrored cart line items.
    pub const CART: &str = "cart";
    /// Locally kept favorite products.
    pub const FAVORITES: &str = "favorites";
    /// Bearer token of the current session.
    pub const TOKEN: &str = "token";
}

/// A synchronous, never-throwing key-value store.
pub trait LocalStore {
    /// Read the value at `key`, or `default` if absent or unreadable.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T;

    /// Write `value` at `key`. Returns `false` if the write did not stick.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool;

    /// Delete the value at `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> bool;

    /// Delete every value in the store.
    fn clear(&self) -> bool;
}

impl<S: LocalStore> LocalStore for &S {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        (*self).get(key, default)
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        (*self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (*self).remove(key)
    }

    fn clear(&self) -> bool {
        (*self).clear()
    }
}
