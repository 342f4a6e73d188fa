//! Integration test fixtures for Thimble.
//!
//! The cart reconciliation component is exercised end to end against a
//! scripted in-process remote ([`FakeRemote`]) and the in-memory store, so
//! the tests cover the real policy code without a backend or a network.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p thimble-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thimble_client::api::ApiError;
use thimble_client::cart::RemoteCart;
use thimble_client::storage::{LocalStore, MemoryStore};
use thimble_core::{CartLineItem, LineItemId, Product, ProductId};

// =============================================================================
// Product builders
// =============================================================================

/// Build a catalog product from the backend's wire shape.
///
/// `stock` of `None` means no known ceiling.
#[must_use]
pub fn product(id: &str, price: &str, stock: Option<i64>) -> Product {
    serde_json::from_value(json!({
        "_id": id,
        "name": format!("Product {id}"),
        "price": price,
        "stock": stock,
        "sizes": ["S", "M", "L"],
        "colors": ["Black", "White"]
    }))
    .expect("valid product payload")
}

/// Build a cart line the way an `add` would.
#[must_use]
pub fn line(product: &Product, size: &str, color: &str, quantity: u32) -> CartLineItem {
    CartLineItem::new(product, size, color, quantity)
}

// =============================================================================
// Unwritable store
// =============================================================================

/// A store whose writes never stick.
///
/// Reads delegate to a shared in-memory map, so seeded state is visible,
/// but every mutation reports failure the way a full or disabled device
/// store would. Clones share the same map.
#[derive(Clone, Default)]
pub struct UnwritableStore {
    inner: MemoryStore,
}

impl UnwritableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for UnwritableStore {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.inner.get(key, default)
    }

    fn set<T: Serialize>(&self, _key: &str, _value: &T) -> bool {
        false
    }

    fn remove(&self, _key: &str) -> bool {
        false
    }

    fn clear(&self) -> bool {
        false
    }
}

// =============================================================================
// Fake remote cart
// =============================================================================

/// Remote cart operations, for failure scripting and call recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Fetch,
    Add,
    Update,
    Remove,
    Clear,
}

#[derive(Default)]
struct FakeState {
    lines: Vec<CartLineItem>,
    failing: HashSet<Op>,
    calls: Vec<Op>,
}

/// An in-process stand-in for the backend cart service.
///
/// Behaves like the real thing: mutations apply to a server-side line list
/// and answer with the full authoritative list. Any operation can be
/// scripted to fail. Cloning shares the underlying state, so a test can
/// keep a handle while the cart service owns another.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A remote whose account cart already holds `lines`.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLineItem>) -> Self {
        let remote = Self::new();
        remote.state.lock().expect("state poisoned").lines = lines;
        remote
    }

    /// Make `op` fail until [`Self::succeed`] is called for it.
    pub fn fail(&self, op: Op) {
        self.state.lock().expect("state poisoned").failing.insert(op);
    }

    /// Let `op` succeed again.
    pub fn succeed(&self, op: Op) {
        self.state.lock().expect("state poisoned").failing.remove(&op);
    }

    /// The server-side line list.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLineItem> {
        self.state.lock().expect("state poisoned").lines.clone()
    }

    /// Every operation invoked so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().expect("state poisoned").calls.clone()
    }

    fn enter(&self, op: Op) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().expect("state poisoned");
        state.calls.push(op);
        if state.failing.contains(&op) {
            return Err(ApiError::Server("scripted failure".to_owned()));
        }
        Ok(state)
    }
}

impl RemoteCart for FakeRemote {
    async fn fetch(&self) -> Result<Vec<CartLineItem>, ApiError> {
        let state = self.enter(Op::Fetch)?;
        Ok(state.lines.clone())
    }

    async fn add(
        &self,
        product: &ProductId,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<Vec<CartLineItem>, ApiError> {
        let mut state = self.enter(Op::Add)?;
        let id = LineItemId::for_variant(product, size, color);
        if let Some(existing) = state.lines.iter_mut().find(|l| l.id == id) {
            existing.quantity += quantity;
        } else {
            // The backend hydrates the line from its own catalog; the fake
            // hydrates it from a synthetic product with the same id.
            let hydrated = self::product(product.as_str(), "100.00", None);
            state.lines.push(line(&hydrated, size, color, quantity));
        }
        Ok(state.lines.clone())
    }

    async fn update(
        &self,
        item: &LineItemId,
        quantity: u32,
    ) -> Result<Vec<CartLineItem>, ApiError> {
        let mut state = self.enter(Op::Update)?;
        for l in &mut state.lines {
            if &l.id == item {
                l.quantity = quantity;
            }
        }
        Ok(state.lines.clone())
    }

    async fn remove(&self, item: &LineItemId) -> Result<Vec<CartLineItem>, ApiError> {
        let mut state = self.enter(Op::Remove)?;
        state.lines.retain(|l| &l.id != item);
        Ok(state.lines.clone())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        let mut state = self.enter(Op::Clear)?;
        state.lines.clear();
        Ok(())
    }
}
