//! Locally kept favorites list.
//!
//! Favorites never leave the device: there is no remote favorites service,
//! so the local store is the only owner and no reconciliation applies.

use thimble_core::{Product, ProductId};

use crate::storage::{LocalStore, keys};

/// A device-local list of favorite products.
pub struct Favorites<S> {
    store: S,
    products: Vec<Product>,
}

impl<S: LocalStore> Favorites<S> {
    /// Load the favorites last persisted on this device.
    pub fn new(store: S) -> Self {
        let products = store.get(keys::FAVORITES, Vec::new());
        Self { store, products }
    }

    /// The favorite products, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a product is in the list.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.iter().any(|product| &product.id == id)
    }

    /// Add a product. Returns `false` if it is already a favorite.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.products.push(product.clone());
        self.persist();
        true
    }

    /// Remove a product from the list.
    pub fn remove(&mut self, id: &ProductId) {
        self.products.retain(|product| &product.id != id);
        self.persist();
    }

    /// Flip a product's favorite status. Returns `true` if it is now a
    /// favorite.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.products.clear();
        self.persist();
    }

    fn persist(&self) {
        if !self.store.set(keys::FAVORITES, &self.products) {
            tracing::warn!("favorites persist failed; continuing with in-memory list");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: &str) -> Product {
        serde_json::from_value(json!({
            "_id": id,
            "name": format!("Product {id}"),
            "price": "99.90",
            "stock": 5
        }))
        .expect("valid product")
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut favorites = Favorites::new(MemoryStore::new());
        assert!(favorites.add(&product("p1")));
        assert!(!favorites.add(&product("p1")));
        assert_eq!(favorites.products().len(), 1);
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut favorites = Favorites::new(MemoryStore::new());
        let p = product("p1");
        assert!(favorites.toggle(&p));
        assert!(favorites.contains(&p.id));
        assert!(!favorites.toggle(&p));
        assert!(!favorites.contains(&p.id));
    }

    #[test]
    fn test_survives_reload_from_same_store() {
        let store = MemoryStore::new();
        {
            let mut favorites = Favorites::new(store.clone());
            favorites.add(&product("p1"));
            favorites.add(&product("p2"));
        }
        let reloaded = Favorites::new(store);
        assert_eq!(reloaded.products().len(), 2);
    }

    #[test]
    fn test_clear_empties_list_and_store() {
        let store = MemoryStore::new();
        let mut favorites = Favorites::new(store.clone());
        favorites.add(&product("p1"));
        favorites.clear();
        assert!(favorites.products().is_empty());
        let persisted: Vec<Product> = store.get(keys::FAVORITES, vec![product("sentinel")]);
        assert!(persisted.is_empty());
    }
}
