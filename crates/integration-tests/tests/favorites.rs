//! Favorites alongside the cart: both live in the same device store under
//! different keys and must not clobber each other.

use thimble_client::cart::CartService;
use thimble_client::favorites::Favorites;
use thimble_client::storage::MemoryStore;
use thimble_integration_tests::{FakeRemote, product};

#[tokio::test]
async fn test_favorites_and_cart_share_a_store_without_interference() {
    let store = MemoryStore::new();
    let p = product("p1", "100.00", Some(10));

    let mut favorites = Favorites::new(store.clone());
    favorites.add(&p);

    let mut cart = CartService::new(store.clone(), FakeRemote::new());
    cart.add(&p, "M", "Black", 2).await.expect("add to cart");
    cart.clear().await;

    // Emptying the cart rewrites the cart key only.
    let favorites = Favorites::new(store);
    assert_eq!(favorites.products().len(), 1);
}

#[tokio::test]
async fn test_removing_a_favorite_leaves_the_cart_alone() {
    let store = MemoryStore::new();
    let p = product("p1", "100.00", Some(10));

    let mut cart = CartService::new(store.clone(), FakeRemote::new());
    cart.add(&p, "M", "Black", 1).await.expect("add to cart");

    let mut favorites = Favorites::new(store.clone());
    favorites.add(&p);
    favorites.remove(&p.id);

    let cart = CartService::new(store, FakeRemote::new());
    assert_eq!(cart.lines().len(), 1);
}
