//! Local persistence failures cost durability only: the in-memory effect
//! of every cart operation stands even when no mirror write ever sticks.

use thimble_client::cart::CartService;
use thimble_client::storage::MemoryStore;
use thimble_integration_tests::{FakeRemote, UnwritableStore, product};

#[tokio::test]
async fn test_add_succeeds_when_the_mirror_write_fails() {
    let mut cart = CartService::new(UnwritableStore::new(), FakeRemote::new());
    let p = product("p1", "100.00", Some(10));

    cart.add(&p, "M", "Black", 2).await.expect("add applies in memory");

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.count(), 2);
}

#[tokio::test]
async fn test_update_succeeds_when_the_mirror_write_fails() {
    let mut cart = CartService::new(UnwritableStore::new(), FakeRemote::new());
    let p = product("p1", "100.00", Some(10));
    cart.add(&p, "M", "Black", 2).await.expect("add");

    let item = cart.lines()[0].id.clone();
    cart.update_quantity(&item, 5).await.expect("update applies in memory");

    assert_eq!(cart.lines()[0].quantity, 5);
}

#[tokio::test]
async fn test_remove_and_clear_apply_when_the_mirror_write_fails() {
    let mut cart = CartService::new(UnwritableStore::new(), FakeRemote::new());
    let a = product("a", "100.00", None);
    let b = product("b", "50.00", None);
    cart.add(&a, "M", "Black", 1).await.expect("add a");
    cart.add(&b, "S", "White", 1).await.expect("add b");

    let item = cart.lines()[0].id.clone();
    cart.remove(&item).await;
    assert_eq!(cart.lines().len(), 1);

    cart.clear().await;
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn test_only_durability_is_lost() {
    let store = UnwritableStore::new();
    let p = product("p1", "100.00", Some(10));
    {
        let mut cart = CartService::new(store.clone(), FakeRemote::new());
        cart.add(&p, "M", "Black", 2).await.expect("add");
        assert_eq!(cart.count(), 2, "in-memory effect stands");
    }

    // Nothing stuck, so a restart starts empty - unlike the writable-store
    // round trip.
    let revived = CartService::new(store, FakeRemote::new());
    assert!(revived.lines().is_empty());

    let writable = MemoryStore::new();
    {
        let mut cart = CartService::new(writable.clone(), FakeRemote::new());
        cart.add(&p, "M", "Black", 2).await.expect("add");
    }
    let revived = CartService::new(writable, FakeRemote::new());
    assert_eq!(revived.count(), 2);
}
