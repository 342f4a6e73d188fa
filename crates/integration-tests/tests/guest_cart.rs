//! Guest-mode cart behavior: the local store is the sole owner and the
//! remote service is never consulted.

use rust_decimal::Decimal;
use thimble_client::CartError;
use thimble_client::cart::{AuthorityMode, CartService};
use thimble_client::storage::MemoryStore;
use thimble_core::LineItemId;
use thimble_integration_tests::{FakeRemote, product};

fn guest_cart() -> (CartService<MemoryStore, FakeRemote>, MemoryStore, FakeRemote) {
    let store = MemoryStore::new();
    let remote = FakeRemote::new();
    let cart = CartService::new(store.clone(), remote.clone());
    (cart, store, remote)
}

// =============================================================================
// Adding and merging
// =============================================================================

#[tokio::test]
async fn test_same_variant_merges_into_one_line() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", Some(10));

    cart.add(&p, "M", "Black", 2).await.expect("first add");
    cart.add(&p, "M", "Black", 3).await.expect("second add");

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 5);
}

#[tokio::test]
async fn test_different_variants_get_separate_lines() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", Some(10));

    cart.add(&p, "M", "Black", 1).await.expect("add M/Black");
    cart.add(&p, "L", "Black", 1).await.expect("add L/Black");
    cart.add(&p, "M", "White", 1).await.expect("add M/White");

    assert_eq!(cart.lines().len(), 3);
}

#[tokio::test]
async fn test_zero_quantity_coerces_to_one() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", None);

    cart.add(&p, "M", "Black", 0).await.expect("add");
    assert_eq!(cart.lines()[0].quantity, 1);
}

#[tokio::test]
async fn test_negative_quantity_is_rejected() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", None);

    let err = cart.add(&p, "M", "Black", -2).await.expect_err("rejected");
    assert!(matches!(err, CartError::Validation(_)));
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn test_missing_variant_selection_is_rejected() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", None);

    let err = cart.add(&p, "", "Black", 1).await.expect_err("no size");
    assert!(matches!(err, CartError::Validation(_)));
    let err = cart.add(&p, "M", "", 1).await.expect_err("no color");
    assert!(matches!(err, CartError::Validation(_)));
}

// =============================================================================
// Stock guard
// =============================================================================

#[tokio::test]
async fn test_add_beyond_stock_ceiling_is_rejected() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", Some(5));

    cart.add(&p, "M", "Black", 3).await.expect("within ceiling");
    let err = cart.add(&p, "M", "Black", 3).await.expect_err("over ceiling");

    let CartError::Validation(message) = err else {
        panic!("expected a validation error");
    };
    // The message names the remaining headroom.
    assert!(message.contains('2'), "unexpected message: {message}");
    assert_eq!(cart.lines()[0].quantity, 3, "rejected add must not apply");
}

#[tokio::test]
async fn test_unknown_ceiling_does_not_bound_quantity() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", None);

    cart.add(&p, "M", "Black", 999).await.expect("no local bound");
    assert_eq!(cart.lines()[0].quantity, 999);
}

#[tokio::test]
async fn test_update_beyond_snapshot_stock_is_rejected() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", Some(5));
    cart.add(&p, "M", "Black", 2).await.expect("add");

    let item = cart.lines()[0].id.clone();
    let err = cart.update_quantity(&item, 9).await.expect_err("over ceiling");
    assert!(matches!(err, CartError::Validation(_)));
    assert_eq!(cart.lines()[0].quantity, 2);
}

// =============================================================================
// Quantity updates and removal
// =============================================================================

#[tokio::test]
async fn test_update_to_zero_removes_the_line() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", Some(10));
    cart.add(&p, "M", "Black", 2).await.expect("add");

    let item = cart.lines()[0].id.clone();
    cart.update_quantity(&item, 0).await.expect("update to zero");
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn test_update_to_negative_removes_the_line() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", Some(10));
    cart.add(&p, "M", "Black", 2).await.expect("add");

    let item = cart.lines()[0].id.clone();
    cart.update_quantity(&item, -4).await.expect("update below zero");
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn test_update_of_absent_line_is_a_noop() {
    let (mut cart, _, _) = guest_cart();
    cart.update_quantity(&LineItemId::from("ghost-M-Black"), 3)
        .await
        .expect("no-op");
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn test_remove_of_absent_line_is_a_noop() {
    let (mut cart, _, _) = guest_cart();
    let p = product("p1", "100.00", None);
    cart.add(&p, "M", "Black", 1).await.expect("add");

    cart.remove(&LineItemId::from("ghost-M-Black")).await;
    assert_eq!(cart.lines().len(), 1);
}

// =============================================================================
// Totals
// =============================================================================

#[tokio::test]
async fn test_total_and_count_over_mixed_lines() {
    let (mut cart, _, _) = guest_cart();
    let a = product("a", "100.00", None);
    let b = product("b", "50.00", None);

    cart.add(&a, "M", "Black", 2).await.expect("add a");
    cart.add(&b, "S", "White", 1).await.expect("add b");

    assert_eq!(cart.total(), Decimal::new(25000, 2));
    assert_eq!(cart.count(), 3);
}

// =============================================================================
// Persistence and isolation
// =============================================================================

#[tokio::test]
async fn test_guest_cart_survives_a_restart() {
    let store = MemoryStore::new();
    let p = product("p1", "100.00", Some(10));
    {
        let mut cart = CartService::new(store.clone(), FakeRemote::new());
        cart.add(&p, "M", "Black", 2).await.expect("add");
    }

    let revived = CartService::new(store, FakeRemote::new());
    assert_eq!(revived.lines().len(), 1);
    assert_eq!(revived.lines()[0].quantity, 2);
    assert_eq!(revived.mode(), AuthorityMode::Guest);
}

#[tokio::test]
async fn test_guest_mode_never_calls_the_remote() {
    let (mut cart, _, remote) = guest_cart();
    let p = product("p1", "100.00", Some(10));

    cart.add(&p, "M", "Black", 2).await.expect("add");
    let item = cart.lines()[0].id.clone();
    cart.update_quantity(&item, 3).await.expect("update");
    cart.remove(&item).await;

    assert!(remote.calls().is_empty());
}
