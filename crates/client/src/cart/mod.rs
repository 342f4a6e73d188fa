//! Cart reconciliation between the local mirror and the remote cart service.
//!
//! Two stores of truth exist: the durable local store on the device and the
//! authoritative server-side cart tied to the signed-in account. While the
//! user is a guest, the local store owns the cart outright. Once signed in,
//! the remote service owns it and the local store becomes a best-effort
//! mirror, rewritten after every successful remote mutation and read back
//! as a fallback when the remote is unreachable.
//!
//! Failure policy is asymmetric on purpose. An `add` that fails remotely is
//! surfaced and applies nothing locally: falling back would let the visible
//! cart silently diverge from server-enforced stock truth. `remove`,
//! `update_quantity`, and `clear` cannot increase stock pressure, so they
//! degrade to a local-only mutation and reconcile on the next successful
//! remote call.

use thimble_core::{CartLineItem, LineItemId, Product, ProductId, cart_count, cart_total};

use rust_decimal::Decimal;

use crate::api::ApiError;
use crate::error::{CartError, CartResult};
use crate::storage::{LocalStore, keys};

// =============================================================================
// Remote contract
// =============================================================================

/// The remote cart service as the reconciler sees it.
///
/// Every mutation answers with the authoritative full line list. Implemented
/// by [`crate::api::CartApi`] for the real backend and by scripted fakes in
/// tests.
#[allow(async_fn_in_trait)]
pub trait RemoteCart {
    /// Fetch the account's current cart.
    async fn fetch(&self) -> Result<Vec<CartLineItem>, ApiError>;

    /// Add a variant to the cart.
    async fn add(
        &self,
        product: &ProductId,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<Vec<CartLineItem>, ApiError>;

    /// Set the quantity of an existing line.
    async fn update(&self, item: &LineItemId, quantity: u32)
    -> Result<Vec<CartLineItem>, ApiError>;

    /// Remove a line.
    async fn remove(&self, item: &LineItemId) -> Result<Vec<CartLineItem>, ApiError>;

    /// Empty the cart.
    async fn clear(&self) -> Result<(), ApiError>;
}

// =============================================================================
// Authority mode
// =============================================================================

/// Which store of truth currently owns the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityMode {
    /// Unauthenticated: the local store is the sole owner.
    Guest,
    /// Signed in: the remote service is primary, the local store mirrors it.
    Authenticated,
}

// =============================================================================
// Quantity coercion
// =============================================================================

/// Coerce a raw add-quantity: zero defaults to one, negatives are rejected.
fn coerce_add_quantity(raw: i64) -> CartResult<u32> {
    let raw = if raw == 0 { 1 } else { raw };
    u32::try_from(raw)
        .map_err(|_| CartError::Validation("Quantity must be a positive number.".to_owned()))
}

// =============================================================================
// CartService
// =============================================================================

/// The cart reconciliation component.
///
/// One value owns the cart state; operations take `&mut self` and run to
/// completion before the next one starts, so concurrent mutation of the same
/// line is not representable without deliberate wrapping. Constructed
/// explicitly and injected wherever needed - there is no ambient singleton.
pub struct CartService<S, R> {
    store: S,
    remote: R,
    mode: AuthorityMode,
    lines: Vec<CartLineItem>,
}

impl<S: LocalStore, R: RemoteCart> CartService<S, R> {
    /// Create a service in guest mode, loading whatever the local store
    /// last mirrored.
    pub fn new(store: S, remote: R) -> Self {
        let lines = store.get(keys::CART, Vec::new());
        Self {
            store,
            remote,
            mode: AuthorityMode::Guest,
            lines,
        }
    }

    /// Current line items.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Current authority mode.
    #[must_use]
    pub const fn mode(&self) -> AuthorityMode {
        self.mode
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.lines)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        cart_count(&self.lines)
    }

    // =========================================================================
    // Mode transitions
    // =========================================================================

    /// Enter authenticated mode after a successful login or session restore.
    ///
    /// Fetches the account's remote cart and **replaces** the locally
    /// accumulated guest cart with it - the two are never merged. If the
    /// fetch fails the service still enters authenticated mode, keeps the
    /// last local mirror as a fallback view, and reports the failure.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Remote`] if the initial fetch fails.
    pub async fn sign_in(&mut self) -> CartResult<()> {
        self.mode = AuthorityMode::Authenticated;
        match self.remote.fetch().await {
            Ok(items) => {
                self.adopt(items);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote cart fetch failed, serving local mirror");
                self.lines = self.store.get(keys::CART, Vec::new());
                Err(e.into())
            }
        }
    }

    /// Return to guest mode after logout, reading back whatever the local
    /// store last mirrored.
    pub fn sign_out(&mut self) {
        self.mode = AuthorityMode::Guest;
        self.lines = self.store.get(keys::CART, Vec::new());
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add `quantity` units of a product variant to the cart.
    ///
    /// The stock guard runs locally against the product snapshot in both
    /// modes, before any mutation. In authenticated mode a remote failure is
    /// surfaced untouched - no local fallback.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] for a missing size or color, a
    /// non-coercible quantity, or a stock-ceiling violation, and
    /// [`CartError::Remote`] when the remote add fails.
    pub async fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> CartResult<()> {
        if size.is_empty() || color.is_empty() {
            return Err(CartError::Validation(
                "Please select a size and a color first.".to_owned(),
            ));
        }
        let quantity = coerce_add_quantity(quantity)?;

        let id = LineItemId::for_variant(&product.id, size, color);
        let existing = self
            .lines
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.quantity);

        let requested_total = existing.saturating_add(quantity);
        if product.stock.exceeded_by(requested_total) {
            return Err(CartError::Validation(stock_guard_message(
                product.stock.ceiling().unwrap_or(0),
                existing,
            )));
        }

        if self.mode == AuthorityMode::Authenticated {
            let items = self.remote.add(&product.id, size, color, quantity).await?;
            self.adopt(items);
            return Ok(());
        }

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => line.quantity = requested_total,
            None => self
                .lines
                .push(CartLineItem::new(product, size, color, quantity)),
        }
        self.mirror();
        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// In authenticated mode a remote failure degrades to a local-only
    /// removal: taking items out can never violate a stock ceiling, so the
    /// user's intent wins and the carts reconcile on the next successful
    /// remote call. Removing an id that is not in the cart is a no-op.
    pub async fn remove(&mut self, item: &LineItemId) {
        if self.mode == AuthorityMode::Authenticated {
            match self.remote.remove(item).await {
                Ok(items) => {
                    self.adopt(items);
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, %item, "remote remove failed, removing locally");
                }
            }
        }

        self.lines.retain(|line| &line.id != item);
        self.mirror();
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or below delegates to [`Self::remove`]. Updating
    /// an id that is not in the cart is a no-op. A remote failure degrades
    /// to a local-only update.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] when the new quantity exceeds the
    /// line's snapshot stock ceiling.
    pub async fn update_quantity(&mut self, item: &LineItemId, quantity: i64) -> CartResult<()> {
        let Ok(quantity @ 1..) = u32::try_from(quantity) else {
            self.remove(item).await;
            return Ok(());
        };

        let Some(line) = self.lines.iter().find(|line| &line.id == item) else {
            return Ok(());
        };

        if line.product.stock.exceeded_by(quantity) {
            let ceiling = line.product.stock.ceiling().unwrap_or(0);
            return Err(CartError::Validation(format!(
                "You can hold at most {ceiling} of this product in your cart."
            )));
        }

        if self.mode == AuthorityMode::Authenticated {
            match self.remote.update(item, quantity).await {
                Ok(items) => {
                    self.adopt(items);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, %item, "remote update failed, updating locally");
                }
            }
        }

        for line in &mut self.lines {
            if &line.id == item {
                line.quantity = quantity;
            }
        }
        self.mirror();
        Ok(())
    }

    /// Empty the cart.
    ///
    /// The remote clear is best-effort; its failure is logged and the local
    /// cart is emptied unconditionally in both modes.
    pub async fn clear(&mut self) {
        if self.mode == AuthorityMode::Authenticated
            && let Err(e) = self.remote.clear().await
        {
            tracing::warn!(error = %e, "remote clear failed, clearing locally");
        }

        self.lines.clear();
        self.mirror();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Replace the in-memory list with an authoritative remote list and
    /// mirror it locally.
    fn adopt(&mut self, items: Vec<CartLineItem>) {
        self.lines = items;
        self.mirror();
    }

    /// Write the current list to the local store. Losing the write costs
    /// durability only; the in-memory cart stands either way.
    fn mirror(&self) {
        if !self.store.set(keys::CART, &self.lines) {
            tracing::warn!("cart mirror write failed; continuing with in-memory cart");
        }
    }
}

/// User-facing message for an add that would exceed the stock ceiling.
fn stock_guard_message(ceiling: u32, existing: u32) -> String {
    let addable = ceiling.saturating_sub(existing);
    if addable > 0 {
        format!(
            "At most {ceiling} of this product can be carted. Your cart already holds \
             {existing}; you can add at most {addable} more."
        )
    } else {
        format!("Your cart already holds the maximum stock ({ceiling}) of this product.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_add_quantity_defaults_to_one() {
        assert_eq!(coerce_add_quantity(0).expect("coerced"), 1);
    }

    #[test]
    fn test_negative_add_quantity_is_rejected() {
        assert!(matches!(
            coerce_add_quantity(-3),
            Err(CartError::Validation(_))
        ));
    }

    #[test]
    fn test_positive_add_quantity_passes_through() {
        assert_eq!(coerce_add_quantity(7).expect("coerced"), 7);
    }

    #[test]
    fn test_guard_message_names_headroom() {
        let message = stock_guard_message(15, 12);
        assert!(message.contains("15"));
        assert!(message.contains("12"));
        assert!(message.contains('3'));
    }

    #[test]
    fn test_guard_message_when_nothing_addable() {
        let message = stock_guard_message(5, 5);
        assert!(message.contains("maximum stock (5)"));
    }
}
