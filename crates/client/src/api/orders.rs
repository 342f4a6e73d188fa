//! Order endpoints of the backend API.
//!
//! Order creation is remote-only: there is no local fallback for placing an
//! order, and totals (including any tax or shipping policy) are computed by
//! the backend.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use thimble_core::{CartLineItem, Order, OrderContact};

use super::{ApiClient, ApiError, ensure_success};

#[derive(Deserialize)]
struct OrderEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    order: Option<Order>,
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    orders: Vec<Order>,
}

/// Line payload submitted when creating an order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderLinePayload<'a> {
    product_id: &'a thimble_core::ProductId,
    name: &'a str,
    size: &'a str,
    color: &'a str,
    quantity: u32,
    price: rust_decimal::Decimal,
}

/// Orders surface of the backend API.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

impl OrdersApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an order from the given cart lines.
    ///
    /// The caller is expected to clear the cart after a successful
    /// submission.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the order
    /// (e.g., stock changed since the cart was filled) and transport-level
    /// errors otherwise.
    #[instrument(skip(self, lines, contact), fields(line_count = lines.len()))]
    pub async fn create(
        &self,
        lines: &[CartLineItem],
        contact: &OrderContact,
    ) -> Result<Order, ApiError> {
        let items: Vec<OrderLinePayload<'_>> = lines
            .iter()
            .map(|line| OrderLinePayload {
                product_id: &line.product_id,
                name: &line.product.name,
                size: &line.size,
                color: &line.color,
                quantity: line.quantity,
                price: line.unit_price,
            })
            .collect();

        let body = json!({ "items": items, "contact": contact });
        let envelope: OrderEnvelope = self.client.post("/orders", &body).await?;
        ensure_success(envelope.success, envelope.message)?;
        envelope
            .order
            .ok_or_else(|| ApiError::Rejected("order response is missing the order".to_owned()))
    }

    /// Fetch the signed-in account's order history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthExpired`] without a valid session and
    /// transport-level errors otherwise.
    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        let envelope: OrdersEnvelope = self.client.get("/orders/my-orders").await?;
        ensure_success(envelope.success, envelope.message)?;
        Ok(envelope.orders)
    }
}
