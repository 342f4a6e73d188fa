//! Cart endpoints of the backend API.
//!
//! Every mutation answers with the authoritative full line-item list, which
//! the reconciliation layer adopts wholesale. The server re-validates stock
//! on every add and update; a violation comes back as a rejected request.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use thimble_core::{CartLineItem, LineItemId, ProductId};

use super::{ApiClient, ApiError, ensure_success};
use crate::cart::RemoteCart;

/// Cart surface of the backend API. Not cached - mutable state.
#[derive(Debug, Clone)]
pub struct CartApi {
    client: ApiClient,
}

impl CartApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct CartEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    cart: Option<CartBody>,
}

#[derive(Deserialize)]
struct CartBody {
    #[serde(default)]
    items: Vec<CartLineItem>,
}

#[derive(Deserialize)]
struct StatusEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn into_items(envelope: CartEnvelope) -> Result<Vec<CartLineItem>, ApiError> {
    ensure_success(envelope.success, envelope.message)?;
    Ok(envelope.cart.map(|body| body.items).unwrap_or_default())
}

impl RemoteCart for CartApi {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<CartLineItem>, ApiError> {
        into_items(self.client.get("/cart").await?)
    }

    #[instrument(skip(self), fields(product = %product))]
    async fn add(
        &self,
        product: &ProductId,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<Vec<CartLineItem>, ApiError> {
        let body = json!({
            "productId": product,
            "size": size,
            "color": color,
            "quantity": quantity,
        });
        into_items(self.client.post("/cart", &body).await?)
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn update(
        &self,
        item: &LineItemId,
        quantity: u32,
    ) -> Result<Vec<CartLineItem>, ApiError> {
        let body = json!({ "quantity": quantity });
        into_items(self.client.put(&format!("/cart/{item}"), &body).await?)
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn remove(&self, item: &LineItemId) -> Result<Vec<CartLineItem>, ApiError> {
        into_items(self.client.delete(&format!("/cart/{item}")).await?)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<(), ApiError> {
        let envelope: StatusEnvelope = self.client.delete("/cart").await?;
        ensure_success(envelope.success, envelope.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_cart_yields_empty_list() {
        let envelope: CartEnvelope =
            serde_json::from_str(r#"{"success":true}"#).expect("valid");
        assert!(into_items(envelope).expect("success").is_empty());
    }

    #[test]
    fn test_refused_envelope_surfaces_message() {
        let envelope: CartEnvelope =
            serde_json::from_str(r#"{"success":false,"message":"Not enough stock"}"#)
                .expect("valid");
        let err = into_items(envelope).expect_err("rejected");
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "Not enough stock"));
    }

    #[test]
    fn test_envelope_parses_items() {
        let envelope: CartEnvelope = serde_json::from_str(
            r#"{
                "success": true,
                "cart": {"items": [{
                    "id": "p1-M-Black",
                    "productId": "p1",
                    "product": {"name": "Blouse", "price": "299.90", "stock": 15},
                    "size": "M",
                    "color": "Black",
                    "quantity": 2,
                    "price": "299.90"
                }]}
            }"#,
        )
        .expect("valid");
        let items = into_items(envelope).expect("success");
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|i| i.quantity), Some(2));
    }
}
