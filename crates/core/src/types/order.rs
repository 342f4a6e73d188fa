//! Order types as reported by the backend.
//!
//! Orders are created and totalled server-side; the client only submits the
//! cart lines and contact details and renders what comes back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// One product variant within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product the line was created from.
    pub product_id: ProductId,
    /// Product name at order time.
    pub name: String,
    /// Selected size.
    pub size: String,
    /// Selected color.
    pub color: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price at order time.
    pub price: Decimal,
}

/// Shipping contact captured with the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderContact {
    /// Recipient full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Shipping address.
    pub address: String,
}

/// An order as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend-assigned order identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Ordered lines.
    pub items: Vec<OrderLine>,
    /// Shipping contact.
    pub contact: OrderContact,
    /// Server-computed total. Includes whatever tax/shipping policy the
    /// backend applies; the client never recomputes it.
    pub total: Decimal,
    /// Current status.
    #[serde(default)]
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_order_deserializes_with_document_id() {
        let order: Order = serde_json::from_value(json!({
            "_id": "ord-1",
            "items": [{
                "productId": "p1",
                "name": "Blouse",
                "size": "M",
                "color": "Black",
                "quantity": 1,
                "price": "299.90"
            }],
            "contact": {"name": "A B", "phone": "+90 555", "address": "Somewhere 12"},
            "total": "299.90",
            "status": "shipped",
            "createdAt": "2026-01-15T10:00:00Z"
        }))
        .expect("valid");
        assert_eq!(order.id, "ord-1");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.items.len(), 1);
    }
}
