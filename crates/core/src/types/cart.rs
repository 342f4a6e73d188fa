//! Cart line items and the pure folds over them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{LineItemId, ProductId};
use super::product::{Product, ProductSnapshot};

/// A single cart line: one product variant and its quantity.
///
/// At most one line exists per `(product, size, color)` triple; duplicate
/// adds increment [`CartLineItem::quantity`] instead of appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Composite `{product}-{size}-{color}` key.
    pub id: LineItemId,
    /// Normalized product identifier.
    pub product_id: ProductId,
    /// Product fields captured at add time. Not guaranteed fresh.
    pub product: ProductSnapshot,
    /// Selected size. Never empty.
    pub size: String,
    /// Selected color. Never empty.
    pub color: String,
    /// Units of this variant. Always at least 1.
    pub quantity: u32,
    /// Unit price captured at add time.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
}

impl CartLineItem {
    /// Build a new line for a variant of `product`.
    #[must_use]
    pub fn new(product: &Product, size: &str, color: &str, quantity: u32) -> Self {
        Self {
            id: LineItemId::for_variant(&product.id, size, color),
            product_id: product.id.clone(),
            product: product.snapshot(),
            size: size.to_owned(),
            color: color.to_owned(),
            quantity,
            unit_price: product.price,
        }
    }

    /// Price of the whole line (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sum of `unit_price * quantity` over all lines.
///
/// Tax and shipping are owned by the order backend and never enter here.
#[must_use]
pub fn cart_total(lines: &[CartLineItem]) -> Decimal {
    lines.iter().map(CartLineItem::line_total).sum()
}

/// Total number of units across all lines.
#[must_use]
pub fn cart_count(lines: &[CartLineItem]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::product::StockLevel;

    fn line(price: i64, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: LineItemId::from(format!("p{price}-M-Black")),
            product_id: ProductId::new(format!("p{price}")),
            product: ProductSnapshot {
                name: "Test".to_owned(),
                image: None,
                price: Decimal::from(price),
                stock: StockLevel::Unlimited,
            },
            size: "M".to_owned(),
            color: "Black".to_owned(),
            quantity,
            unit_price: Decimal::from(price),
        }
    }

    #[test]
    fn test_totals_and_counts() {
        let lines = vec![line(100, 2), line(50, 1)];
        assert_eq!(cart_total(&lines), Decimal::from(250));
        assert_eq!(cart_count(&lines), 3);
    }

    #[test]
    fn test_empty_cart_totals() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
        assert_eq!(cart_count(&[]), 0);
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let payload = json!({
            "id": "p1-M-Black",
            "productId": "p1",
            "product": {"name": "Blouse", "price": "299.90", "stock": 15},
            "size": "M",
            "color": "Black",
            "quantity": 2,
            "price": "299.90"
        });
        let item: CartLineItem = serde_json::from_value(payload).expect("valid");
        assert_eq!(item.product.stock, StockLevel::Limited(15));
        assert_eq!(item.line_total(), Decimal::new(59980, 2));

        let back = serde_json::to_value(&item).expect("serializes");
        assert_eq!(back["price"], json!("299.90"));
        assert_eq!(back["product"]["stock"], json!(15));
    }
}
