//! Catalog product types and stock arithmetic.
//!
//! [`Product`] is the catalog record as served by the backend. Identity is
//! normalized at the deserialization boundary (see [`ProductId`]):
//! responses carry either a document `_id` string or a legacy numeric `id`,
//! and exactly one of them becomes the product's id.
//!
//! [`StockLevel`] models the stock ceiling the way the cart guard needs it:
//! a known non-negative ceiling bounds quantities, an unknown ceiling does
//! not bound anything locally.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;

/// Products created within this window are merchandised as new.
const NEW_PRODUCT_WINDOW_DAYS: i64 = 14;

/// Out-of-stock products stay visible in the storefront for this long.
const OUT_OF_STOCK_GRACE_DAYS: i64 = 30;

// =============================================================================
// Stock Level
// =============================================================================

/// Known stock ceiling for a product, or the absence of one.
///
/// Wire representation is a plain optional integer: a non-negative number is
/// a ceiling, anything else (absent, null, negative) means the ceiling is
/// unknown and no local bound is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum StockLevel {
    /// At most this many units exist.
    Limited(u32),
    /// No known ceiling.
    #[default]
    Unlimited,
}

impl StockLevel {
    /// The ceiling, if one is known.
    #[must_use]
    pub const fn ceiling(self) -> Option<u32> {
        match self {
            Self::Limited(n) => Some(n),
            Self::Unlimited => None,
        }
    }

    /// How many more units can be taken on top of `existing`.
    ///
    /// Returns `None` when the ceiling is unknown (unbounded). A ceiling
    /// below `existing` yields zero, never a negative value.
    #[must_use]
    pub const fn headroom(self, existing: u32) -> Option<u32> {
        match self {
            Self::Limited(ceiling) => Some(ceiling.saturating_sub(existing)),
            Self::Unlimited => None,
        }
    }

    /// Whether holding `total` units would exceed the ceiling.
    #[must_use]
    pub const fn exceeded_by(self, total: u32) -> bool {
        match self {
            Self::Limited(ceiling) => total > ceiling,
            Self::Unlimited => false,
        }
    }
}

impl From<Option<i64>> for StockLevel {
    fn from(raw: Option<i64>) -> Self {
        match raw {
            Some(n) if n >= 0 => Self::Limited(u32::try_from(n).unwrap_or(u32::MAX)),
            _ => Self::Unlimited,
        }
    }
}

impl From<StockLevel> for Option<i64> {
    fn from(level: StockLevel) -> Self {
        level.ceiling().map(i64::from)
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// Denormalized subset of product fields captured when a line is added.
///
/// Lets the cart render and guard quantities without a live catalog fetch.
/// Not guaranteed fresh: the remote service re-validates on mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product display name.
    pub name: String,
    /// Primary image URL, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Price at snapshot time.
    pub price: Decimal,
    /// Stock ceiling at snapshot time.
    #[serde(default)]
    pub stock: StockLevel,
}

// =============================================================================
// Product
// =============================================================================

/// Error normalizing a raw product payload.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Neither `_id` nor `id` was present.
    #[error("product {name:?} has no identifier")]
    MissingId {
        /// Name of the offending product, for diagnostics.
        name: String,
    },
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductWire", rename_all = "camelCase")]
pub struct Product {
    /// Normalized identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category slug, if categorized.
    pub category: Option<String>,
    /// Current price.
    pub price: Decimal,
    /// Pre-discount price, when the product is discounted.
    pub old_price: Option<Decimal>,
    /// Long-form description.
    pub description: Option<String>,
    /// Primary image URL.
    pub image: Option<String>,
    /// All image URLs.
    pub images: Vec<String>,
    /// Stock ceiling.
    pub stock: StockLevel,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Available colors.
    pub colors: Vec<String>,
    /// Creation time, when the backend reports one.
    pub created_at: Option<DateTime<Utc>>,
    /// When the product last ran out of stock.
    pub out_of_stock_since: Option<DateTime<Utc>>,
}

impl Product {
    /// Capture the denormalized snapshot stored on a cart line.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.clone(),
            image: self
                .image
                .clone()
                .or_else(|| self.images.first().cloned()),
            price: self.price,
            stock: self.stock,
        }
    }

    /// Whether the product was created within the new-arrival window.
    #[must_use]
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        self.created_at
            .is_some_and(|created| now - created < Duration::days(NEW_PRODUCT_WINDOW_DAYS))
    }

    /// Whether the product is discounted (has a crossed-out old price).
    #[must_use]
    pub const fn is_discounted(&self) -> bool {
        self.old_price.is_some()
    }

    /// Whether the storefront should still show this product.
    ///
    /// Out-of-stock products remain visible for a grace period so existing
    /// links do not break immediately.
    #[must_use]
    pub fn visible_in_storefront(&self, now: DateTime<Utc>) -> bool {
        match self.stock {
            StockLevel::Limited(0) => self
                .out_of_stock_since
                .is_some_and(|since| now - since < Duration::days(OUT_OF_STOCK_GRACE_DAYS)),
            StockLevel::Limited(_) | StockLevel::Unlimited => true,
        }
    }
}

/// Raw product payload before identity and stock normalization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductWire {
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
    #[serde(default)]
    id: Option<ProductId>,
    name: String,
    #[serde(default)]
    category: Option<String>,
    price: Decimal,
    #[serde(default)]
    old_price: Option<Decimal>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    stock: Option<serde_json::Value>,
    #[serde(default)]
    sizes: Vec<String>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    // Older backend payloads call this field `outOfStockDate`.
    #[serde(default, alias = "outOfStockDate")]
    out_of_stock_since: Option<DateTime<Utc>>,
}

impl TryFrom<ProductWire> for Product {
    type Error = ProductError;

    fn try_from(wire: ProductWire) -> Result<Self, Self::Error> {
        let id = match (wire.document_id, wire.id) {
            (Some(document_id), _) => ProductId::new(document_id),
            (None, Some(id)) => id,
            (None, None) => return Err(ProductError::MissingId { name: wire.name }),
        };

        // A non-numeric stock field means the ceiling is unknown.
        let stock = StockLevel::from(wire.stock.as_ref().and_then(serde_json::Value::as_i64));

        Ok(Self {
            id,
            name: wire.name,
            category: wire.category,
            price: wire.price,
            old_price: wire.old_price,
            description: wire.description,
            image: wire.image,
            images: wire.images,
            stock,
            sizes: wire.sizes,
            colors: wire.colors,
            created_at: wire.created_at,
            out_of_stock_since: wire.out_of_stock_since,
        })
    }
}
