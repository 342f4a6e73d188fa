//! Normalized identifiers for products and cart lines.
//!
//! The backend historically exposed product identity two ways: a document
//! `_id` string on API responses and a numeric `id` on seed data. Both are
//! normalized into [`ProductId`] at the deserialization boundary so the rest
//! of the codebase never inspects alternate fields.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Normalized product identifier.
///
/// Always a string internally; numeric identifiers from legacy payloads are
/// converted to their decimal representation when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from an already-normalized string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// Identifier of a cart line: the `{product}-{size}-{color}` composite key.
///
/// A given variant (product, size, color) maps to exactly one line id, which
/// is what makes duplicate adds merge instead of appending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Build the composite key for a variant.
    #[must_use]
    pub fn for_variant(product: &ProductId, size: &str, color: &str) -> Self {
        Self(format!("{product}-{size}-{color}"))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_string_payload() {
        let id: ProductId = serde_json::from_str("\"64f1c0ffee\"").expect("valid");
        assert_eq!(id.as_str(), "64f1c0ffee");
    }

    #[test]
    fn test_product_id_from_numeric_payload() {
        let id: ProductId = serde_json::from_str("42").expect("valid");
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_line_item_id_composite_key() {
        let id = LineItemId::for_variant(&ProductId::new("p1"), "M", "Black");
        assert_eq!(id.as_str(), "p1-M-Black");
    }

    #[test]
    fn test_same_variant_same_key() {
        let a = LineItemId::for_variant(&ProductId::new("p1"), "M", "Black");
        let b = LineItemId::for_variant(&ProductId::new("p1"), "M", "Black");
        let c = LineItemId::for_variant(&ProductId::new("p1"), "L", "Black");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
