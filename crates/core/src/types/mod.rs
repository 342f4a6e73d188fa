//! Core domain types shared across Thimble crates.

mod cart;
mod id;
mod order;
mod price;
mod product;

pub use cart::{CartLineItem, cart_count, cart_total};
pub use id::{LineItemId, ProductId};
pub use order::{Order, OrderContact, OrderLine, OrderStatus};
pub use price::{CurrencyCode, Price};
pub use product::{Product, ProductError, ProductSnapshot, StockLevel};
