//! Domain types for the RocketShoes cart.
//!
//! - **Catalog**: products as served by the catalog API, stock records
//! - **Cart**: ordered line items with per-product amounts
//! - **Summary**: item counts and totals derived from a cart
//!
//! # Example
//!
//! ```rust
//! use rocketshoes_commerce::prelude::*;
//!
//! let product = Product::new(ProductId::new(1))
//!     .with_attribute("title", "Tênis de Caminhada")
//!     .with_attribute("price", 179.9);
//!
//! let mut cart = Cart::new();
//! cart.push_product(product).unwrap();
//! cart.increment(ProductId::new(1));
//!
//! let summary = cart.summarize(Currency::BRL).unwrap();
//! assert_eq!(summary.total.display(), "R$ 359,80");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, CartSummary, LineItem, LineSummary};
pub use catalog::{Product, StockRecord};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, CartSummary, LineItem, LineSummary};
    pub use crate::catalog::{Product, StockRecord};
}
