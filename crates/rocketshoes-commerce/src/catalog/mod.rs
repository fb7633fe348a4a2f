//! Catalog module.
//!
//! Contains products as served by the catalog API and stock records.

mod product;
mod stock;

pub use product::{Attributes, Product};
pub use stock::StockRecord;

pub(crate) use product::price_attribute;
