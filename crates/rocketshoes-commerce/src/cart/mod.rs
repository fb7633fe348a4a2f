//! Shopping cart module.
//!
//! Contains the cart, its line items, and derived summaries.

mod cart;
mod summary;

pub use cart::{Cart, LineItem};
pub use summary::{CartSummary, LineSummary};
