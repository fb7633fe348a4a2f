//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by cart and catalog types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// A line item amount below one.
    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// A second line item for a product already in the cart.
    #[error("Duplicate line item for product {0}")]
    DuplicateLineItem(ProductId),

    /// A product attribute had an unexpected type.
    #[error("Invalid attribute {name} on product {product_id}")]
    InvalidAttribute { product_id: ProductId, name: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
