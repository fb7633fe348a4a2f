//! Cart store errors.

use std::fmt;

use rocketshoes_cache::CacheError;
use rocketshoes_commerce::{CommerceError, ProductId};
use rocketshoes_data::FetchError;
use thiserror::Error;

use crate::notice::Notice;

/// The store operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Notice shown when this operation fails for any reason but stock.
    pub fn failure_notice(&self) -> Notice {
        match self {
            Self::Add => Notice::AddFailed,
            Self::Remove => Notice::RemoveFailed,
            Self::UpdateAmount => Notice::UpdateFailed,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add_product",
            Self::Remove => "remove_product",
            Self::UpdateAmount => "update_product_amount",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a cart operation left the cart unchanged.
#[derive(Error, Debug)]
pub enum CartError {
    /// Not enough stock for the requested amount.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Product not in cart.
    #[error("Product not in cart: {0}")]
    ProductNotInCart(ProductId),

    /// Catalog or stock lookup failed.
    #[error("Lookup failed: {0}")]
    Fetch(#[from] FetchError),

    /// The persistence slot rejected the write.
    #[error("Persisting cart failed: {0}")]
    Storage(#[from] CacheError),

    /// The change would break a cart invariant.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl CartError {
    /// The user-facing notice for this error raised by `operation`.
    pub fn notice(&self, operation: Operation) -> Notice {
        match self {
            Self::InsufficientStock { .. } => Notice::InsufficientStock,
            _ => operation.failure_notice(),
        }
    }
}
