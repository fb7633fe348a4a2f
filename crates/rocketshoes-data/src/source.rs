//! Collaborator traits consumed by the cart store.

use std::sync::Arc;

use async_trait::async_trait;
use rocketshoes_commerce::{catalog::Product, catalog::StockRecord, ProductId};

use crate::client::FetchError;

/// Source of product details.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the catalog record for a product.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;
}

/// Source of current stock levels.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Fetch the stock record for a product.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError>;
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        (**self).product(id).await
    }
}

#[async_trait]
impl<T: StockLookup + ?Sized> StockLookup for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        (**self).stock(id).await
    }
}
