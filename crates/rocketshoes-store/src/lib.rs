//! The RocketShoes cart store.
//!
//! [`CartStore`] owns the cart, mirrors it to a persistence slot after every
//! mutation, and checks quantities against a stock lookup before committing
//! them. Failures are reported twice: as a [`Notice`] for the user, and as a
//! [`CartError`] for the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_cache::Cache;
//! use rocketshoes_commerce::ProductId;
//! use rocketshoes_data::ApiClient;
//! use rocketshoes_store::{CartStore, StoreConfig, UpdateProductAmount};
//!
//! let api = Arc::new(ApiClient::new("http://localhost:3333")?);
//! let mut store = CartStore::load(Cache::open_file("storage.json")?, api.clone(), api, StoreConfig::default());
//!
//! store.add_product(ProductId::new(1)).await?;
//! store.update_product_amount(UpdateProductAmount { product_id: ProductId::new(1), amount: 3 }).await?;
//! store.remove_product(ProductId::new(1))?;
//! ```

mod config;
mod error;
mod notice;
mod store;

pub use config::{AddStockRule, StoreConfig, DEFAULT_STORAGE_KEY};
pub use error::{CartError, Operation};
pub use notice::{ChannelNotifier, LogNotifier, Notice, Notifier, RecordingNotifier};
pub use store::{CartStore, UpdateProductAmount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AddStockRule, CartError, CartStore, Notice, Notifier, StoreConfig, UpdateProductAmount,
    };
    pub use rocketshoes_commerce::prelude::*;
}
