//! The cart store.

use std::sync::Arc;

use rocketshoes_cache::{Cache, Slot};
use rocketshoes_commerce::{Cart, CartSummary, CommerceError, ProductId};
use rocketshoes_data::{ProductCatalog, StockLookup};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::error::{CartError, Operation};
use crate::notice::{LogNotifier, Notifier};

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Owns the cart and keeps its persistence slot in sync.
///
/// Every mutation is a read-modify-persist-publish cycle on a copy of the
/// cart: the copy is written to the slot first and only becomes the current
/// cart once the write succeeded, so a failed operation never leaves a
/// partial change behind in memory or in storage.
///
/// Mutating methods take `&mut self`. Callers sharing a store between tasks
/// wrap it in a `tokio::sync::Mutex`, which serializes operations that would
/// otherwise race on the same snapshot.
pub struct CartStore {
    cart: Cart,
    slot: Slot<Cart>,
    catalog: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockLookup>,
    notifier: Arc<dyn Notifier>,
    config: StoreConfig,
    updates: watch::Sender<Cart>,
}

impl CartStore {
    /// Create a store, restoring the cart persisted under `config.storage_key`.
    ///
    /// A missing entry yields an empty cart. So does an entry that is not a
    /// valid cart (bad JSON, wrong shape, duplicate products, amounts below
    /// one); it is logged and left in place until the next mutation
    /// overwrites it.
    pub fn load(
        cache: Cache,
        catalog: Arc<dyn ProductCatalog>,
        stock: Arc<dyn StockLookup>,
        config: StoreConfig,
    ) -> Self {
        let slot = Slot::new(cache, config.storage_key.clone());
        let cart = restore(&slot);
        let (updates, _) = watch::channel(cart.clone());

        Self {
            cart,
            slot,
            catalog,
            stock,
            notifier: Arc::new(LogNotifier),
            config,
            updates,
        }
    }

    /// Deliver notices through `notifier` instead of the log.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Counts and totals for the current cart.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        self.cart.summarize(self.config.currency)
    }

    /// Receive a snapshot every time the cart changes.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched from the catalog and
    /// appended with amount 1; otherwise its amount grows by one. Stock is
    /// checked with the configured [`AddStockRule`](crate::AddStockRule).
    #[tracing::instrument(level = "debug", skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add(product_id).await;
        self.report(Operation::Add, result)
    }

    /// Remove a product's line item.
    #[tracing::instrument(level = "debug", skip_all, fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove(product_id);
        self.report(Operation::Remove, result)
    }

    /// Set a product's amount to exactly `update.amount`.
    ///
    /// Amounts of zero or less are ignored without a lookup, a notice, or a
    /// write. Products not in the cart are left out: nothing is added.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(product_id = %update.product_id, amount = update.amount)
    )]
    pub async fn update_product_amount(
        &mut self,
        update: UpdateProductAmount,
    ) -> Result<(), CartError> {
        if update.amount <= 0 {
            tracing::debug!("ignoring non-positive amount");
            return Ok(());
        }
        let result = self.try_update(update).await;
        self.report(Operation::UpdateAmount, result)
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let (product, stock) = futures::try_join!(
            self.catalog.product(product_id),
            self.stock.stock(product_id)
        )?;

        let current = self.cart.amount_of(product_id);
        if !self.config.add_stock_rule.allows(current, &stock) {
            return Err(CartError::InsufficientStock {
                product_id,
                requested: current.map_or(1, |a| a.saturating_add(1)),
                available: stock.amount,
            });
        }

        let mut next = self.cart.clone();
        if current.is_some() {
            next.increment(product_id);
        } else {
            next.push_product(product)?;
        }
        self.commit(next)
    }

    fn try_remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let mut next = self.cart.clone();
        next.remove(product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;
        self.commit(next)
    }

    async fn try_update(&mut self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        let stock = self.stock.stock(product_id).await?;
        if !stock.covers(amount) {
            return Err(CartError::InsufficientStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut next = self.cart.clone();
        if !next.set_amount(product_id, amount)? {
            tracing::debug!("product not in cart, amounts unchanged");
        }
        self.commit(next)
    }

    /// Persist `next`, then make it the current cart and publish it.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        self.slot.save(&next)?;
        self.updates.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });
        tracing::debug!(items = next.len(), units = next.total_units(), "cart saved");
        self.cart = next;
        Ok(())
    }

    fn report(&self, operation: Operation, result: Result<(), CartError>) -> Result<(), CartError> {
        if let Err(err) = &result {
            let notice = err.notice(operation);
            tracing::warn!(%operation, error = %err, notice = notice.message(), "cart operation failed");
            self.notifier.notify(notice);
        }
        result
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("slot", &self.slot)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn restore(slot: &Slot<Cart>) -> Cart {
    match slot.load() {
        Ok(Some(cart)) => {
            tracing::debug!(key = slot.key(), items = cart.len(), "cart restored");
            cart
        }
        Ok(None) => Cart::new(),
        Err(err) => {
            tracing::warn!(key = slot.key(), error = %err, "discarding unreadable persisted cart");
            Cart::new()
        }
    }
}
