//! Cart and line item types.

use crate::cart::{CartSummary, LineSummary};
use crate::catalog::{price_attribute, Attributes, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A shopping cart.
///
/// An ordered sequence of line items, at most one per product. Serializes as
/// a bare JSON array, which is also the persisted format. Deserialization
/// rejects duplicate products and amounts below one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, validating the cart invariants.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount < 1 {
                return Err(CommerceError::InvalidAmount {
                    product_id: item.id,
                    amount: item.amount,
                });
            }
            if !seen.insert(item.id) {
                return Err(CommerceError::DuplicateLineItem(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get number of line items (distinct products).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total unit count (sum of amounts), saturating at `i64::MAX`.
    pub fn total_units(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.amount))
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Check whether the product has a line item.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Current amount for a product, if present.
    pub fn amount_of(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(|i| i.amount)
    }

    /// Append a new line item for `product` with amount 1.
    pub fn push_product(&mut self, product: Product) -> Result<(), CommerceError> {
        if self.contains(product.id) {
            return Err(CommerceError::DuplicateLineItem(product.id));
        }
        self.items.push(LineItem::from_product(product, 1));
        Ok(())
    }

    /// Increase a product's amount by one.
    ///
    /// Returns false when the product is not in the cart.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        match self.items.iter_mut().find(|i| i.id == product_id) {
            Some(item) => {
                item.amount = item.amount.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Set a product's amount to exactly `amount`.
    ///
    /// Unknown products are left alone and reported with `Ok(false)`.
    pub fn set_amount(&mut self, product_id: ProductId, amount: i64) -> Result<bool, CommerceError> {
        if amount < 1 {
            return Err(CommerceError::InvalidAmount { product_id, amount });
        }
        match self.items.iter_mut().find(|i| i.id == product_id) {
            Some(item) => {
                item.amount = amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a product's line item, preserving the order of the rest.
    pub fn remove(&mut self, product_id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Compute counts and totals.
    ///
    /// Items without a `price` attribute count toward units but not the total.
    pub fn summarize(&self, currency: Currency) -> Result<CartSummary, CommerceError> {
        let mut lines = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let unit_price = item.price(currency)?;
            let subtotal = unit_price
                .map(|p| p.try_multiply(item.amount).ok_or(CommerceError::Overflow))
                .transpose()?;
            lines.push(LineSummary {
                product_id: item.id,
                amount: item.amount,
                unit_price,
                subtotal,
            });
        }

        let total = Money::try_sum(lines.iter().filter_map(|l| l.subtotal.as_ref()), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartSummary {
            distinct_items: self.items.len(),
            total_units: self.total_units(),
            total,
            lines,
        })
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CommerceError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product this line is for.
    pub id: ProductId,
    /// Units of the product, at least one.
    pub amount: i64,
    /// Catalog attributes copied when the product was added.
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl LineItem {
    /// Create a line item from a catalog product.
    ///
    /// A catalog `amount` attribute would collide with the line amount on the
    /// wire, so it is dropped.
    pub fn from_product(product: Product, amount: i64) -> Self {
        let mut attributes = product.attributes;
        attributes.remove("amount");
        Self {
            id: product.id,
            amount,
            attributes,
        }
    }

    /// Product title, if present.
    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(|v| v.as_str())
    }

    /// Unit price read from the `price` attribute.
    pub fn price(&self, currency: Currency) -> Result<Option<Money>, CommerceError> {
        price_attribute(self.id, &self.attributes, currency)
    }
}
