//! Product types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Free-form product attributes, kept in catalog order.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A product in the catalog.
///
/// Only `id` is interpreted; every other field the catalog returns (title,
/// price, image, ...) is carried through untouched so it can be copied onto
/// line items and rendered by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Remaining catalog fields.
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Product {
    /// Create a product with no attributes.
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            attributes: Attributes::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    /// Product title, if the catalog provides one.
    pub fn title(&self) -> Option<&str> {
        self.attribute("title").and_then(|v| v.as_str())
    }

    /// Unit price read from the `price` attribute.
    ///
    /// Returns `Ok(None)` when the product has no price and an error when
    /// the attribute is present but not a number.
    pub fn price(&self, currency: Currency) -> Result<Option<Money>, CommerceError> {
        price_attribute(self.id, &self.attributes, currency)
    }
}

/// Read a `price` attribute as money.
pub(crate) fn price_attribute(
    id: ProductId,
    attributes: &Attributes,
    currency: Currency,
) -> Result<Option<Money>, CommerceError> {
    match attributes.get("price") {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(|p| Some(Money::from_decimal(p, currency)))
            .ok_or_else(|| CommerceError::InvalidAttribute {
                product_id: id,
                name: "price".to_string(),
            }),
    }
}
