//! Store configuration.

use rocketshoes_commerce::{Currency, StockRecord};
use serde::{Deserialize, Serialize};

/// Slot key the storefront has always persisted the cart under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// How `add_product` compares stock with the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddStockRule {
    /// Stock must be strictly greater than the current amount (1 when the
    /// product is not yet in the cart). A product with a single unit in
    /// stock can never be added under this rule.
    #[default]
    Strict,
    /// Stock must cover the amount the line will have after the add.
    AtLeastNextAmount,
}

impl AddStockRule {
    /// Whether adding one more unit is allowed.
    pub fn allows(&self, current: Option<i64>, stock: &StockRecord) -> bool {
        match self {
            Self::Strict => stock.exceeds(current.unwrap_or(1)),
            Self::AtLeastNextAmount => current
                .map_or(Some(1), |a| a.checked_add(1))
                .is_some_and(|next| stock.covers(next)),
        }
    }
}

/// Cart store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Persistence slot key.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Stock rule applied by `add_product`.
    #[serde(default)]
    pub add_stock_rule: AddStockRule,

    /// Currency prices are read in.
    #[serde(default)]
    pub currency: Currency,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            add_stock_rule: AddStockRule::default(),
            currency: Currency::default(),
        }
    }
}

impl StoreConfig {
    /// Set the persistence slot key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the add rule.
    pub fn with_add_stock_rule(mut self, rule: AddStockRule) -> Self {
        self.add_stock_rule = rule;
        self
    }

    /// Set the currency prices are read in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_commerce::ProductId;

    fn stock(amount: i64) -> StockRecord {
        StockRecord::new(ProductId::new(1), amount)
    }

    #[test]
    fn test_strict_rule_needs_headroom_for_new_items() {
        let rule = AddStockRule::Strict;
        assert!(!rule.allows(None, &stock(1)));
        assert!(rule.allows(None, &stock(2)));
    }

    #[test]
    fn test_strict_rule_for_existing_items() {
        let rule = AddStockRule::Strict;
        assert!(rule.allows(Some(1), &stock(2)));
        assert!(!rule.allows(Some(2), &stock(2)));
    }

    #[test]
    fn test_at_least_next_amount_rule() {
        let rule = AddStockRule::AtLeastNextAmount;
        assert!(rule.allows(None, &stock(1)));
        assert!(!rule.allows(None, &stock(0)));
        assert!(rule.allows(Some(2), &stock(3)));
        assert!(!rule.allows(Some(3), &stock(3)));
    }

    #[test]
    fn test_rules_at_amount_limit() {
        let unlimited = stock(i64::MAX);
        assert!(!AddStockRule::AtLeastNextAmount.allows(Some(i64::MAX), &unlimited));
        assert!(!AddStockRule::Strict.allows(Some(i64::MAX), &unlimited));
        assert!(AddStockRule::AtLeastNextAmount.allows(Some(i64::MAX - 1), &unlimited));
    }

    #[test]
    fn test_config_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert_eq!(config.add_stock_rule, AddStockRule::Strict);
    }

    #[test]
    fn test_rule_names() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"add_stock_rule":"at_least_next_amount"}"#).unwrap();
        assert_eq!(config.add_stock_rule, AddStockRule::AtLeastNextAmount);
    }
}
