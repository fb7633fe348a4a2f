//! Stock records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available inventory for a product, as reported by the stock service.
///
/// Fetched on demand and never cached: a record is only meaningful for the
/// operation that requested it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockRecord {
    /// Product the record belongs to.
    pub product_id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl StockRecord {
    /// Create a new stock record.
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }

    /// Whether at least `amount` units are available.
    pub fn covers(&self, amount: i64) -> bool {
        self.amount >= amount
    }

    /// Whether strictly more than `amount` units are available.
    pub fn exceeds(&self, amount: i64) -> bool {
        self.amount > amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_covers_and_exceeds() {
        let stock = StockRecord::new(ProductId::new(1), 3);
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
        assert!(stock.exceeds(2));
        assert!(!stock.exceeds(3));
    }
}
