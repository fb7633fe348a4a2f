//! Cart summaries for display.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Counts and totals derived from a cart.
///
/// ```
/// use rocketshoes_commerce::{Cart, CartSummary, Currency, LineSummary};
///
/// let summary: CartSummary = Cart::new().summarize(Currency::BRL).unwrap();
/// let lines: &[LineSummary] = &summary.lines;
/// assert!(lines.is_empty());
/// assert!(summary.total.amount_cents == 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Number of line items (the header badge count).
    pub distinct_items: usize,
    /// Sum of all amounts.
    pub total_units: i64,
    /// Sum of priced line subtotals.
    pub total: Money,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineSummary>,
}

impl CartSummary {
    /// Whether every line had a price.
    pub fn fully_priced(&self) -> bool {
        self.lines.iter().all(|l| l.subtotal.is_some())
    }
}

/// Breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    /// Product ID.
    pub product_id: ProductId,
    /// Units in the cart.
    pub amount: i64,
    /// Unit price, when the product carries one.
    pub unit_price: Option<Money>,
    /// unit_price * amount.
    pub subtotal: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_fully_priced() {
        let mut summary = CartSummary {
            distinct_items: 1,
            total_units: 2,
            total: Money::new(2000, Currency::BRL),
            lines: vec![LineSummary {
                product_id: ProductId::new(1),
                amount: 2,
                unit_price: Some(Money::new(1000, Currency::BRL)),
                subtotal: Some(Money::new(2000, Currency::BRL)),
            }],
        };
        assert!(summary.fully_priced());

        summary.lines[0].subtotal = None;
        assert!(!summary.fully_priced());
    }
}
