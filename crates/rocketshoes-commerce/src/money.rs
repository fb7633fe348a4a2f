//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so cart totals do not drift the
//! way summed catalog floats do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Separators used when displaying amounts: `(decimal, grouping)`.
    fn separators(&self) -> (char, char) {
        match self {
            Currency::BRL | Currency::EUR => (',', '.'),
            Currency::USD => ('.', ','),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for BRL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, as the catalog serves prices.
    ///
    /// ```
    /// use rocketshoes_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(139.9, Currency::BRL);
    /// assert_eq!(price.amount_cents, 13990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Format for display (e.g., "R$ 1.299,90" or "$1,299.90").
    pub fn display(&self) -> String {
        let (decimal_sep, group_sep) = self.currency.separators();
        let divisor = 10_i64.pow(self.currency.decimal_places()).unsigned_abs();
        let abs = self.amount_cents.unsigned_abs();
        let whole = (abs / divisor).to_string();
        let fraction = abs % divisor;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }

        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let places = self.currency.decimal_places() as usize;
        let spacer = match self.currency {
            Currency::BRL => " ",
            _ => "",
        };
        format!(
            "{sign}{}{spacer}{grouped}{decimal_sep}{fraction:0places$}",
            self.currency.symbol()
        )
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum an iterator of Money values, returning `None` on overflow or mixed currencies.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(179.9, Currency::BRL);
        assert_eq!(m.amount_cents, 17990);

        let m = Money::from_decimal(0.1 + 0.2, Currency::BRL);
        assert_eq!(m.amount_cents, 30);
    }

    #[test]
    fn test_money_display_brl() {
        assert_eq!(Money::new(17990, Currency::BRL).display(), "R$ 179,90");
        assert_eq!(Money::new(129990, Currency::BRL).display(), "R$ 1.299,90");
        assert_eq!(Money::new(5, Currency::BRL).display(), "R$ 0,05");
    }

    #[test]
    fn test_money_display_usd() {
        assert_eq!(Money::new(123456789, Currency::USD).display(), "$1,234,567.89");
        assert_eq!(Money::new(-250, Currency::USD).display(), "-$2.50");
    }

    #[test]
    fn test_money_try_add_rejects_mixed_currency() {
        let brl = Money::new(1000, Currency::BRL);
        let usd = Money::new(1000, Currency::USD);
        assert!(brl.try_add(&usd).is_none());
        assert_eq!(brl.try_add(&brl).unwrap().amount_cents, 2000);
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::BRL);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(Money::new(1000, Currency::BRL).try_multiply(3).unwrap().amount_cents, 3000);
    }

    #[test]
    fn test_money_try_sum() {
        let values = [Money::new(100, Currency::BRL), Money::new(250, Currency::BRL)];
        let total = Money::try_sum(values.iter(), Currency::BRL).unwrap();
        assert_eq!(total.amount_cents, 350);
    }
}
