//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so cart totals stay exact, but travel
//! as plain JSON numbers so persisted carts keep the `price: number` shape
//! the storefront has always written.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency's standard unit (dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Quantity is signed: a cart line can legitimately hold zero or a
    /// negative count, and its contribution to the total follows suit.
    /// Saturates at the representable bounds instead of overflowing.
    #[must_use]
    pub fn line_total(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Like [`line_total`](Self::line_total), but `None` on overflow.
    #[must_use]
    pub fn checked_line_total(self, quantity: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Sum of two prices, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// This price multiplied by a rate (e.g. a tax rate of `0.08`).
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }

    /// Round half-away-from-zero to whole cents.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at the representable bounds.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_dollars(2500).to_string(), "$2500.00");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
    }

    #[test]
    fn test_from_cents_negative() {
        assert_eq!(Price::from_cents(-250), Price::new(Decimal::new(-250, 2)));
    }

    #[test]
    fn test_line_total_follows_quantity_sign() {
        let price = Price::from_dollars(100);
        assert_eq!(price.line_total(3), Price::from_dollars(300));
        assert_eq!(price.line_total(0), Price::ZERO);
        assert_eq!(price.line_total(-1), Price::from_dollars(-100));
    }

    #[test]
    fn test_line_total_saturates_instead_of_panicking() {
        let price = Price::from_dollars(1_000_000_000_000_000);
        let quantity = 100_000_000_000_000;

        assert_eq!(price.checked_line_total(quantity), None);
        assert_eq!(price.line_total(quantity), Price::new(Decimal::MAX));
        assert_eq!(price.line_total(-quantity), Price::new(Decimal::MIN));
        assert_eq!(price.checked_line_total(2), Some(Price::from_dollars(2_000_000_000_000_000)));
    }

    #[test]
    fn test_add_saturates() {
        let max = Price::new(Decimal::MAX);
        assert_eq!(max + Price::from_dollars(1), max);
        assert_eq!(max.checked_add(Price::from_dollars(1)), None);
        assert_eq!(
            Price::from_cents(50).checked_add(Price::from_cents(25)),
            Some(Price::from_cents(75))
        );
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_dollars(1), Price::from_cents(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(150));
    }

    #[test]
    fn test_scaled_and_rounded() {
        let tax = Price::from_cents(1999).scaled(Decimal::new(8, 2));
        assert_eq!(tax.round_to_cents(), Price::from_cents(160));
    }

    #[test]
    fn test_json_is_a_number() {
        let json = serde_json::to_value(Price::from_dollars(725)).unwrap();
        assert!(json.is_number());

        let parsed: Price = serde_json::from_str("725").unwrap();
        assert_eq!(parsed, Price::from_dollars(725));

        let parsed: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed, Price::from_cents(1250));
    }
}
