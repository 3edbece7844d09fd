//! Order summary shown beside the cart.

use rosegold_core::Price;
use rust_decimal::Decimal;

use crate::cart::CartStore;

/// Subtotal, shipping, tax and grand total for the current cart.
///
/// Shipping is always free. Tax and total are rounded to cents; the
/// subtotal is the cart's exact total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
    /// Distinct lines in the cart.
    pub line_count: usize,
    /// Sum of quantities.
    pub unit_count: i64,
}

impl OrderSummary {
    /// Summarise `cart` at the given tax rate.
    #[must_use]
    pub fn from_cart(cart: &CartStore, tax_rate: Decimal) -> Self {
        let subtotal = cart.total();
        let shipping = Price::ZERO;
        let tax = subtotal.scaled(tax_rate).round_to_cents();
        Self {
            subtotal,
            shipping,
            tax,
            total: (subtotal + shipping + tax).round_to_cents(),
            line_count: cart.len(),
            unit_count: cart.unit_count(),
        }
    }

    /// Whether shipping costs nothing.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use rosegold_core::ProductId;

    use super::*;
    use crate::cart::NewCartItem;
    use crate::persistence::Persistence;

    fn item(id: &str, cents: i64) -> NewCartItem {
        NewCartItem {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Price::from_cents(cents),
            image: String::new(),
            size: None,
        }
    }

    #[test]
    fn test_empty_cart_summary() {
        let cart = CartStore::new(Persistence::unavailable());
        let summary = OrderSummary::from_cart(&cart, Decimal::new(8, 2));
        assert_eq!(summary.subtotal, Price::ZERO);
        assert_eq!(summary.tax, Price::ZERO);
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.line_count, 0);
        assert!(summary.free_shipping());
    }

    #[test]
    fn test_tax_at_eight_percent() {
        let mut cart = CartStore::new(Persistence::unavailable());
        cart.add_to_cart(item("1", 250_000));
        cart.add_to_cart(item("2", 72_500));
        cart.add_to_cart(item("2", 72_500));

        let summary = OrderSummary::from_cart(&cart, Decimal::new(8, 2));
        assert_eq!(summary.subtotal, Price::from_dollars(3950));
        assert_eq!(summary.tax, Price::from_dollars(316));
        assert_eq!(summary.total, Price::from_dollars(4266));
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.unit_count, 3);
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        let mut cart = CartStore::new(Persistence::unavailable());
        cart.add_to_cart(item("1", 1999));

        let summary = OrderSummary::from_cart(&cart, Decimal::new(8, 2));
        assert_eq!(summary.tax, Price::from_cents(160));
        assert_eq!(summary.total, Price::from_cents(2159));
        assert_eq!(summary.total.to_string(), "$21.59");
    }
}
