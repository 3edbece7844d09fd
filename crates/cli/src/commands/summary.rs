//! Order summary.

use rosegold_storefront::Storefront;

use super::cart::print_cart;

/// Print the cart followed by subtotal, shipping, tax and total.
pub fn run(storefront: &Storefront) {
    print_cart(storefront.store().cart());

    let summary = storefront.order_summary();
    let tax_percent = storefront.config().tax_rate * rust_decimal::Decimal::ONE_HUNDRED;
    println!();
    println!("Subtotal ({} items): {}", summary.unit_count, summary.subtotal);
    if summary.free_shipping() {
        println!("Shipping: Free");
    } else {
        println!("Shipping: {}", summary.shipping);
    }
    println!("Tax ({}%): {}", tax_percent.normalize(), summary.tax);
    println!("Total: {}", summary.total);
}
