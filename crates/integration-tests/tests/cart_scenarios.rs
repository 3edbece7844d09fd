//! Cart and wishlist behaviour through the store API.

#![allow(clippy::unwrap_used)]

use rosegold_core::{Price, ProductId};
use rosegold_integration_tests::{TestContext, cart_item, wishlist_item};

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_adding_same_product_merges_lines() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();
    let cart = storefront.cart_mut();

    cart.add_to_cart(cart_item("1", "Ring", 100));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
    assert_eq!(cart.total(), Price::from_dollars(100));

    cart.add_to_cart(cart_item("1", "Ring", 100));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total(), Price::from_dollars(200));
}

#[test]
fn test_zero_quantity_is_kept_on_the_raw_cart() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();
    let cart = storefront.cart_mut();

    cart.add_to_cart(cart_item("1", "Ring", 100));
    cart.add_to_cart(cart_item("1", "Ring", 100));
    cart.update_quantity(&ProductId::new("1"), 0);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 0);
    assert_eq!(cart.total(), Price::ZERO);
}

#[tokio::test]
async fn test_storefront_refuses_zero_quantity() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();
    storefront.add_to_cart(cart_item("1", "Ring", 100));

    assert!(!storefront.change_quantity(&ProductId::new("1"), 0));
    assert_eq!(storefront.store().cart().items()[0].quantity, 1);
    storefront.shutdown();
}

#[test]
fn test_removing_absent_line_is_a_no_op() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();

    storefront.remove_from_cart(&ProductId::new("1"));
    assert!(storefront.store().cart().is_empty());
    assert_eq!(storefront.store().cart().total(), Price::ZERO);
}

#[test]
fn test_total_tracks_every_mutation() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();
    let cart = storefront.cart_mut();

    cart.add_to_cart(cart_item("1", "Ring", 2500));
    cart.add_to_cart(cart_item("2", "Necklace", 725));
    cart.update_quantity(&ProductId::new("2"), 4);
    assert_eq!(cart.total(), Price::from_dollars(5400));

    cart.remove_from_cart(&ProductId::new("1"));
    assert_eq!(cart.total(), Price::from_dollars(2900));

    cart.clear_cart();
    assert_eq!(cart.total(), Price::ZERO);
}

// =============================================================================
// Wishlist
// =============================================================================

#[test]
fn test_wishlist_ignores_duplicates() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();
    let wishlist = storefront.wishlist_mut();

    assert!(wishlist.add_to_wishlist(wishlist_item("2", "Pearl Necklace", 725)));
    assert!(!wishlist.add_to_wishlist(wishlist_item("2", "Pearl Necklace", 725)));

    let ids: Vec<&str> = wishlist.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["2"]);
}

#[tokio::test]
async fn test_wishlist_to_cart_flow() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();

    storefront.toggle_wishlist(wishlist_item("1", "Ring", 2500));
    storefront.toggle_wishlist(wishlist_item("2", "Necklace", 725));
    storefront.move_to_cart(&ProductId::new("1")).unwrap();

    assert_eq!(storefront.store().wishlist().len(), 1);
    assert_eq!(storefront.store().cart().total(), Price::from_dollars(2500));

    assert_eq!(storefront.move_all_to_cart(), 1);
    let badges = storefront.header_badges().unwrap();
    assert_eq!(badges.cart.as_deref(), Some("2"));
    assert_eq!(badges.wishlist, None);

    let summary = storefront.order_summary();
    assert_eq!(summary.subtotal, Price::from_dollars(3225));
    assert_eq!(summary.tax, Price::from_dollars(258));
    assert_eq!(summary.total, Price::from_dollars(3483));
    storefront.shutdown();
}

#[tokio::test]
async fn test_cart_badge_caps_at_nine() {
    let ctx = TestContext::new();
    let mut storefront = ctx.hydrated();

    for n in 1..=10 {
        storefront.add_to_cart(cart_item(&n.to_string(), "Charm", 10));
    }
    assert_eq!(storefront.header_badges().unwrap().cart.as_deref(), Some("9+"));
    storefront.shutdown();
}
