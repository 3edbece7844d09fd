//! The storefront as its views see it.
//!
//! [`Storefront`] wraps the [`Store`] with the pieces a rendering layer
//! needs around it: the catalog, the toast expiry scheduler, and the
//! compound actions behind each button (add to cart and say so, move a
//! wishlist entry into the cart, and so on).

use std::sync::Arc;

use rosegold_core::{ProductId, ToastId};
use tracing::instrument;

use crate::cart::NewCartItem;
use crate::catalog::Catalog;
use crate::checkout::OrderSummary;
use crate::config::{StorageMode, StorefrontConfig};
use crate::error::{Result, StorefrontError};
use crate::expiry::{self, ExpiredToasts, ToastExpiry};
use crate::persistence::{
    FileStorage, MemoryStorage, Persistence, StorageBackend, UnavailableStorage,
};
use crate::state::Store;
use crate::toast::NewToast;
use crate::wishlist::WishlistItem;

/// Counts rendered next to the header icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBadges {
    /// Cart badge, `None` when the cart is empty.
    pub cart: Option<String>,
    /// Wishlist badge, `None` when the wishlist is empty.
    pub wishlist: Option<String>,
}

/// Badge text for a count: nothing for zero, `9+` past nine.
#[must_use]
pub fn badge_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

/// Build the durable backend selected by `config`.
#[must_use]
pub fn storage_backend(config: &StorefrontConfig) -> Arc<dyn StorageBackend> {
    match config.storage {
        StorageMode::File => Arc::new(FileStorage::new(&config.data_dir)),
        StorageMode::Memory => Arc::new(MemoryStorage::new()),
        StorageMode::Disabled => Arc::new(UnavailableStorage),
    }
}

/// Store, catalog and toast timers for one running storefront.
///
/// Anything that queues a toast also schedules its expiry, so those
/// methods must run inside a Tokio runtime.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    store: Store,
    catalog: Catalog,
    expiry: ToastExpiry,
    expired: ExpiredToasts,
}

impl Storefront {
    /// Create a storefront using the backend named in `config`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let backend = storage_backend(&config);
        Self::with_backend(config, backend)
    }

    /// Create a storefront over an explicit backend.
    #[must_use]
    pub fn with_backend(config: StorefrontConfig, backend: Arc<dyn StorageBackend>) -> Self {
        let store = Store::new(Persistence::new(backend), config.toast_duration_ms);
        let (expiry, expired) = expiry::channel();
        Self {
            config,
            store,
            catalog: Catalog::mock(),
            expiry,
            expired,
        }
    }

    /// Replace the built-in catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Hydrate cart and wishlist. Call once at startup.
    #[instrument(skip(self))]
    pub fn hydrate(&mut self) {
        self.store.hydrate();
        tracing::info!(
            cart_lines = self.store.cart().len(),
            wishlist_items = self.store.wishlist().len(),
            "Storefront hydrated"
        );
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Direct access to the cart for operations without side effects.
    pub const fn cart_mut(&mut self) -> &mut crate::cart::CartStore {
        self.store.cart_mut()
    }

    /// Direct access to the wishlist for operations without side effects.
    pub const fn wishlist_mut(&mut self) -> &mut crate::wishlist::WishlistStore {
        self.store.wishlist_mut()
    }

    /// Direct access to the UI flags.
    pub const fn ui_mut(&mut self) -> &mut crate::ui::UiState {
        self.store.ui_mut()
    }

    // =========================================================================
    // Toasts
    // =========================================================================

    /// Queue a toast and start its expiry timer.
    pub fn notify(&mut self, toast: NewToast) -> ToastId {
        let id = self.store.toasts_mut().add_toast(toast);
        if let Some(toast) = self.store.toasts().get(&id) {
            self.expiry.schedule(id.clone(), toast.duration());
        }
        id
    }

    /// Dismiss a toast by hand, cancelling its timer.
    pub fn dismiss_toast(&mut self, id: &ToastId) {
        self.expiry.cancel(id);
        self.store.toasts_mut().remove_toast(id);
    }

    /// Drop every toast and every timer.
    pub fn clear_toasts(&mut self) {
        self.expiry.cancel_all();
        self.store.toasts_mut().clear_toasts();
    }

    /// Wait for the next toast to expire and remove it.
    ///
    /// Returns `None` once no timers are pending.
    pub async fn next_expired(&mut self) -> Option<ToastId> {
        let id = self.expired.next(&mut self.expiry).await?;
        self.store.toasts_mut().remove_toast(&id);
        tracing::trace!(toast_id = %id, "Toast expired");
        Some(id)
    }

    /// Remove every toast whose timer has already fired.
    pub fn drain_expired(&mut self) -> Vec<ToastId> {
        let expired = self.expired.drain(&mut self.expiry);
        for id in &expired {
            self.store.toasts_mut().remove_toast(id);
        }
        expired
    }

    /// Number of toasts still waiting to expire.
    #[must_use]
    pub fn pending_expiries(&self) -> usize {
        self.expiry.pending()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit to the cart and confirm with a toast.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add_to_cart(&mut self, item: NewCartItem) -> ToastId {
        let message = format!("{} has been added to your cart.", item.name);
        self.store.cart_mut().add_to_cart(item);
        self.notify(NewToast::success("Added to Cart").with_message(message))
    }

    /// Add a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProduct` if `id` is not in the catalog.
    pub fn add_product_to_cart(&mut self, id: &ProductId, size: Option<String>) -> Result<ToastId> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::UnknownProduct(id.clone()))?
            .to_cart_item(size);
        Ok(self.add_to_cart(item))
    }

    /// Set a line's quantity from the +/- controls.
    ///
    /// Non-positive quantities are ignored here rather than stored; use
    /// [`remove_from_cart`](Self::remove_from_cart) to drop a line. Returns
    /// whether the update was applied.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            tracing::debug!("Ignoring non-positive quantity");
            return false;
        }
        self.store.cart_mut().update_quantity(id, quantity);
        true
    }

    /// Remove a line from the cart.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.store.cart_mut().remove_from_cart(id);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.store.cart_mut().clear_cart();
    }

    /// Subtotal, tax and total at the configured tax rate.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_cart(self.store.cart(), self.config.tax_rate)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Save or unsave an item, confirm with a toast, and open the drawer.
    ///
    /// Returns whether the item is saved afterwards.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn toggle_wishlist(&mut self, item: WishlistItem) -> bool {
        let saved = if self.store.wishlist().contains(&item.id) {
            self.store.wishlist_mut().remove_from_wishlist(&item.id);
            self.notify(
                NewToast::success("Removed from Wishlist")
                    .with_message(format!("{} has been removed from your wishlist.", item.name)),
            );
            false
        } else {
            let message = format!("{} has been added to your wishlist.", item.name);
            self.store.wishlist_mut().add_to_wishlist(item);
            self.notify(NewToast::success("Added to Wishlist").with_message(message));
            true
        };
        self.store.ui_mut().open_wishlist_drawer();
        saved
    }

    /// Toggle a catalog product in the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProduct` if `id` is not in the catalog.
    pub fn toggle_product_in_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::UnknownProduct(id.clone()))?
            .to_wishlist_item();
        Ok(self.toggle_wishlist(item))
    }

    /// Remove a saved item and confirm with a toast.
    ///
    /// # Errors
    ///
    /// Returns `NotInWishlist` if `id` is not saved.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> Result<()> {
        let item = self.saved(id)?;
        self.store.wishlist_mut().remove_from_wishlist(id);
        self.notify(
            NewToast::success("Removed from Wishlist")
                .with_message(format!("{} has been removed from your wishlist.", item.name)),
        );
        Ok(())
    }

    /// Move one saved item into the cart.
    ///
    /// # Errors
    ///
    /// Returns `NotInWishlist` if `id` is not saved.
    #[instrument(skip(self))]
    pub fn move_to_cart(&mut self, id: &ProductId) -> Result<()> {
        let item = self.saved(id)?;
        let name = item.name.clone();
        self.store.cart_mut().add_to_cart(wishlist_to_cart(item));
        self.store.wishlist_mut().remove_from_wishlist(id);
        self.notify(
            NewToast::success("Moved to Cart")
                .with_message(format!("{name} has been moved to your cart.")),
        );
        Ok(())
    }

    /// Move every saved item into the cart and empty the wishlist.
    ///
    /// Returns how many items moved. Nothing happens, and no toast is
    /// raised, when the wishlist is already empty.
    #[instrument(skip(self))]
    pub fn move_all_to_cart(&mut self) -> usize {
        let items = self.store.wishlist().items().to_vec();
        if items.is_empty() {
            return 0;
        }
        let count = items.len();
        for item in items {
            self.store.cart_mut().add_to_cart(wishlist_to_cart(item));
        }
        self.store.wishlist_mut().clear_wishlist();
        self.notify(
            NewToast::success("All Items Moved to Cart")
                .with_message(format!("{count} items have been moved to your cart.")),
        );
        count
    }

    /// Empty the wishlist and confirm with a toast.
    pub fn clear_wishlist(&mut self) {
        self.store.wishlist_mut().clear_wishlist();
        self.notify(
            NewToast::success("Wishlist Cleared")
                .with_message("All items have been removed from your wishlist."),
        );
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Header badge labels, or `None` until both collections are hydrated.
    ///
    /// Withholding the counts until then keeps the first render identical
    /// whether or not anything was persisted.
    #[must_use]
    pub fn header_badges(&self) -> Option<HeaderBadges> {
        if !self.store.is_hydrated() {
            return None;
        }
        Some(HeaderBadges {
            cart: badge_label(self.store.cart().len()),
            wishlist: badge_label(self.store.wishlist().len()),
        })
    }

    /// Cancel every outstanding toast timer. Call at teardown.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) {
        let pending = self.expiry.pending();
        self.expiry.cancel_all();
        tracing::debug!(pending, "Toast timers cancelled");
    }

    fn saved(&self, id: &ProductId) -> Result<WishlistItem> {
        self.store
            .wishlist()
            .get(id)
            .cloned()
            .ok_or_else(|| StorefrontError::NotInWishlist(id.clone()))
    }
}

fn wishlist_to_cart(item: WishlistItem) -> NewCartItem {
    NewCartItem {
        id: item.id,
        name: item.name,
        price: item.price,
        image: item.image,
        size: None,
    }
}
