//! The store: every slice of client state in one explicitly owned value.
//!
//! There are no globals. Build one `Store` at startup, hand out references
//! to whatever renders it, and drop it at teardown. Tests build as many
//! independent stores as they like.

use crate::cart::CartStore;
use crate::persistence::Persistence;
use crate::toast::ToastQueue;
use crate::ui::UiState;
use crate::wishlist::WishlistStore;

/// Cart, wishlist, toast queue and UI flags.
///
/// Cart and wishlist share one [`Persistence`]; toasts and UI flags live
/// only as long as the store.
#[derive(Debug)]
pub struct Store {
    cart: CartStore,
    wishlist: WishlistStore,
    toasts: ToastQueue,
    ui: UiState,
}

impl Store {
    /// Create an unhydrated store.
    ///
    /// # Arguments
    ///
    /// * `persistence` - Durable storage for cart and wishlist
    /// * `toast_duration_ms` - Default lifetime for toasts without one
    #[must_use]
    pub fn new(persistence: Persistence, toast_duration_ms: u64) -> Self {
        Self {
            cart: CartStore::new(persistence.clone()),
            wishlist: WishlistStore::new(persistence),
            toasts: ToastQueue::new(toast_duration_ms),
            ui: UiState::new(),
        }
    }

    /// Hydrate cart and wishlist from durable storage.
    ///
    /// Call once at startup before showing anything derived from either
    /// collection. Later calls are no-ops.
    pub fn hydrate(&mut self) {
        self.cart.hydrate();
        self.wishlist.hydrate();
    }

    /// Whether both persisted slices have been hydrated.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.cart.is_hydrated() && self.wishlist.is_hydrated()
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub const fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    pub const fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }
}
