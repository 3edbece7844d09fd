//! Rosegold storefront state.
//!
//! Client-side store for a jewelry storefront: the cart and wishlist
//! (persisted across restarts), a queue of self-expiring toasts, UI flags,
//! and the catalog search behind the product pages.
//!
//! Start from [`Storefront`] for the full behaviour, or build a [`Store`]
//! directly when only the raw state is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod expiry;
pub mod persistence;
pub mod state;
pub mod toast;
pub mod ui;
pub mod wishlist;

pub use app::{HeaderBadges, Storefront};
pub use cart::{CartItem, CartStore, NewCartItem};
pub use catalog::{Catalog, ParseSortError, PriceRange, Product, SearchFilters, SearchSort};
pub use checkout::OrderSummary;
pub use config::{ParseStorageModeError, StorageMode, StorefrontConfig};
pub use error::{Result, StorefrontError};
pub use persistence::{FileStorage, MemoryStorage, Persistence, StorageBackend, StorageError};
pub use state::Store;
pub use toast::{NewToast, Toast, ToastQueue};
pub use ui::UiState;
pub use wishlist::{WishlistItem, WishlistStore};
