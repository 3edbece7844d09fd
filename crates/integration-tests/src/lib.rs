//! Integration tests for the Rosegold storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rosegold-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart and wishlist behaviour through the public store API
//! - `persistence_reload` - State surviving a restart over file-backed storage
//! - `toast_expiry` - Toasts expiring on their own through the storefront

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rosegold_core::{Price, ProductId};
use rosegold_storefront::{
    FileStorage, NewCartItem, StorageMode, Storefront, StorefrontConfig, WishlistItem,
};
use tempfile::TempDir;

/// A scratch data directory that outlives any number of storefronts.
///
/// Building a second storefront over the same context models a restart:
/// whatever the first one persisted is what the second one hydrates.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file persisting `key`.
    #[must_use]
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Configuration pointing file storage at this context.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            storage: StorageMode::File,
            data_dir: self.dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        }
    }

    /// A storefront over this context's files, not yet hydrated.
    #[must_use]
    pub fn storefront(&self) -> Storefront {
        Storefront::with_backend(self.config(), Arc::new(FileStorage::new(self.dir.path())))
    }

    /// A storefront over this context's files, hydrated.
    #[must_use]
    pub fn hydrated(&self) -> Storefront {
        let mut storefront = self.storefront();
        storefront.hydrate();
        storefront
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A cart payload priced in whole dollars.
#[must_use]
pub fn cart_item(id: &str, name: &str, dollars: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_dollars(dollars),
        image: format!("{id}.jpg"),
        size: None,
    }
}

/// A wishlist entry priced in whole dollars.
#[must_use]
pub fn wishlist_item(id: &str, name: &str, dollars: i64) -> WishlistItem {
    WishlistItem {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_dollars(dollars),
        image: format!("{id}.jpg"),
    }
}
