//! Unified error handling for storefront operations.
//!
//! Store mutations themselves never fail: missing ids are no-ops and
//! persistence failures are logged and swallowed. `StorefrontError` covers
//! the remaining fallible edges, i.e. configuration and resolving user
//! input against the catalog.

use rosegold_core::ProductId;
use thiserror::Error;

use crate::catalog::PriceRangeError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The product id is not in the wishlist.
    #[error("Not in wishlist: {0}")]
    NotInWishlist(ProductId),

    /// A price range filter could not be parsed.
    #[error("Invalid price range: {0}")]
    PriceRange(#[from] PriceRangeError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
