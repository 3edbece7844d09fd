//! Rosegold Core - Shared types library.
//!
//! This crate provides common types used across all Rosegold components:
//! - `storefront` - Cart, wishlist, toast and UI state for the shop front
//! - `cli` - Command-line access to the persisted cart and wishlist
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and toast kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
