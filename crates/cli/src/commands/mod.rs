//! Subcommand implementations.
//!
//! Each command works against a hydrated [`Storefront`] and prints what
//! changed. Toasts raised along the way are printed once the command
//! finishes.

use rosegold_storefront::Storefront;

pub mod cart;
pub mod search;
pub mod summary;
pub mod wishlist;

/// Result type shared by the subcommands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Print every queued toast as `[kind] title: message`.
pub fn print_toasts(storefront: &Storefront) {
    for toast in storefront.store().toasts().toasts() {
        match &toast.message {
            Some(message) => println!("[{}] {}: {message}", toast.kind, toast.title),
            None => println!("[{}] {}", toast.kind, toast.title),
        }
    }
}
