//! Wishlist commands.

use clap::Subcommand;
use rosegold_core::ProductId;
use rosegold_storefront::{Storefront, WishlistStore};

use super::CommandResult;

#[derive(Subcommand)]
pub enum WishlistAction {
    /// List saved items
    Show,
    /// Save a product, or unsave it if already saved
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove a saved item
    Remove {
        /// Product id
        id: String,
    },
    /// Move one saved item into the cart
    Move {
        /// Product id
        id: String,
    },
    /// Move every saved item into the cart
    MoveAll,
    /// Remove every saved item
    Clear,
}

/// Run a wishlist subcommand.
///
/// # Errors
///
/// Returns an error for unknown or unsaved products.
pub fn run(storefront: &mut Storefront, action: WishlistAction) -> CommandResult {
    match action {
        WishlistAction::Show => {}
        WishlistAction::Toggle { id } => {
            storefront.toggle_product_in_wishlist(&ProductId::new(id))?;
        }
        WishlistAction::Remove { id } => storefront.remove_from_wishlist(&ProductId::new(id))?,
        WishlistAction::Move { id } => storefront.move_to_cart(&ProductId::new(id))?,
        WishlistAction::MoveAll => {
            if storefront.move_all_to_cart() == 0 {
                println!("Nothing to move.");
            }
        }
        WishlistAction::Clear => storefront.clear_wishlist(),
    }

    print_wishlist(storefront.store().wishlist());
    Ok(())
}

fn print_wishlist(wishlist: &WishlistStore) {
    if wishlist.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    for item in wishlist.items() {
        println!("{:>4}  {}  {}", item.id.as_str(), item.name, item.price);
    }
    println!("{} saved", wishlist.len());
}
