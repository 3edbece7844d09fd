//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! rosegold cart show
//! rosegold cart add 1 --size 6
//! rosegold cart set 1 3
//! rosegold cart remove 1
//! rosegold cart clear
//! ```

use clap::Subcommand;
use rosegold_core::ProductId;
use rosegold_storefront::{CartStore, Storefront};

use super::CommandResult;

#[derive(Subcommand)]
pub enum CartAction {
    /// List cart lines and the running total
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Product id
        id: String,

        /// Ring size
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity
    Set {
        /// Product id
        id: String,

        /// New quantity (must be positive)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

/// Run a cart subcommand.
///
/// # Errors
///
/// Returns an error for unknown products or non-positive quantities.
pub fn run(storefront: &mut Storefront, action: CartAction) -> CommandResult {
    match action {
        CartAction::Show => {}
        CartAction::Add { id, size } => {
            storefront.add_product_to_cart(&ProductId::new(id), size)?;
        }
        CartAction::Remove { id } => {
            let id = ProductId::new(id);
            if storefront.store().cart().get(&id).is_none() {
                return Err(format!("product {id} is not in the cart").into());
            }
            storefront.remove_from_cart(&id);
        }
        CartAction::Set { id, quantity } => {
            let id = ProductId::new(id);
            if storefront.store().cart().get(&id).is_none() {
                return Err(format!("product {id} is not in the cart").into());
            }
            if !storefront.change_quantity(&id, quantity) {
                return Err(
                    format!("quantity must be positive (use `cart remove {id}` instead)").into(),
                );
            }
        }
        CartAction::Clear => storefront.clear_cart(),
    }

    print_cart(storefront.store().cart());
    Ok(())
}

/// Print cart lines followed by the total.
pub fn print_cart(cart: &CartStore) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.items() {
        let size = line
            .size
            .as_deref()
            .map(|s| format!(" (size {s})"))
            .unwrap_or_default();
        println!(
            "{:>4}  {}{size}  {} x {} = {}",
            line.id.as_str(),
            line.name,
            line.quantity,
            line.price,
            line.line_total()
        );
    }
    println!("Total: {}", cart.total());
}
