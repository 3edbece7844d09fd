//! Catalog search.
//!
//! # Usage
//!
//! ```bash
//! rosegold search necklace
//! rosegold search --category Bracelets --price 500-1000 --sort price-high
//! rosegold suggest ear
//! ```

use clap::Args;
use rosegold_storefront::{PriceRange, SearchFilters, SearchSort, Storefront};

use super::CommandResult;

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query matched against name, category, shape and metal
    #[arg(default_value = "")]
    query: String,

    /// Exact category (e.g. Rings, Necklaces)
    #[arg(long)]
    category: Option<String>,

    /// Exact stone shape (e.g. Round, Oval)
    #[arg(long)]
    shape: Option<String>,

    /// Exact metal (e.g. Gold, Silver)
    #[arg(long)]
    metal: Option<String>,

    /// Inclusive price range as MIN-MAX
    #[arg(long)]
    price: Option<PriceRange>,

    /// relevance, price-low, price-high or name
    #[arg(long, default_value = "relevance")]
    sort: SearchSort,
}

/// Run a search and print matching products.
///
/// # Errors
///
/// Never fails once arguments have parsed; the signature matches the other
/// commands.
#[allow(clippy::unnecessary_wraps)]
pub fn run(storefront: &Storefront, args: &SearchArgs) -> CommandResult {
    let filters = SearchFilters {
        category: args.category.clone(),
        shape: args.shape.clone(),
        metal: args.metal.clone(),
        price_range: args.price,
    };
    let results = storefront.catalog().search(&args.query, &filters, args.sort);

    if results.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    let wishlist = storefront.store().wishlist();
    for product in &results {
        let saved = if wishlist.contains(&product.id) { " *" } else { "" };
        println!(
            "{:>4}  {:<26} {:>10}  {} / {} / {}{saved}",
            product.id.as_str(),
            product.name,
            product.price.to_string(),
            product.category,
            product.shape,
            product.metal
        );
    }
    println!("{} result(s)", results.len());
    Ok(())
}

/// Print typeahead suggestions, one per line.
pub fn suggest(storefront: &Storefront, query: &str) {
    for phrase in storefront.catalog().suggestions(query) {
        println!("{phrase}");
    }
}
