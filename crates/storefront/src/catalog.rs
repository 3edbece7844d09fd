//! Product catalog and search.
//!
//! The storefront ships with a fixed six-piece catalog; there is no
//! product service behind it. Search is a linear pass: a case-insensitive
//! substring match over name, category, shape and metal, then exact-match
//! facet filters, then an optional sort.

use std::str::FromStr;

use rosegold_core::{Price, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::NewCartItem;
use crate::wishlist::WishlistItem;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category: String,
    pub shape: String,
    pub metal: String,
}

impl Product {
    fn matches_query(&self, needle: &str) -> bool {
        [&self.name, &self.category, &self.shape, &self.metal]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// The cart payload for one unit of this product.
    #[must_use]
    pub fn to_cart_item(&self, size: Option<String>) -> NewCartItem {
        NewCartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            size,
        }
    }

    /// The wishlist entry for this product.
    #[must_use]
    pub fn to_wishlist_item(&self) -> WishlistItem {
        WishlistItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// Errors parsing a [`PriceRange`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceRangeError {
    #[error("expected MIN-MAX, got {0:?}")]
    Format(String),
    #[error("invalid amount {0:?}")]
    Amount(String),
    #[error("minimum {min} exceeds maximum {max}")]
    Inverted { min: Decimal, max: Decimal },
}

/// Inclusive price bounds, written `min-max` (e.g. `500-1000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// Whether `price` lies within the bounds.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| PriceRangeError::Format(s.to_string()))?;
        let parse = |raw: &str| {
            Decimal::from_str(raw.trim()).map_err(|_| PriceRangeError::Amount(raw.to_string()))
        };
        let (min, max) = (parse(min)?, parse(max)?);
        if min > max {
            return Err(PriceRangeError::Inverted { min, max });
        }
        Ok(Self {
            min: Price::new(min),
            max: Price::new(max),
        })
    }
}

/// Facet filters; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub shape: Option<String>,
    pub metal: Option<String>,
    pub price_range: Option<PriceRange>,
}

impl SearchFilters {
    fn accepts(&self, product: &Product) -> bool {
        let facet = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().is_none_or(|wanted| wanted == actual)
        };
        facet(&self.category, &product.category)
            && facet(&self.shape, &product.shape)
            && facet(&self.metal, &product.metal)
            && self
                .price_range
                .is_none_or(|range| range.contains(product.price))
    }
}

/// An unrecognised sort option.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid sort {0:?} (expected relevance, price-low, price-high or name)")]
pub struct ParseSortError(String);

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSort {
    /// Catalog order.
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Name,
}

impl SearchSort {
    /// The option value used on the search page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        }
    }
}

impl FromStr for SearchSort {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "relevance" => Ok(Self::Relevance),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name" => Ok(Self::Name),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

/// Phrases offered while the shopper types in the search box.
pub const SEARCH_SUGGESTIONS: [&str; 12] = [
    "Diamond Rings",
    "Gold Necklace",
    "Pearl Earrings",
    "Silver Bracelet",
    "Engagement Ring",
    "Wedding Band",
    "Tennis Bracelet",
    "Statement Necklace",
    "Stud Earrings",
    "Chain Bracelet",
    "Pendant Necklace",
    "Hoop Earrings",
];

/// Most suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 5;

/// The product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from arbitrary products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in catalog.
    #[must_use]
    pub fn mock() -> Self {
        const ENTRIES: [(&str, &str, i64, &str, &str, &str); 6] = [
            ("1", "Diamond Engagement Ring", 2500, "Rings", "Round", "Gold"),
            ("2", "Pearl Necklace", 725, "Necklaces", "Round", "Silver"),
            ("3", "Gold Bracelet", 850, "Bracelets", "Oval", "Gold"),
            ("4", "Silver Earrings", 425, "Earrings", "Heart", "Silver"),
            ("5", "Tennis Bracelet", 1200, "Bracelets", "Round", "Gold"),
            ("6", "Statement Necklace", 950, "Necklaces", "Princess", "Gold"),
        ];

        Self::new(
            ENTRIES
                .iter()
                .map(|&(id, name, price, category, shape, metal)| Product {
                    id: ProductId::new(id),
                    name: name.to_string(),
                    price: Price::from_dollars(price),
                    image: format!("/newarrival/pearls{id}.jpg"),
                    category: category.to_string(),
                    shape: shape.to_string(),
                    metal: metal.to_string(),
                })
                .collect(),
        )
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Query, filter and sort the catalog.
    ///
    /// An empty query matches everything. The query is used as typed;
    /// surrounding whitespace is part of the substring.
    #[must_use]
    pub fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        sort: SearchSort,
    ) -> Vec<&Product> {
        let needle = query.to_lowercase();
        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.matches_query(&needle))
            .filter(|p| filters.accepts(p))
            .collect();

        match sort {
            SearchSort::Relevance => {}
            SearchSort::PriceLow => results.sort_by_key(|p| p.price),
            SearchSort::PriceHigh => results.sort_by_key(|p| std::cmp::Reverse(p.price)),
            SearchSort::Name => results.sort_by_key(|p| p.name.to_lowercase()),
        }

        tracing::debug!(
            query = %needle,
            sort = sort.as_str(),
            hits = results.len(),
            "Catalog search"
        );
        results
    }
}

impl Catalog {
    /// Typeahead suggestions for a partial query.
    ///
    /// Nothing is suggested until the query is longer than one character.
    /// Matching is a case-insensitive substring test against
    /// [`SEARCH_SUGGESTIONS`], in list order, capped at [`MAX_SUGGESTIONS`].
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<&'static str> {
        if query.chars().count() <= 1 {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        SEARCH_SUGGESTIONS
            .iter()
            .copied()
            .filter(|phrase| phrase.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::mock()
    }
}
