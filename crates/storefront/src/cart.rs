//! Cart store.
//!
//! Holds the ordered line items and their derived subtotal. Every mutation
//! recomputes the total and writes the full item list back through
//! [`Persistence`] under [`keys::CART`].

use rosegold_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::persistence::{Persistence, keys};

/// One distinct product in the cart and how many of it.
///
/// This is also the persisted shape: the cart key holds a JSON array of
/// these, with `size` omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// A product being added to the cart; the store owns the quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub size: Option<String>,
}

impl NewCartItem {
    fn into_line(self) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: 1,
            size: self.size,
        }
    }
}

/// The cart slice of the store.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    total: Price,
    is_hydrated: bool,
    persistence: Persistence,
}

impl CartStore {
    /// Create an empty, unhydrated cart.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            items: Vec::new(),
            total: Price::ZERO,
            is_hydrated: false,
            persistence,
        }
    }

    /// Load the persisted cart, once.
    ///
    /// After the first call this is a no-op, so a later call can never
    /// clobber in-memory changes with what is on disk.
    pub fn hydrate(&mut self) {
        if self.is_hydrated {
            return;
        }
        self.items = self.persistence.load(keys::CART);
        match checked_total(&self.items) {
            Some(total) => self.total = total,
            None => {
                tracing::warn!(
                    lines = self.items.len(),
                    "Discarding persisted cart whose total overflows"
                );
                self.items.clear();
                self.total = Price::ZERO;
                self.persistence.discard(keys::CART);
            }
        }
        self.is_hydrated = true;
        tracing::debug!(lines = self.items.len(), total = %self.total, "Cart hydrated");
    }

    /// Add one unit of `item`.
    ///
    /// An existing line with the same id gets its quantity bumped and keeps
    /// its position; otherwise a new line with quantity 1 is appended.
    pub fn add_to_cart(&mut self, item: NewCartItem) {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(item.into_line());
        }
        self.commit();
    }

    /// Remove the line with `id`, if any.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.items.retain(|line| &line.id != id);
        self.commit();
    }

    /// Set the quantity of the line with `id`, if any.
    ///
    /// The value is taken as-is, including zero and negatives; the line is
    /// not removed. Callers that want a floor must enforce it themselves.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if let Some(line) = self.items.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
        }
        self.commit();
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Line items in first-added order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Whether [`hydrate`](Self::hydrate) has run.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.is_hydrated
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines, saturating at the `i64` bounds.
    #[must_use]
    pub fn unit_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |count, line| count.saturating_add(line.quantity))
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }

    fn commit(&mut self) {
        // Past hydration the total saturates rather than failing.
        self.recompute_total();
        self.persistence.save(keys::CART, &self.items);
        tracing::debug!(lines = self.items.len(), total = %self.total, "Cart updated");
    }
}

/// Exact sum of line totals, `None` if any step overflows.
fn checked_total(items: &[CartItem]) -> Option<Price> {
    items.iter().try_fold(Price::ZERO, |total, line| {
        total.checked_add(line.price.checked_line_total(line.quantity)?)
    })
}
