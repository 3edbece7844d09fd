//! Wishlist store.

use rosegold_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::persistence::{Persistence, keys};

/// A saved product reference. Unique by `id` within a wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// The wishlist slice of the store.
#[derive(Debug)]
pub struct WishlistStore {
    items: Vec<WishlistItem>,
    is_hydrated: bool,
    persistence: Persistence,
}

impl WishlistStore {
    /// Create an empty, unhydrated wishlist.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            items: Vec::new(),
            is_hydrated: false,
            persistence,
        }
    }

    /// Load the persisted wishlist, once.
    pub fn hydrate(&mut self) {
        if self.is_hydrated {
            return;
        }
        self.items = self.persistence.load(keys::WISHLIST);
        // Hand-edited storage can carry duplicates; first occurrence wins.
        let mut seen = std::collections::HashSet::new();
        self.items.retain(|item| seen.insert(item.id.clone()));
        self.is_hydrated = true;
        tracing::debug!(items = self.items.len(), "Wishlist hydrated");
    }

    /// Append `item` unless its id is already saved.
    ///
    /// Returns `true` if the item was inserted. Only an insertion is
    /// persisted.
    pub fn add_to_wishlist(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        self.persist();
        true
    }

    /// Remove the entry with `id`, if any.
    ///
    /// The collection is written back even when nothing was removed.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) {
        self.items.retain(|item| &item.id != id);
        self.persist();
    }

    /// Remove every entry.
    pub fn clear_wishlist(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// The entry for `id`, if saved.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Whether [`hydrate`](Self::hydrate) has run.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.is_hydrated
    }

    /// Number of saved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) {
        self.persistence.save(keys::WISHLIST, &self.items);
        tracing::debug!(items = self.items.len(), "Wishlist updated");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::persistence::{MemoryStorage, StorageBackend};

    fn entry(id: &str) -> WishlistItem {
        WishlistItem {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            price: Price::from_dollars(850),
            image: format!("/newarrival/pearls{id}.jpg"),
        }
    }

    fn store_over(storage: &MemoryStorage) -> WishlistStore {
        WishlistStore::new(Persistence::new(Arc::new(storage.clone())))
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut wishlist = store_over(&MemoryStorage::new());
        assert!(wishlist.add_to_wishlist(entry("2")));
        assert!(!wishlist.add_to_wishlist(entry("2")));

        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist.items()[0].id, ProductId::new("2"));
    }

    #[test]
    fn test_ids_stay_unique_over_operation_sequence() {
        let mut wishlist = store_over(&MemoryStorage::new());
        for id in ["1", "2", "1", "3", "2", "2", "4"] {
            wishlist.add_to_wishlist(entry(id));
            wishlist.remove_from_wishlist(&ProductId::new("3"));
            let unique: HashSet<_> = wishlist.items().iter().map(|i| &i.id).collect();
            assert_eq!(unique.len(), wishlist.len());
        }
        let ids: Vec<&str> = wishlist.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "4"]);
    }

    #[test]
    fn test_duplicate_add_does_not_write() {
        let storage = MemoryStorage::new();
        let mut wishlist = store_over(&storage);
        wishlist.add_to_wishlist(entry("1"));

        storage.set_item(keys::WISHLIST, "sentinel").unwrap();
        wishlist.add_to_wishlist(entry("1"));
        assert_eq!(
            storage.get_item(keys::WISHLIST).unwrap().as_deref(),
            Some("sentinel")
        );
    }

    #[test]
    fn test_remove_missing_id_still_writes() {
        let storage = MemoryStorage::new();
        let mut wishlist = store_over(&storage);
        wishlist.add_to_wishlist(entry("1"));

        storage.set_item(keys::WISHLIST, "sentinel").unwrap();
        wishlist.remove_from_wishlist(&ProductId::new("nope"));
        assert_eq!(wishlist.len(), 1);

        let raw = storage.get_item(keys::WISHLIST).unwrap().unwrap();
        let persisted: Vec<WishlistItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec![entry("1")]);
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let storage = MemoryStorage::new();
        let mut wishlist = store_over(&storage);
        wishlist.add_to_wishlist(entry("1"));
        wishlist.add_to_wishlist(entry("2"));

        wishlist.clear_wishlist();
        assert!(wishlist.is_empty());
        assert_eq!(
            storage.get_item(keys::WISHLIST).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let storage = MemoryStorage::new();
        store_over(&storage).add_to_wishlist(entry("5"));

        let mut wishlist = store_over(&storage);
        wishlist.hydrate();
        assert!(wishlist.is_hydrated());
        assert!(wishlist.contains(&ProductId::new("5")));

        storage.set_item(keys::WISHLIST, "[]").unwrap();
        wishlist.hydrate();
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_hydrate_drops_duplicate_ids() {
        let storage = MemoryStorage::new();
        let json = serde_json::to_string(&[entry("1"), entry("2"), entry("1")]).unwrap();
        storage.set_item(keys::WISHLIST, &json).unwrap();

        let mut wishlist = store_over(&storage);
        wishlist.hydrate();
        let ids: Vec<&str> = wishlist.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn test_hydrate_without_backend_is_empty() {
        let mut wishlist = WishlistStore::new(Persistence::unavailable());
        wishlist.hydrate();
        assert!(wishlist.is_hydrated());
        assert!(wishlist.is_empty());
    }
}
