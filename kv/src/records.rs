//! Primary id -> item map.

use std::collections::BTreeMap;

use crate::error::{Result, StoreError};
use crate::item::Item;

/// The canonical id -> [`Item`] mapping.
///
/// Not synchronized on its own; [`ItemStore`](crate::ItemStore) guards it
/// together with the name index.
#[derive(Debug, Default)]
pub struct RecordStore {
    items: BTreeMap<String, Item>,
}

impl RecordStore {
    /// Create a new empty record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the item stored under `item.id`.
    pub fn put(&mut self, item: Item) -> Result<&Item> {
        if item.id.is_empty() {
            return Err(StoreError::InvalidArgument("empty id".into()));
        }
        let id = item.id.clone();
        self.items.insert(id.clone(), item);
        self.get(&id)
    }

    /// Get an item by id.
    pub fn get(&self, id: &str) -> Result<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Remove an item by id, returning it.
    pub fn delete(&mut self, id: &str) -> Result<Item> {
        self.items
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Snapshot of every item, ordered by id.
    pub fn list_all(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    /// Iterate over stored items without copying, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemkv_jsontime::Iso;

    fn item(id: &str, name: &str) -> Item {
        let now = Iso::now();
        Item {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_basic_operations() {
        let mut records = RecordStore::new();

        // Put and get
        let stored = records.put(item("a", "alpha")).unwrap().clone();
        assert_eq!(stored.name, "alpha");
        assert_eq!(records.get("a").unwrap(), &stored);
        assert!(records.exists("a"));
        assert_eq!(records.count(), 1);

        // Overwrite keeps a single entry
        records.put(item("a", "beta")).unwrap();
        assert_eq!(records.get("a").unwrap().name, "beta");
        assert_eq!(records.count(), 1);

        // Delete
        let removed = records.delete("a").unwrap();
        assert_eq!(removed.name, "beta");
        assert!(!records.exists("a"));
        assert_eq!(records.count(), 0);
    }

    #[test]
    fn test_missing_ids() {
        let mut records = RecordStore::new();
        assert_eq!(
            records.get("nope").unwrap_err(),
            StoreError::NotFound("nope".into())
        );
        assert_eq!(
            records.delete("nope").unwrap_err(),
            StoreError::NotFound("nope".into())
        );
    }

    #[test]
    fn test_put_rejects_empty_id() {
        let mut records = RecordStore::new();
        assert!(matches!(
            records.put(item("", "x")),
            Err(StoreError::InvalidArgument(_))
        ));
        assert_eq!(records.count(), 0);
    }

    #[test]
    fn test_list_all_is_ordered_snapshot() {
        let mut records = RecordStore::new();
        records.put(item("c", "x")).unwrap();
        records.put(item("a", "x")).unwrap();
        records.put(item("b", "x")).unwrap();

        let snapshot = records.list_all();
        records.delete("a").unwrap();

        let ids: Vec<&str> = snapshot.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(records.list_all().len(), 2);
    }
}
