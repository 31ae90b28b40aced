//! Secondary name -> ids index.

use std::collections::{BTreeSet, HashMap};

/// Maps each name to the set of ids whose item carries that name.
///
/// Empty sets are never kept: removing the last id for a name drops the
/// name entirely.
#[derive(Debug, Default)]
pub struct NameIndex {
    names: HashMap<String, BTreeSet<String>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` under `name`.
    pub fn add(&mut self, name: &str, id: &str) {
        self.names
            .entry(name.to_string())
            .or_default()
            .insert(id.to_string());
    }

    /// Remove `id` from `name`. No-op if it is not there.
    pub fn remove(&mut self, name: &str, id: &str) {
        if let Some(ids) = self.names.get_mut(name) {
            ids.remove(id);
            if ids.is_empty() {
                self.names.remove(name);
            }
        }
    }

    /// Ids stored under `name`; empty when the name is unknown.
    pub fn lookup(&self, name: &str) -> BTreeSet<String> {
        self.names.get(name).cloned().unwrap_or_default()
    }

    /// Iterate over every (name, ids) entry.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.names.iter().map(|(n, ids)| (n.as_str(), ids))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut idx = NameIndex::new();
        idx.add("alpha", "1");
        idx.add("alpha", "2");
        idx.add("beta", "3");

        let ids: Vec<String> = idx.lookup("alpha").into_iter().collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(idx.lookup("beta").len(), 1);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut idx = NameIndex::new();
        idx.add("alpha", "1");
        idx.add("alpha", "1");
        assert_eq!(idx.lookup("alpha").len(), 1);
    }

    #[test]
    fn test_remove_drops_empty_sets() {
        let mut idx = NameIndex::new();
        idx.add("alpha", "1");
        idx.add("alpha", "2");

        idx.remove("alpha", "1");
        assert_eq!(idx.lookup("alpha").len(), 1);

        idx.remove("alpha", "2");
        assert!(idx.lookup("alpha").is_empty());
        assert!(idx.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut idx = NameIndex::new();
        idx.add("alpha", "1");
        idx.remove("alpha", "9");
        idx.remove("gamma", "1");
        assert_eq!(idx.lookup("alpha").len(), 1);
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn test_lookup_unknown_is_empty() {
        assert!(NameIndex::new().lookup("nobody").is_empty());
    }
}
