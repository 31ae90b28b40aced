//! Store facade coordinating the record map and the name index.

use itemkv_jsontime::Iso;
use parking_lot::RwLock;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::index::NameIndex;
use crate::item::{Item, NewItem};
use crate::records::RecordStore;

/// Both maps live behind one lock so a mutation is applied to the pair or
/// not at all.
#[derive(Debug, Default)]
struct Tables {
    records: RecordStore,
    names: NameIndex,
}

/// ItemStore is the only component that mutates the record map and the
/// name index.
///
/// Mutations take the write lock and serialize against each other; reads
/// share the read lock and always see both maps at the same version. The
/// lock is only held for in-memory map work.
#[derive(Debug, Default)]
pub struct ItemStore {
    tables: RwLock<Tables>,
}

impl ItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item.
    ///
    /// A missing or empty id is replaced by a fresh UUID. A caller-supplied
    /// id that is already stored fails with [`StoreError::AlreadyExists`].
    pub fn create(&self, new: NewItem) -> Result<Item> {
        validate_name(&new.name)?;

        let mut tables = self.tables.write();
        let id = match new.id.filter(|id| !id.is_empty()) {
            Some(id) if tables.records.exists(&id) => {
                return Err(StoreError::AlreadyExists(id));
            }
            Some(id) => id,
            None => generate_id(&tables.records),
        };

        let now = Iso::now();
        let item = Item {
            id,
            name: new.name,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        let stored = tables.records.put(item)?.clone();
        tables.names.add(&stored.name, &stored.id);

        debug!(id = %stored.id, name = %stored.name, "item created");
        Ok(stored)
    }

    /// Get an item by id.
    pub fn get(&self, id: &str) -> Result<Item> {
        self.tables.read().records.get(id).cloned()
    }

    /// Every item whose name equals `name`, ordered by id.
    ///
    /// An indexed id without a record is reported as
    /// [`StoreError::InternalConsistency`], never as "not found".
    pub fn search_by_name(&self, name: &str) -> Result<Vec<Item>> {
        let tables = self.tables.read();
        let ids = tables.names.lookup(name);
        let items: Result<Vec<Item>> = ids
            .iter()
            .map(|id| match tables.records.get(id) {
                Ok(item) => Ok(item.clone()),
                Err(_) => {
                    error!(%id, %name, "name index references a missing record");
                    Err(StoreError::InternalConsistency(format!(
                        "index entry {name:?} references missing id {id:?}"
                    )))
                }
            })
            .collect();
        items
    }

    /// Replace the name and description of an existing item.
    ///
    /// The index move (when the name changes) and the record write happen
    /// under the same write lock.
    pub fn update(&self, id: &str, name: &str, description: &str) -> Result<Item> {
        validate_name(name)?;

        let mut tables = self.tables.write();
        let existing = tables.records.get(id)?.clone();

        if existing.name != name {
            tables.names.remove(&existing.name, id);
            tables.names.add(name, id);
        }

        let item = Item {
            name: name.to_string(),
            description: description.to_string(),
            updated_at: Iso::now_after(&existing.updated_at),
            ..existing
        };
        let stored = tables.records.put(item)?.clone();

        debug!(%id, name = %stored.name, "item updated");
        Ok(stored)
    }

    /// Delete an item and its index entry, returning the removed item.
    pub fn delete(&self, id: &str) -> Result<Item> {
        let mut tables = self.tables.write();
        let name = tables.records.get(id)?.name.clone();

        tables.names.remove(&name, id);
        let removed = tables.records.delete(id)?;

        debug!(%id, "item deleted");
        Ok(removed)
    }

    /// Snapshot of every item, ordered by id.
    pub fn list_all(&self) -> Vec<Item> {
        self.tables.read().records.list_all()
    }

    pub fn count(&self) -> usize {
        self.tables.read().records.count()
    }

    /// Full scan verifying that the index and the record map agree.
    ///
    /// Checks that every indexed id resolves to a record carrying that
    /// name, that every record is indexed under its name, that no index
    /// set is empty and that no record was updated before it was created.
    pub fn check_consistency(&self) -> Result<()> {
        let tables = self.tables.read();
        let fault = |msg: String| {
            error!("{msg}");
            Err(StoreError::InternalConsistency(msg))
        };

        let mut indexed = 0usize;
        for (name, ids) in tables.names.iter() {
            if ids.is_empty() {
                return fault(format!("empty index set for {name:?}"));
            }
            for id in ids {
                match tables.records.get(id) {
                    Ok(item) if item.name == name => indexed += 1,
                    Ok(item) => {
                        return fault(format!(
                            "id {id:?} indexed under {name:?} but named {:?}",
                            item.name
                        ));
                    }
                    Err(_) => {
                        return fault(format!("id {id:?} indexed under {name:?} has no record"));
                    }
                }
            }
        }

        for item in tables.records.iter() {
            if !tables.names.lookup(&item.name).contains(&item.id) {
                return fault(format!("id {:?} missing from index {:?}", item.id, item.name));
            }
            if item.updated_at < item.created_at {
                return fault(format!("id {:?} updated before it was created", item.id));
            }
        }

        // Each record is indexed exactly once, so the counts must agree.
        if indexed != tables.records.count() {
            return fault(format!(
                "index holds {indexed} ids, record map holds {}",
                tables.records.count()
            ));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidArgument("name is required".into()));
    }
    Ok(())
}

fn generate_id(records: &RecordStore) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !records.exists(&id) {
            return id;
        }
    }
}
