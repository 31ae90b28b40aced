use itemkv_jsontime::Iso;

/// A stored item record.
///
/// `id` and `created_at` never change after creation; `updated_at` is
/// refreshed on every successful update and is never before `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: Iso,
    pub updated_at: Iso,
}

/// Input for [`ItemStore::create`](crate::ItemStore::create).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    /// Caller-chosen id. `None` or an empty string lets the store pick one.
    pub id: Option<String>,
    pub name: String,
    pub description: String,
}

impl NewItem {
    /// Create a request with a store-generated id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Use a caller-chosen id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
