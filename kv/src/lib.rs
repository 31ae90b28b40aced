//! Embedded item store with a secondary name index.
//!
//! [`ItemStore`] is the single entry point. It owns a [`RecordStore`]
//! (id -> [`Item`]) and a [`NameIndex`] (name -> ids) behind one lock, so
//! every create/update/delete changes both maps in a single step and
//! readers never see one map ahead of the other.
//!
//! [`Diagnostics`] reports backend health and the record count for the
//! HTTP info endpoint.

pub mod diagnostics;
pub mod error;
pub mod index;
pub mod item;
pub mod records;
pub mod store;

pub use diagnostics::{Diagnostics, EmbeddedProbe, Probe, Report, Status};
pub use error::{Result, StoreError};
pub use index::NameIndex;
pub use item::{Item, NewItem};
pub use records::RecordStore;
pub use store::ItemStore;
