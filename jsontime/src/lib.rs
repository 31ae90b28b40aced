//! JSON-serializable time types.
//!
//! [`Iso`] is a UTC timestamp that serializes to/from an RFC 3339
//! (ISO-8601) string with microsecond precision:
//!
//! ```rust
//! use itemkv_jsontime::Iso;
//!
//! let created = Iso::now();
//! let json = serde_json::to_string(&created).unwrap();
//! // => "\"2024-01-15T10:30:00.123456Z\""
//!
//! let updated = Iso::now_after(&created);
//! assert!(updated > created);
//! ```

mod iso;

pub use iso::{Iso, ParseError};

#[cfg(test)]
mod tests;
