//! JSON snapshot implementation of the source store.
//!
//! Reads collections exported to `<dir>/<collection>.json`. Two layouts are
//! accepted: an array of documents that carry their identifier in an `id`
//! (or `_id`) field, or an object keyed by document identifier.
mod source;

pub use source::JsonSnapshotSource;
