//! Firestore REST implementation of the source store.
//!
//! Documents are listed page by page through the `documents` collection
//! endpoint and decoded from Firestore's typed value encoding into plain JSON
//! so the field mapper sees the same shape as an exported snapshot.
mod decode;
mod source;

pub use decode::decode_value;
pub use source::FirestoreSource;
