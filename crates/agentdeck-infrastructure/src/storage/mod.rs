//! Storage primitives: atomic JSON files and the key-value adapter.

pub mod atomic_json;
pub mod kv_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use kv_store::JsonKvStore;
