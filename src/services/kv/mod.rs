//! In-memory key-value service.
//!
//! A process-wide `String -> String` map shared by every request handler.
//! Reads take a shared lock and writes take an exclusive lock, so many
//! lookups run in parallel while a write waits for them to drain.
//!
//! # Example
//!
//! ```ignore
//! use recordkv::services::kv::KvStore;
//!
//! let store = KvStore::with_entries([("getir", "company")]);
//! store.set("hasan", "ocak");
//! assert_eq!(store.get("hasan").as_deref(), Some("ocak"));
//! ```

mod store;

#[cfg(test)]
mod property_tests;

pub use store::KvStore;
