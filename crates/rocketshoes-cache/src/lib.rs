//! Key-value persistence for the RocketShoes cart.
//!
//! A [`KvStore`] is the browser-localStorage equivalent: string keys mapped
//! to string values. [`Cache`] adds JSON serialization on top, and [`Slot`]
//! pins a cache to a single key holding a single typed value.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rocketshoes_cache::{Cache, MemoryStore, Slot};
//!
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//! let slot: Slot<Vec<u32>> = Slot::new(cache, "@RocketShoes:cart");
//!
//! assert_eq!(slot.load().unwrap(), None);
//! slot.save(&vec![1, 2, 3]).unwrap();
//! assert_eq!(slot.load().unwrap(), Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod slot;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KvStore, MemoryStore};
pub use slot::Slot;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, Slot};
}
