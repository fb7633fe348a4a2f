//! Single-key typed persistence slots.

use std::marker::PhantomData;

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Serialize};

/// One named entry in a cache holding one value of type `T`.
///
/// # Example
///
/// ```rust,ignore
/// let slot: Slot<Cart> = Slot::new(cache, "@RocketShoes:cart");
/// let cart = slot.load()?.unwrap_or_default();
/// slot.save(&cart)?;
/// ```
pub struct Slot<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a slot for `key`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The key this slot reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored value.
    ///
    /// `Ok(None)` when nothing is stored; `Err` when the stored text does
    /// not deserialize as `T`.
    pub fn load(&self) -> Result<Option<T>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Overwrite the stored value.
    pub fn save(&self, value: &T) -> Result<(), CacheError> {
        self.cache.set(&self.key, value)
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: i64,
        amount: i64,
    }

    #[test]
    fn test_slot_empty() {
        let slot: Slot<Vec<Entry>> = Slot::new(Cache::in_memory(), "@RocketShoes:cart");
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_slot_save_and_load() {
        let slot: Slot<Vec<Entry>> = Slot::new(Cache::in_memory(), "@RocketShoes:cart");
        let entries = vec![Entry { id: 1, amount: 2 }, Entry { id: 3, amount: 1 }];

        slot.save(&entries).unwrap();
        assert_eq!(slot.load().unwrap(), Some(entries));
    }

    #[test]
    fn test_slot_save_overwrites() {
        let slot: Slot<Vec<Entry>> = Slot::new(Cache::in_memory(), "cart");
        slot.save(&vec![Entry { id: 1, amount: 1 }]).unwrap();
        slot.save(&vec![]).unwrap();
        assert_eq!(slot.load().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_slots_share_cache() {
        let cache = Cache::in_memory();
        let a: Slot<Vec<Entry>> = Slot::new(cache.clone(), "a");
        let b: Slot<Vec<Entry>> = Slot::new(cache.clone(), "b");

        a.save(&vec![Entry { id: 1, amount: 1 }]).unwrap();
        assert_eq!(b.load().unwrap(), None);
        assert_eq!(cache.keys().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_slot_wrong_shape() {
        let cache = Cache::in_memory();
        cache.set("cart", &serde_json::json!({"id": 1})).unwrap();

        let slot: Slot<Vec<Entry>> = Slot::new(cache, "cart");
        assert!(slot.load().is_err());
    }
}
