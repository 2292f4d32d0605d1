//! Durable key/value storage.
//!
//! The collection and the pack cooldown are each written under their own
//! key as strings. In the browser that is `localStorage`; everywhere else
//! (and in tests) an in-memory map stands in.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::core::error::StorageError;

/// Record holding the serialized collection.
pub const COLLECTION_KEY: &str = "collection";

/// Record holding the cooldown deadline (epoch ms as a string).
pub const NEXT_PACK_KEY: &str = "nextPackTime";

/// String key/value storage.
///
/// Methods take `&self`: storage is a shared process-wide resource, the same
/// way `localStorage` is.
pub trait Storage {
    /// Read a record. `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a record.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a record. Deleting an absent record is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage.
///
/// Can be switched to "unavailable" to exercise the persistence failure
/// paths (quota exceeded, storage disabled).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<FxHashMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable.get() {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `localStorage`.
#[cfg(feature = "web")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "web")]
impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        use gloo_storage::Storage as _;
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo_storage::Storage as _;
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        use gloo_storage::Storage as _;
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}
