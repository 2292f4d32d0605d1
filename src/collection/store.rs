//! Collection store: the ownership ledger.
//!
//! The store is the only writer of the collection. Every mutation is
//! followed by a persistence write, so a reload never loses more than the
//! in-flight operation. Persistence failures are logged and skipped; the
//! in-memory ledger stays authoritative for the session.
//!
//! Stored format (`collection` record):
//!
//! ```json
//! { "black-angus": { "1": { "quantity": 2, "wins": 1 } }, "pym": {} }
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use im::OrdMap;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use super::record::{AddOutcome, GroupProgress, OwnershipRecord};
use super::storage::{Storage, COLLECTION_KEY};
use crate::cards::{CardId, Catalog};
use crate::core::error::{CardError, StorageError};

/// Records of one group, keyed by slot number.
pub type SlotMap = OrdMap<u32, OwnershipRecord>;

/// The whole ledger, keyed by group name.
pub type Collection = OrdMap<String, SlotMap>;

/// Mutable ownership ledger with write-through persistence.
pub struct CollectionStore {
    collection: Collection,
    totals: FxHashMap<String, u32>,
    storage: Rc<dyn Storage>,
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl CollectionStore {
    /// Create an empty ledger with every catalog group present.
    ///
    /// Nothing is read from storage until `load` is called.
    pub fn new(catalog: &Catalog, storage: Rc<dyn Storage>) -> Self {
        let mut collection = Collection::new();
        let mut totals = FxHashMap::default();
        for group in catalog.group_names() {
            collection.insert(group.to_string(), SlotMap::new());
            totals.insert(group.to_string(), catalog.group_total(group).unwrap_or(0));
        }

        Self {
            collection,
            totals,
            storage,
        }
    }

    /// Get the record for a card, inserting the zero record if missing.
    pub fn ensure_record(&mut self, id: &CardId) -> Result<&mut OwnershipRecord, CardError> {
        let slots = self
            .collection
            .get_mut(id.group())
            .ok_or_else(|| CardError::UnknownGroup(id.group().to_string()))?;
        Ok(slots
            .entry(id.slot())
            .or_insert_with(OwnershipRecord::default))
    }

    /// Read a record. Missing records read as zero.
    #[must_use]
    pub fn record(&self, id: &CardId) -> OwnershipRecord {
        self.collection
            .get(id.group())
            .and_then(|slots| slots.get(&id.slot()))
            .copied()
            .unwrap_or_default()
    }

    /// Add one copy of a card and persist.
    pub fn add_copy(&mut self, id: &CardId) -> Result<AddOutcome, CardError> {
        let record = self.ensure_record(id)?;
        let first_copy = record.quantity == 0;
        record.quantity = record.quantity.saturating_add(1);
        let record = *record;

        debug!("added {id}: quantity now {}", record.quantity);
        self.persist();

        Ok(AddOutcome { record, first_copy })
    }

    /// Count a battle victory for a card and persist.
    ///
    /// Unknown groups are ignored.
    pub fn record_win(&mut self, id: &CardId) -> Option<OwnershipRecord> {
        let record = match self.ensure_record(id) {
            Ok(record) => record,
            Err(err) => {
                debug!("ignoring win for {id}: {err}");
                return None;
            }
        };
        record.wins = record.wins.saturating_add(1);
        let record = *record;

        debug!("recorded win for {id}: wins now {}", record.wins);
        self.persist();

        Some(record)
    }

    /// Check if the next `add_copy` would be the first copy.
    #[must_use]
    pub fn is_first_copy(&self, id: &CardId) -> bool {
        self.record(id).quantity == 0
    }

    /// Number of slots in a group with at least one copy owned.
    ///
    /// A record that only holds wins does not count.
    #[must_use]
    pub fn count_owned_unique(&self, group: &str) -> usize {
        self.collection
            .get(group)
            .map_or(0, |slots| slots.values().filter(|r| r.is_owned()).count())
    }

    /// Owned slots across every group.
    #[must_use]
    pub fn total_unique(&self) -> usize {
        self.collection
            .keys()
            .map(|group| self.count_owned_unique(group))
            .sum()
    }

    /// Owned/total counter for a group header.
    #[must_use]
    pub fn progress(&self, group: &str) -> Option<GroupProgress> {
        let total = *self.totals.get(group)?;
        Some(GroupProgress {
            owned: self.count_owned_unique(group),
            total,
        })
    }

    /// Every owned card, in group then slot order.
    #[must_use]
    pub fn owned_cards(&self) -> Vec<CardId> {
        let mut owned = Vec::new();
        for (group, slots) in &self.collection {
            for (&slot, record) in slots {
                if !record.is_owned() {
                    continue;
                }
                match CardId::new(group.clone(), slot) {
                    Ok(id) => owned.push(id),
                    Err(err) => warn!("skipping stored record: {err}"),
                }
            }
        }
        owned.sort();
        owned
    }

    /// Cheap copy of the whole ledger.
    #[must_use]
    pub fn snapshot(&self) -> Collection {
        self.collection.clone()
    }

    /// Empty every group and persist.
    pub fn reset(&mut self) {
        let groups: Vec<String> = self.collection.keys().cloned().collect();
        for group in groups {
            self.collection.insert(group, SlotMap::new());
        }
        debug!("collection reset");
        self.persist();
    }

    /// Serialize the ledger and write it to storage.
    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.collection).map_err(|e| StorageError::Serialize {
            key: COLLECTION_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.storage.set(COLLECTION_KEY, &json)
    }

    /// Merge stored data into the ledger, group by group.
    ///
    /// A stored group replaces the in-memory group wholesale; groups absent
    /// from storage are left alone, and stored groups the catalog does not
    /// know are dropped. Failures are logged and leave state unchanged.
    /// Returns the number of groups hydrated.
    pub fn load(&mut self) -> usize {
        match self.try_load() {
            Ok(hydrated) => hydrated,
            Err(err) => {
                warn!("Failed to load collection: {err}");
                0
            }
        }
    }

    fn try_load(&mut self) -> Result<usize, StorageError> {
        let Some(raw) = self.storage.get(COLLECTION_KEY)? else {
            return Ok(0);
        };

        let data: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Deserialize {
                key: COLLECTION_KEY.to_string(),
                reason: e.to_string(),
            })?;

        let mut hydrated = 0;
        for (group, value) in data {
            let Some(slots) = self.collection.get_mut(&group) else {
                warn!("ignoring stored group [{group}]: not in catalog");
                continue;
            };
            match serde_json::from_value::<BTreeMap<u32, OwnershipRecord>>(value) {
                Ok(stored) => {
                    *slots = stored.into_iter().filter(|(slot, _)| *slot > 0).collect();
                    hydrated += 1;
                }
                Err(err) => warn!("ignoring malformed stored group [{group}]: {err}"),
            }
        }

        debug!("hydrated {hydrated} groups from storage");
        Ok(hydrated)
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            warn!("Failed to save collection: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CatalogConfig;
    use crate::collection::storage::MemoryStorage;

    fn catalog() -> Catalog {
        Catalog::new(
            CatalogConfig::default()
                .with_group("a", 3)
                .with_group("b", 2)
                .with_card("a-01")
                .with_card("a-02")
                .with_card("b-01"),
        )
        .unwrap()
    }

    fn id(name: &str) -> CardId {
        CardId::parse(name).unwrap()
    }

    fn store() -> (CollectionStore, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        (CollectionStore::new(&catalog(), storage.clone()), storage)
    }

    #[test]
    fn test_ensure_record_creates_zero() {
        let (mut store, _) = store();
        let record = store.ensure_record(&id("a-02")).unwrap();
        assert!(record.is_zero());

        assert_eq!(
            store.ensure_record(&id("zzz-01")).unwrap_err(),
            CardError::UnknownGroup("zzz".into())
        );
    }

    #[test]
    fn test_add_copy_counts() {
        let (mut store, _) = store();
        assert!(store.is_first_copy(&id("a-01")));

        let first = store.add_copy(&id("a-01")).unwrap();
        assert!(first.first_copy);
        assert_eq!(first.record.quantity, 1);

        let second = store.add_copy(&id("a-01")).unwrap();
        assert!(!second.first_copy);
        assert_eq!(store.ensure_record(&id("a-01")).unwrap().quantity, 2);
        assert!(!store.is_first_copy(&id("a-01")));
    }

    #[test]
    fn test_add_copy_unknown_group() {
        let (mut store, storage) = store();
        assert!(store.add_copy(&id("nope-01")).is_err());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_record_win_only_touches_wins() {
        let (mut store, _) = store();
        store.add_copy(&id("b-01")).unwrap();
        let record = store.record_win(&id("b-01")).unwrap();
        assert_eq!(record, OwnershipRecord { quantity: 1, wins: 1 });

        assert_eq!(store.record_win(&id("nope-01")), None);
    }

    #[test]
    fn test_win_only_record_is_not_owned() {
        let (mut store, _) = store();
        store.record_win(&id("a-03")).unwrap();

        assert_eq!(store.count_owned_unique("a"), 0);
        assert!(store.is_first_copy(&id("a-03")));
        assert!(store.owned_cards().is_empty());
    }

    #[test]
    fn test_counters() {
        let (mut store, _) = store();
        store.add_copy(&id("a-01")).unwrap();
        store.add_copy(&id("a-01")).unwrap();
        store.add_copy(&id("a-02")).unwrap();
        store.add_copy(&id("b-01")).unwrap();

        assert_eq!(store.count_owned_unique("a"), 2);
        assert_eq!(store.count_owned_unique("b"), 1);
        assert_eq!(store.count_owned_unique("zzz"), 0);
        assert_eq!(store.total_unique(), 3);
        assert_eq!(store.progress("a").unwrap().to_string(), "2/3");
        assert_eq!(store.progress("zzz"), None);
        assert_eq!(
            store.owned_cards(),
            vec![id("a-01"), id("a-02"), id("b-01")]
        );
    }

    #[test]
    fn test_every_mutation_persists() {
        let (mut store, storage) = store();
        store.add_copy(&id("a-01")).unwrap();

        let raw = storage.get(COLLECTION_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["a"]["1"]["quantity"], 1);
        assert_eq!(json["a"]["1"]["wins"], 0);
        assert!(json["b"].as_object().unwrap().is_empty());

        store.record_win(&id("a-01"));
        let raw = storage.get(COLLECTION_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["a"]["1"]["wins"], 1);
    }

    #[test]
    fn test_load_merges_per_group() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .set(
                COLLECTION_KEY,
                r#"{ "a": { "2": { "quantity": 3, "wins": 4 } }, "ghost": { "1": {} } }"#,
            )
            .unwrap();

        let mut store = CollectionStore::new(&catalog(), storage);
        assert_eq!(store.load(), 1);
        assert_eq!(store.record(&id("a-02")), OwnershipRecord { quantity: 3, wins: 4 });
        assert_eq!(store.count_owned_unique("b"), 0);
        assert!(!store.snapshot().contains_key("ghost"));
    }

    #[test]
    fn test_load_replaces_group_wholesale() {
        let (mut store, storage) = store();
        store.add_copy(&id("a-01")).unwrap();
        storage
            .set(COLLECTION_KEY, r#"{ "a": { "2": { "quantity": 1 } } }"#)
            .unwrap();

        store.load();
        assert_eq!(store.record(&id("a-01")).quantity, 0);
        assert_eq!(store.record(&id("a-02")).quantity, 1);
    }

    #[test]
    fn test_load_tolerates_garbage() {
        let (mut store, storage) = store();
        store.add_copy(&id("a-01")).unwrap();

        storage.set(COLLECTION_KEY, "not json").unwrap();
        assert_eq!(store.load(), 0);
        assert_eq!(store.record(&id("a-01")).quantity, 1);

        storage
            .set(COLLECTION_KEY, r#"{ "a": "oops", "b": { "1": { "quantity": 1 } } }"#)
            .unwrap();
        assert_eq!(store.load(), 1);
        assert_eq!(store.record(&id("a-01")).quantity, 1);
        assert_eq!(store.record(&id("b-01")).quantity, 1);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let (mut store, storage) = store();
        storage.set_unavailable(true);

        let outcome = store.add_copy(&id("a-01")).unwrap();
        assert_eq!(outcome.record.quantity, 1);
        assert!(store.save().is_err());
        assert_eq!(store.load(), 0);
        assert_eq!(store.record(&id("a-01")).quantity, 1);
    }

    #[test]
    fn test_reset() {
        let (mut store, storage) = store();
        store.add_copy(&id("a-01")).unwrap();
        store.record_win(&id("b-01"));

        store.reset();
        assert_eq!(store.total_unique(), 0);
        assert!(store.record(&id("b-01")).is_zero());

        let raw = storage.get(COLLECTION_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"a":{},"b":{}}"#);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let (mut store, _) = store();
        let before = store.snapshot();
        store.add_copy(&id("a-01")).unwrap();
        assert!(before.get("a").unwrap().is_empty());
        assert_eq!(store.snapshot().get("a").unwrap().len(), 1);
    }
}
