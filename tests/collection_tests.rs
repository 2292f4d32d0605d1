//! Collection store integration tests.
//!
//! These tests cover the ownership ledger together with its persistence:
//! write-through on every mutation, hydration from stored JSON and the
//! tolerance for broken or unavailable storage.

use std::rc::Rc;

use proptest::prelude::*;

use sticker_album::cards::{CardId, Catalog, CatalogConfig};
use sticker_album::collection::{
    CollectionStore, MemoryStorage, OwnershipRecord, Storage, COLLECTION_KEY,
};

fn catalog() -> Catalog {
    Catalog::new(
        CatalogConfig::default()
            .with_group("a", 4)
            .with_group("b", 2)
            .with_card("a-01")
            .with_card("a-02")
            .with_card("a-03")
            .with_card("b-01"),
    )
    .unwrap()
}

fn id(name: &str) -> CardId {
    CardId::parse(name).unwrap()
}

// =============================================================================
// Ledger Tests
// =============================================================================

/// Adding the same card twice: first copy once, quantity two.
#[test]
fn test_double_add() {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = CollectionStore::new(&catalog(), storage);

    let first = store.add_copy(&id("a-02")).unwrap();
    let second = store.add_copy(&id("a-02")).unwrap();

    assert!(first.first_copy);
    assert!(!second.first_copy);
    assert_eq!(store.record(&id("a-02")).quantity, 2);
    assert_eq!(store.count_owned_unique("a"), 1);
}

/// Group counters and the grand total.
#[test]
fn test_progress_counters() {
    let mut store = CollectionStore::new(&catalog(), Rc::new(MemoryStorage::new()));
    store.add_copy(&id("a-01")).unwrap();
    store.add_copy(&id("a-03")).unwrap();
    store.add_copy(&id("a-03")).unwrap();
    store.add_copy(&id("b-01")).unwrap();

    assert_eq!(store.progress("a").unwrap().to_string(), "2/4");
    assert_eq!(store.progress("b").unwrap().to_string(), "1/2");
    assert_eq!(store.total_unique(), 3);
    assert!(store.progress("zz").is_none());
}

/// Wins on a card nobody owns do not count as owned.
#[test]
fn test_win_only_record_not_owned() {
    let mut store = CollectionStore::new(&catalog(), Rc::new(MemoryStorage::new()));
    store.record_win(&id("a-04"));

    assert_eq!(store.record(&id("a-04")).wins, 1);
    assert_eq!(store.count_owned_unique("a"), 0);
    assert!(store.owned_cards().is_empty());
    assert!(store.is_first_copy(&id("a-04")));
}

/// Unknown groups are rejected for adds and ignored for wins.
#[test]
fn test_unknown_group() {
    let mut store = CollectionStore::new(&catalog(), Rc::new(MemoryStorage::new()));
    assert!(store.add_copy(&id("zz-01")).is_err());
    assert!(store.record_win(&id("zz-01")).is_none());
    assert!(store.snapshot().get("zz").is_none());
}

// =============================================================================
// Persistence Tests
// =============================================================================

/// Every mutation writes the `collection` record.
#[test]
fn test_write_through() {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = CollectionStore::new(&catalog(), storage.clone());
    assert_eq!(storage.get(COLLECTION_KEY).unwrap(), None);

    store.add_copy(&id("b-01")).unwrap();
    let raw = storage.get(COLLECTION_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["b"]["1"]["quantity"], 1);
    assert_eq!(json["b"]["1"]["wins"], 0);
    assert!(json["a"].as_object().unwrap().is_empty());
}

/// A second store over the same storage sees the same ledger.
#[test]
fn test_reload_round_trip() {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = CollectionStore::new(&catalog(), storage.clone());
    store.add_copy(&id("a-01")).unwrap();
    store.add_copy(&id("a-01")).unwrap();
    store.record_win(&id("a-01"));
    store.add_copy(&id("b-01")).unwrap();

    let mut reloaded = CollectionStore::new(&catalog(), storage);
    assert_eq!(reloaded.load(), 2);
    assert_eq!(reloaded.snapshot(), store.snapshot());
    assert_eq!(reloaded.owned_cards(), vec![id("a-01"), id("b-01")]);
}

/// Stored data written by older builds may lack fields or carry junk.
#[test]
fn test_load_tolerates_partial_data() {
    let storage = Rc::new(MemoryStorage::new());
    storage
        .set(
            COLLECTION_KEY,
            r#"{ "a": { "2": { "quantity": 3 } }, "b": "oops", "gone": { "1": {} } }"#,
        )
        .unwrap();

    let mut store = CollectionStore::new(&catalog(), storage);
    assert_eq!(store.load(), 1);
    assert_eq!(
        store.record(&id("a-02")),
        OwnershipRecord { quantity: 3, wins: 0 }
    );
    assert_eq!(store.count_owned_unique("b"), 0);
    assert!(store.snapshot().get("gone").is_none());
}

/// Unparseable JSON leaves the ledger untouched.
#[test]
fn test_load_rejects_garbage() {
    let storage = Rc::new(MemoryStorage::new());
    storage.set(COLLECTION_KEY, "{not json").unwrap();

    let mut store = CollectionStore::new(&catalog(), storage);
    store.add_copy(&id("a-01")).unwrap();
    assert_eq!(store.load(), 0);
    assert_eq!(store.record(&id("a-01")).quantity, 1);
}

/// With storage gone the session keeps working from memory.
#[test]
fn test_unavailable_storage() {
    let storage = Rc::new(MemoryStorage::new());
    storage.set_unavailable(true);

    let mut store = CollectionStore::new(&catalog(), storage.clone());
    store.add_copy(&id("a-01")).unwrap();
    assert!(store.save().is_err());
    assert_eq!(store.record(&id("a-01")).quantity, 1);
    assert_eq!(store.load(), 0);
}

/// Reset empties every group and persists the empty ledger.
#[test]
fn test_reset_persists() {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = CollectionStore::new(&catalog(), storage.clone());
    store.add_copy(&id("a-01")).unwrap();
    store.reset();

    let mut reloaded = CollectionStore::new(&catalog(), storage);
    reloaded.load();
    assert_eq!(reloaded.total_unique(), 0);
    assert!(reloaded.snapshot().get("a").unwrap().is_empty());
}

// =============================================================================
// Properties
// =============================================================================

fn card_strategy() -> impl Strategy<Value = CardId> {
    prop_oneof![
        Just(id("a-01")),
        Just(id("a-02")),
        Just(id("a-03")),
        Just(id("b-01")),
    ]
}

proptest! {
    /// Quantities never decrease, whatever mix of adds and wins happens.
    #[test]
    fn prop_quantity_monotonic(ops in prop::collection::vec((card_strategy(), any::<bool>()), 0..40)) {
        let mut store = CollectionStore::new(&catalog(), Rc::new(MemoryStorage::new()));
        for (card, is_add) in ops {
            let before = store.record(&card);
            if is_add {
                store.add_copy(&card).unwrap();
                prop_assert_eq!(store.record(&card).quantity, before.quantity + 1);
            } else {
                store.record_win(&card);
                prop_assert_eq!(store.record(&card).quantity, before.quantity);
                prop_assert_eq!(store.record(&card).wins, before.wins + 1);
            }
        }
    }

    /// Whatever was saved is exactly what a reload sees, including cards
    /// that only ever won and were never owned.
    #[test]
    fn prop_persistence_round_trip(ops in prop::collection::vec((card_strategy(), any::<bool>()), 0..30)) {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = CollectionStore::new(&catalog(), storage.clone());
        for (card, is_add) in &ops {
            if *is_add {
                store.add_copy(card).unwrap();
            } else {
                store.record_win(card);
            }
        }

        let mut reloaded = CollectionStore::new(&catalog(), storage);
        reloaded.load();
        prop_assert_eq!(reloaded.snapshot(), store.snapshot());
        for card in catalog().cards() {
            prop_assert_eq!(reloaded.record(card), store.record(card));
        }
        for group in ["a", "b"] {
            prop_assert_eq!(reloaded.count_owned_unique(group), store.count_owned_unique(group));
        }
    }
}
