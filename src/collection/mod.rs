//! Collection store and its persistence.
//!
//! ## Key Types
//!
//! - `OwnershipRecord`: copies owned and battles won for one card design
//! - `CollectionStore`: the ledger, the only writer of ownership data
//! - `Storage`: string key/value persistence (`MemoryStorage`, or
//!   `BrowserStorage` with the `web` feature)

pub mod record;
pub mod storage;
pub mod store;

pub use record::{AddOutcome, GroupProgress, OwnershipRecord};
#[cfg(feature = "web")]
pub use storage::BrowserStorage;
pub use storage::{MemoryStorage, Storage, COLLECTION_KEY, NEXT_PACK_KEY};
pub use store::{Collection, CollectionStore, SlotMap};
