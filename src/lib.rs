//! # sticker-album
//!
//! Card-state and interaction engine for a sticker album collection game:
//! open packs, fill the album, drag cards into a showcase or an arena and
//! watch them fight.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: All mutable state lives in `Album`. UI events are
//!    method calls on it; async pipelines borrow it between awaits only.
//!
//! 2. **Presentation Is a Seam**: The engine never renders. It talks to a
//!    `Presenter` and races every animation it awaits against a fallback
//!    timer, so a missing completion event never stalls it.
//!
//! 3. **Deterministic When Seeded**: Packs and battles draw from separate
//!    `GameRng` streams derived from one seed.
//!
//! ## Architecture
//!
//! - **Guards, Not Queues**: One battle and one displayed card at a time,
//!   enforced by checks at the start of each transition.
//!
//! - **Persistent Data Structures**: The collection is an `im` map, so a
//!   snapshot is O(1). Every mutation is written through to `Storage`.
//!
//! ## Modules
//!
//! - `core`: Configuration, RNG, clock, geometry, errors
//! - `cards`: Card identifiers and the catalog
//! - `collection`: Ownership ledger and persistence
//! - `pack`: Draws, cooldown and the reveal pipeline
//! - `drag`: Per-card drag state machine and physics
//! - `zones`: Display and battle drop zones
//! - `battle`: Scripted battles
//! - `presentation`: `Presenter` and `Timer` seams
//! - `album`: Application state

pub mod core;
pub mod cards;
pub mod collection;
pub mod pack;
pub mod drag;
pub mod zones;
pub mod battle;
pub mod presentation;
pub mod album;

// Re-export commonly used types
pub use crate::core::{
    AlbumConfig, DrawPolicy, GameRng,
    platform_clock, Clock, ManualClock, SystemClock,
    Point, Rect, Vec2,
    CardError, CatalogError, ConfigError, PackError, StorageError,
};

pub use crate::cards::{CardId, Catalog, CatalogConfig, GroupConfig};

pub use crate::collection::{
    AddOutcome, CollectionStore, GroupProgress, OwnershipRecord,
    MemoryStorage, Storage,
};

pub use crate::pack::{open_pack, PackDispenser};

pub use crate::drag::{play_return, DragController, DragOutput, DragState, DropZone};

pub use crate::zones::ZoneResolver;

pub use crate::battle::{
    run_battle, BattleEngine, BattleResult, BattleScript, BattleSide, BattleSlots,
};

pub use crate::presentation::{
    HeadlessPresenter, Presenter, FuturesTimer, InstantTimer, Timer,
};

pub use crate::album::{Album, ReleaseOutcome};
