//! Drop zones: the display showcase and the battle arena.
//!
//! ## Key Types
//!
//! - `ZoneResolver`: hit-testing plus display and battle slot state
//! - `ZoneDropTarget`: `DropTarget` binding for a single drop
//! - `DisplayedCard`: the showcased card and where it came from

pub mod resolver;

pub use resolver::{DisplayedCard, ZoneDropTarget, ZoneResolver};
