//! Pack dispenser: random draws, cooldown and the reveal pipeline.
//!
//! ## Key Types
//!
//! - `PackDispenser`: draw policy, shuffled draws, persisted cooldown
//! - `open_pack`: async reveal of one pack into the collection

pub mod dispenser;
pub mod reveal;

pub use dispenser::PackDispenser;
pub use reveal::{is_reveal_swipe, open_pack, SWIPE_THRESHOLD};
