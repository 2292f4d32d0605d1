//! Drag and drop for album cards.
//!
//! ## Key Types
//!
//! - `DragController`: per-card pointer state machine
//! - `DropTarget`: zone hit-testing seam, asked display-first
//! - `physics`: tilt, shadow and inertia for the cosmetic feedback

pub mod controller;
pub mod physics;
pub mod spring_back;

pub use controller::{
    DragController, DragOutput, DragState, DragTuning, DropTarget, DropZone, PressGuard,
    ReturnPath,
};
pub use spring_back::play_return;
