//! Core engine types: configuration, RNG, clock, geometry and errors.
//!
//! These are the ambient building blocks every other module leans on.

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod rng;

pub use clock::{platform_clock, Clock, ManualClock, SystemClock};
#[cfg(feature = "web")]
pub use clock::BrowserClock;
pub use config::{AlbumConfig, DrawPolicy};
pub use error::{CardError, CatalogError, ConfigError, PackError, StorageError};
pub use geometry::{Point, Rect, Vec2};
pub use rng::GameRng;
