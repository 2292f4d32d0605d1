//! Presentation layer interface.
//!
//! ## Key Types
//!
//! - `Presenter`: everything the engine asks of the UI
//! - `HeadlessPresenter`: records calls instead of drawing
//! - `Timer`: delays (`FuturesTimer` for real time, `InstantTimer` headless)
//! - `with_fallback`: race an animation against a timeout

pub mod headless;
pub mod presenter;
pub mod timer;

pub use headless::{HeadlessLayout, HeadlessPresenter, PresenterCall};
pub use presenter::{
    BattleEvent, CardOrigin, CardStats, DragVisual, OutcomeEvent, Presenter, ReturnStep,
    RevealStep,
};
pub use timer::{with_fallback, FuturesTimer, InstantTimer, Timer};
