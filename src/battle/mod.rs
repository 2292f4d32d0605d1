//! Battle engine: two cards, a scripted fight, one win.
//!
//! ## Key Types
//!
//! - `BattleSlots`: the left and right arena slots
//! - `BattleScript`: rounds, pauses and winner, rolled up front
//! - `BattleEngine`: `Idle → Fighting → DecidingWinner → Idle`
//! - `run_battle`: async driver for the animations

pub mod engine;
pub mod runner;
pub mod script;
pub mod slots;

pub use engine::{BattleEngine, BattleResult, BattleState};
pub use runner::run_battle;
pub use script::{BattleScript, Round};
pub use slots::{BattleSide, BattleSlots};
