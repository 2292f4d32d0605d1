//! Battle state machine.
//!
//! ```text
//! Idle ──start──▶ Fighting ──begin_deciding──▶ DecidingWinner ──finish──▶ Idle
//! ```
//!
//! The engine only tracks where a battle is and what it will look like.
//! Driving the animations is `run_battle`'s job; committing the win is the
//! album's.
//!
//! Every battle gets an id when it starts. A runner claims the battle by id
//! once, and the later transitions only apply to the battle with that id.

use log::{debug, info};

use super::script::BattleScript;
use super::slots::{BattleSide, BattleSlots};
use crate::cards::CardId;
use crate::core::{AlbumConfig, GameRng};

/// Where the engine is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BattleState {
    #[default]
    Idle,
    /// Rounds are playing.
    Fighting(BattleScript),
    /// Outcome animations are playing.
    DecidingWinner(BattleScript),
}

/// A finished battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleResult {
    pub winner: BattleSide,
    pub card: CardId,
}

/// Tracks the one battle that may run at a time.
#[derive(Clone, Debug, Default)]
pub struct BattleEngine {
    state: BattleState,
    /// Id of the latest battle started.
    started: u64,
    claimed: bool,
}

impl BattleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Check if a battle is running (fighting or deciding).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, BattleState::Idle)
    }

    /// Id of the running battle.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.is_active().then_some(self.started)
    }

    /// Script of the running battle.
    #[must_use]
    pub fn script(&self) -> Option<&BattleScript> {
        match &self.state {
            BattleState::Idle => None,
            BattleState::Fighting(script) | BattleState::DecidingWinner(script) => Some(script),
        }
    }

    /// Start a battle if both slots are filled and none is running.
    pub fn start(
        &mut self,
        slots: &BattleSlots,
        config: &AlbumConfig,
        rng: &mut GameRng,
    ) -> Option<BattleScript> {
        if self.is_active() {
            return None;
        }
        let (left, right) = slots.fighters()?;

        let script = BattleScript::generate(config, rng);
        debug!(
            "battle {left} vs {right}: {} rounds, {} wins",
            script.turns(),
            script.winner()
        );
        self.started += 1;
        self.claimed = false;
        self.state = BattleState::Fighting(script.clone());
        Some(script)
    }

    /// Hand the running battle to a runner.
    ///
    /// Each battle is handed out once; later calls get `None`.
    pub fn claim(&mut self) -> Option<(u64, BattleScript)> {
        if self.claimed {
            return None;
        }
        let script = self.script()?.clone();
        self.claimed = true;
        Some((self.started, script))
    }

    /// Rounds of battle `id` are over; move on to the outcome.
    pub fn begin_deciding(&mut self, id: u64) -> bool {
        if self.id() != Some(id) {
            return false;
        }
        match std::mem::take(&mut self.state) {
            BattleState::Fighting(script) => {
                self.state = BattleState::DecidingWinner(script);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// End battle `id` and return to `Idle`.
    ///
    /// Any other id is ignored. The winner is read from `slots` at this
    /// point; an emptied slot makes the result `None` but the engine still
    /// goes idle.
    pub fn finish(&mut self, id: u64, slots: &BattleSlots) -> Option<BattleResult> {
        if self.id() != Some(id) {
            return None;
        }
        let script = match std::mem::take(&mut self.state) {
            BattleState::Idle => return None,
            BattleState::Fighting(script) | BattleState::DecidingWinner(script) => script,
        };

        let winner = script.winner();
        let Some(card) = slots.get(winner).cloned() else {
            debug!("battle ended with no card on the {winner} side");
            return None;
        };

        info!("{card} wins on the {winner} side");
        Some(BattleResult { winner, card })
    }
}
