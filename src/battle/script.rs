//! Pre-rolled battle script.
//!
//! Every random choice a battle makes is drawn up front from the battle
//! RNG stream, so a fixed seed replays the same fight: the number of
//! rounds, the pause after each round and the winner. The winner is drawn
//! last and does not depend on how the rounds went.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::slots::BattleSide;
use crate::core::{AlbumConfig, GameRng};

/// One exchange: the attacker lunges, the defender shakes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub index: u32,
    pub attacker: BattleSide,
    /// Pause after the round, in milliseconds.
    pub pause_ms: u64,
}

impl Round {
    #[must_use]
    pub fn defender(&self) -> BattleSide {
        self.attacker.opposite()
    }
}

/// The full course of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleScript {
    rounds: SmallVec<[Round; 5]>,
    winner: BattleSide,
}

impl BattleScript {
    /// Roll a script from `rng`.
    ///
    /// Left attacks first and sides strictly alternate.
    pub fn generate(config: &AlbumConfig, rng: &mut GameRng) -> Self {
        let turns = rng.gen_range_inclusive(config.battle_min_turns..=config.battle_max_turns);

        let mut rounds = SmallVec::with_capacity(turns as usize);
        let mut attacker = BattleSide::Left;
        for index in 1..=turns {
            let pause_ms = rng.gen_range_u64(config.round_pause_min_ms..config.round_pause_max_ms);
            rounds.push(Round {
                index,
                attacker,
                pause_ms,
            });
            attacker = attacker.opposite();
        }

        let winner = if rng.gen_bool(0.5) {
            BattleSide::Left
        } else {
            BattleSide::Right
        };

        Self { rounds, winner }
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.rounds.len() as u32
    }

    #[must_use]
    pub fn winner(&self) -> BattleSide {
        self.winner
    }

    #[must_use]
    pub fn loser(&self) -> BattleSide {
        self.winner.opposite()
    }
}
