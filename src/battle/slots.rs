//! The two battle slots.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Left or right side of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleSide {
    Left,
    Right,
}

impl BattleSide {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            BattleSide::Left => BattleSide::Right,
            BattleSide::Right => BattleSide::Left,
        }
    }

    /// Both sides, left first.
    pub const BOTH: [BattleSide; 2] = [BattleSide::Left, BattleSide::Right];
}

impl std::fmt::Display for BattleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleSide::Left => write!(f, "left"),
            BattleSide::Right => write!(f, "right"),
        }
    }
}

/// Occupancy of the battle slots.
///
/// A slot holds the identifier of a presentation-only clone; the original
/// card stays in the album and no ownership is consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleSlots {
    left: Option<CardId>,
    right: Option<CardId>,
}

impl BattleSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Card in a slot.
    #[must_use]
    pub fn get(&self, side: BattleSide) -> Option<&CardId> {
        match side {
            BattleSide::Left => self.left.as_ref(),
            BattleSide::Right => self.right.as_ref(),
        }
    }

    /// Check if a slot is empty.
    #[must_use]
    pub fn is_empty(&self, side: BattleSide) -> bool {
        self.get(side).is_none()
    }

    /// Check if both slots are occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Fill an empty slot. Returns `false` (and changes nothing) if the
    /// slot is occupied.
    pub fn place(&mut self, side: BattleSide, card: CardId) -> bool {
        let slot = match side {
            BattleSide::Left => &mut self.left,
            BattleSide::Right => &mut self.right,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(card);
        true
    }

    /// Both fighters, if both slots are occupied.
    #[must_use]
    pub fn fighters(&self) -> Option<(CardId, CardId)> {
        Some((self.left.clone()?, self.right.clone()?))
    }

    /// Empty both slots.
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }
}
