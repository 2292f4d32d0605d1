//! Per-card ownership data.

use serde::{Deserialize, Serialize};

/// Copies owned and battles won for one card design.
///
/// A missing record reads as the zero record. Both fields default when
/// absent from stored JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub wins: u32,
}

impl OwnershipRecord {
    /// Check if nothing is owned and nothing was won.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.quantity == 0 && self.wins == 0
    }

    /// Check if at least one copy is owned.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.quantity > 0
    }
}

/// Result of adding one copy of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// The record after the increment.
    pub record: OwnershipRecord,
    /// This was the first copy, so the album slot needs a card.
    pub first_copy: bool,
}

/// Owned-versus-total counter shown on each group header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupProgress {
    pub owned: usize,
    pub total: u32,
}

impl std::fmt::Display for GroupProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owned, self.total)
    }
}
