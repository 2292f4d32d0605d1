//! Card identifiers.
//!
//! A card design is named by its group and its slot number inside that
//! group. Asset names encode both as `<group>-<NN>`, optionally followed
//! by a file extension: `black-angus-01.png` is slot 1 of `black-angus`.

use serde::{Deserialize, Serialize};

use crate::core::error::CardError;

/// Identifier of a card design: `(group, slot)`.
///
/// ## Example
///
/// ```
/// use sticker_album::cards::CardId;
///
/// let id: CardId = "fuck-quesadilla-09.png".parse().unwrap();
/// assert_eq!(id.group(), "fuck-quesadilla");
/// assert_eq!(id.slot(), 9);
/// assert_eq!(id.file_name(), "fuck-quesadilla-09.png");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    group: String,
    slot: u32,
}

impl CardId {
    /// Build an identifier from parts. Slot 0 is rejected.
    pub fn new(group: impl Into<String>, slot: u32) -> Result<Self, CardError> {
        let group = group.into();
        if group.is_empty() {
            return Err(CardError::EmptyGroup(format!("-{slot:02}")));
        }
        if slot == 0 {
            return Err(CardError::InvalidSlotNumber(format!("{group}-00")));
        }
        Ok(Self { group, slot })
    }

    /// Decompose an asset name such as `blip-city-01.png`.
    pub fn parse(name: &str) -> Result<Self, CardError> {
        let base = match name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => name,
        };

        let (group, number) = base
            .rsplit_once('-')
            .ok_or_else(|| CardError::MissingSlotNumber(name.to_string()))?;

        let slot: u32 = number
            .trim()
            .parse()
            .map_err(|_| CardError::MissingSlotNumber(name.to_string()))?;

        if group.is_empty() {
            return Err(CardError::EmptyGroup(name.to_string()));
        }
        if slot == 0 {
            return Err(CardError::InvalidSlotNumber(name.to_string()));
        }

        Ok(Self {
            group: group.to_string(),
            slot,
        })
    }

    /// Group name.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Slot number within the group (1-based).
    #[must_use]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Zero-padded album number shown on the display stats.
    #[must_use]
    pub fn album_number(&self) -> String {
        format!("{:02}", self.slot)
    }

    /// Asset file name for this card.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{:02}.png", self.group, self.slot)
    }
}

impl std::str::FromStr for CardId {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.group, self.slot)
    }
}
