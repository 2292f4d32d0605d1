//! Card catalog: which card designs exist and how many slots each group has.
//!
//! The catalog is static reference data fixed at configuration time.
//! Every card's group must be declared, and its slot number must fit the
//! group's total. Groups keep their declared order (album accordion order).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::identifier::CardId;
use crate::core::error::{CardError, CatalogError};

/// A declared group and its slot count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub total: u32,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, total: u32) -> Self {
        Self {
            name: name.into(),
            total,
        }
    }
}

/// Serializable catalog description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Groups in album order.
    pub groups: Vec<GroupConfig>,
    /// Asset names of every existing card (`<group>-<NN>[.ext]`).
    pub cards: Vec<String>,
}

impl CatalogConfig {
    /// Declare a group.
    #[must_use]
    pub fn with_group(mut self, name: impl Into<String>, total: u32) -> Self {
        self.groups.push(GroupConfig::new(name, total));
        self
    }

    /// List a card asset.
    #[must_use]
    pub fn with_card(mut self, name: impl Into<String>) -> Self {
        self.cards.push(name.into());
        self
    }

    /// The shipped album: six groups, thirteen printed cards.
    #[must_use]
    pub fn original() -> Self {
        let groups = [
            ("black-angus", 10),
            ("fuck-quesadilla", 15),
            ("blip-city", 4),
            ("helldivers", 14),
            ("pym", 21),
            ("otros", 8),
        ];
        let cards = [
            "black-angus-01.png",
            "black-angus-02.png",
            "black-angus-03.png",
            "black-angus-04.png",
            "black-angus-05.png",
            "black-angus-06.png",
            "fuck-quesadilla-01.png",
            "fuck-quesadilla-02.png",
            "fuck-quesadilla-03.png",
            "fuck-quesadilla-04.png",
            "fuck-quesadilla-05.png",
            "fuck-quesadilla-09.png",
            "blip-city-01.png",
        ];

        Self {
            groups: groups
                .iter()
                .map(|&(name, total)| GroupConfig::new(name, total))
                .collect(),
            cards: cards.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Validated catalog.
///
/// ## Example
///
/// ```
/// use sticker_album::cards::{Catalog, CatalogConfig};
///
/// let catalog = Catalog::new(
///     CatalogConfig::default()
///         .with_group("a", 2)
///         .with_group("b", 1)
///         .with_card("a-01")
///         .with_card("a-02")
///         .with_card("b-01"),
/// )
/// .unwrap();
///
/// assert_eq!(catalog.len(), 3);
/// assert_eq!(catalog.group_total("a"), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<CardId>,
    groups: Vec<GroupConfig>,
    totals: FxHashMap<String, u32>,
}

impl Catalog {
    /// Validate and build a catalog.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut totals = FxHashMap::default();
        for group in &config.groups {
            if totals.insert(group.name.clone(), group.total).is_some() {
                return Err(CatalogError::DuplicateGroup(group.name.clone()));
            }
        }

        let mut cards: Vec<CardId> = Vec::with_capacity(config.cards.len());
        for name in &config.cards {
            let id = CardId::parse(name)?;
            let total = *totals
                .get(id.group())
                .ok_or_else(|| CardError::UnknownGroup(id.group().to_string()))?;
            if id.slot() > total {
                return Err(CatalogError::SlotOutOfRange {
                    card: name.clone(),
                    total,
                });
            }
            if cards.contains(&id) {
                return Err(CatalogError::DuplicateCard { card: name.clone() });
            }
            cards.push(id);
        }

        Ok(Self {
            cards,
            groups: config.groups,
            totals,
        })
    }

    /// All card identifiers, in configuration order.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Group names in album order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Slot count for a group.
    #[must_use]
    pub fn group_total(&self, group: &str) -> Option<u32> {
        self.totals.get(group).copied()
    }

    /// Check if a group is declared.
    #[must_use]
    pub fn has_group(&self, group: &str) -> bool {
        self.totals.contains_key(group)
    }

    /// Check if a card design exists.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains(id)
    }

    /// Number of card designs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if there are no card designs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
