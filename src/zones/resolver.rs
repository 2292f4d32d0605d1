//! Zone resolver: hit-testing drops against the display and battle zones.
//!
//! Two mutual-exclusion rules live here, both enforced by guard checks at
//! the start of a transition:
//! - at most one card sits in the display zone (a new one evicts the old)
//! - a battle slot takes a card only when empty and no battle is running

use log::debug;
use rustc_hash::FxHashSet;

use crate::battle::{BattleSide, BattleSlots};
use crate::cards::CardId;
use crate::collection::CollectionStore;
use crate::core::geometry::Point;
use crate::drag::DropTarget;
use crate::presentation::{CardOrigin, CardStats, Presenter};

/// The card currently shown in the display zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayedCard {
    pub card: CardId,
    /// Where to put it back.
    pub origin: CardOrigin,
}

/// Display zone and battle slot state.
#[derive(Clone, Debug, Default)]
pub struct ZoneResolver {
    displayed: Option<DisplayedCard>,
    battle: BattleSlots,
    expanded_groups: FxHashSet<String>,
}

impl ZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Card in the display zone.
    #[must_use]
    pub fn displayed(&self) -> Option<&DisplayedCard> {
        self.displayed.as_ref()
    }

    /// Check if a card is locked in the display zone.
    #[must_use]
    pub fn is_display_locked(&self, card: &CardId) -> bool {
        self.displayed.as_ref().is_some_and(|d| d.card == *card)
    }

    #[must_use]
    pub fn battle_slots(&self) -> &BattleSlots {
        &self.battle
    }

    /// The display zone shows on desktop while any album group is open.
    #[must_use]
    pub fn is_display_zone_visible(&self, presenter: &dyn Presenter) -> bool {
        presenter.is_desktop_viewport() && !self.expanded_groups.is_empty()
    }

    /// Track the album accordion. Hiding the display zone sends its card home.
    pub fn set_group_expanded(&mut self, group: &str, open: bool, presenter: &dyn Presenter) {
        if open {
            self.expanded_groups.insert(group.to_string());
        } else {
            self.expanded_groups.remove(group);
        }
        if !self.is_display_zone_visible(presenter) {
            self.release_display_zone(presenter);
        }
    }

    /// Try to place a dropped card in the display zone.
    pub fn try_display_zone(
        &mut self,
        card: &CardId,
        point: Point,
        store: &CollectionStore,
        presenter: &dyn Presenter,
    ) -> bool {
        if !self.is_display_zone_visible(presenter) {
            return false;
        }
        let Some(rect) = presenter.display_zone_rect() else {
            return false;
        };
        if !rect.contains(point) {
            return false;
        }

        if self.displayed.as_ref().is_some_and(|d| d.card != *card) {
            self.release_display_zone(presenter);
        }

        let origin = presenter.move_to_display(card);
        self.displayed = Some(DisplayedCard {
            card: card.clone(),
            origin,
        });
        presenter.show_card_stats(&CardStats::new(card, store.record(card)));

        debug!("{card} placed in display zone");
        true
    }

    /// Send the displayed card back to its exact origin and unlock it.
    pub fn release_display_zone(&mut self, presenter: &dyn Presenter) -> Option<CardId> {
        let displayed = self.displayed.take()?;
        presenter.restore_from_display(&displayed.card, &displayed.origin);
        presenter.clear_card_stats();

        debug!("{} released from display zone", displayed.card);
        Some(displayed.card)
    }

    /// Refresh the stats panel if `card` is on display.
    pub fn refresh_display_stats(
        &self,
        card: &CardId,
        store: &CollectionStore,
        presenter: &dyn Presenter,
    ) {
        if self.is_display_locked(card) {
            presenter.show_card_stats(&CardStats::new(card, store.record(card)));
        }
    }

    /// Try to drop a clone of the card into an empty battle slot.
    pub fn try_battle_zone(
        &mut self,
        card: &CardId,
        point: Point,
        battle_active: bool,
        presenter: &dyn Presenter,
    ) -> Option<BattleSide> {
        if battle_active {
            return None;
        }
        for side in BattleSide::BOTH {
            let hit = presenter
                .battle_slot_rect(side)
                .is_some_and(|rect| rect.contains(point));
            if hit && self.battle.is_empty(side) {
                self.battle.place(side, card.clone());
                presenter.place_battle_clone(side, card);
                debug!("{card} entered battle slot {side}");
                return Some(side);
            }
        }
        None
    }

    /// Empty both battle slots.
    pub fn clear_battle_slots(&mut self, presenter: &dyn Presenter) {
        self.battle.clear();
        presenter.clear_battle_slots();
    }
}

/// Drop target wiring the resolver to the ledger and the UI for one drop.
pub struct ZoneDropTarget<'a> {
    pub zones: &'a mut ZoneResolver,
    pub store: &'a CollectionStore,
    pub presenter: &'a dyn Presenter,
    pub battle_active: bool,
}

impl DropTarget for ZoneDropTarget<'_> {
    fn try_display_zone(&mut self, card: &CardId, point: Point) -> bool {
        self.zones
            .try_display_zone(card, point, self.store, self.presenter)
    }

    fn try_battle_zone(&mut self, card: &CardId, point: Point) -> Option<BattleSide> {
        self.zones
            .try_battle_zone(card, point, self.battle_active, self.presenter)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::cards::{Catalog, CatalogConfig};
    use crate::collection::MemoryStorage;
    use crate::core::geometry::Rect;
    use crate::presentation::{HeadlessLayout, HeadlessPresenter, PresenterCall};

    fn id(name: &str) -> CardId {
        CardId::parse(name).unwrap()
    }

    fn store() -> CollectionStore {
        let catalog =
            Catalog::new(CatalogConfig::default().with_group("a", 3).with_card("a-01")).unwrap();
        CollectionStore::new(&catalog, Rc::new(MemoryStorage::new()))
    }

    const IN_DISPLAY: Point = Point::new(1100.0, 200.0);
    const IN_LEFT: Point = Point::new(150.0, 700.0);
    const IN_RIGHT: Point = Point::new(350.0, 700.0);

    #[test]
    fn test_display_needs_open_group() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();
        let store = store();

        assert!(!zones.try_display_zone(&id("a-01"), IN_DISPLAY, &store, &presenter));

        zones.set_group_expanded("a", true, &presenter);
        assert!(zones.try_display_zone(&id("a-01"), IN_DISPLAY, &store, &presenter));
        assert!(zones.is_display_locked(&id("a-01")));
    }

    #[test]
    fn test_display_needs_desktop() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::with_layout(HeadlessLayout {
            desktop: false,
            ..HeadlessLayout::default()
        });
        zones.set_group_expanded("a", true, &presenter);
        assert!(!zones.try_display_zone(&id("a-01"), IN_DISPLAY, &store(), &presenter));
    }

    #[test]
    fn test_display_edges_inclusive() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();
        zones.set_group_expanded("a", true, &presenter);

        let corner = Point::new(1300.0, 500.0);
        assert!(zones.try_display_zone(&id("a-01"), corner, &store(), &presenter));
        let outside = Point::new(1300.5, 500.0);
        assert!(!zones.try_display_zone(&id("a-02"), outside, &store(), &presenter));
    }

    #[test]
    fn test_display_evicts_previous() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();
        let store = store();
        zones.set_group_expanded("a", true, &presenter);

        zones.try_display_zone(&id("a-01"), IN_DISPLAY, &store, &presenter);
        presenter.clear_calls();
        zones.try_display_zone(&id("a-02"), IN_DISPLAY, &store, &presenter);

        let calls = presenter.calls();
        assert!(matches!(&calls[0], PresenterCall::RestoreFromDisplay(card, _) if *card == id("a-01")));
        assert_eq!(calls[1], PresenterCall::ClearStats);
        assert_eq!(calls[2], PresenterCall::MoveToDisplay(id("a-02")));
        assert!(!zones.is_display_locked(&id("a-01")));
        assert!(zones.is_display_locked(&id("a-02")));
    }

    #[test]
    fn test_collapsing_last_group_releases() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();
        zones.set_group_expanded("a", true, &presenter);
        zones.set_group_expanded("b", true, &presenter);
        zones.try_display_zone(&id("a-01"), IN_DISPLAY, &store(), &presenter);

        zones.set_group_expanded("a", false, &presenter);
        assert!(zones.displayed().is_some());

        zones.set_group_expanded("b", false, &presenter);
        assert!(zones.displayed().is_none());
    }

    #[test]
    fn test_display_stats() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();
        let mut store = store();
        store.add_copy(&id("a-01")).unwrap();
        store.record_win(&id("a-01"));
        zones.set_group_expanded("a", true, &presenter);

        zones.try_display_zone(&id("a-01"), IN_DISPLAY, &store, &presenter);
        let stats = CardStats::new(&id("a-01"), store.record(&id("a-01")));
        assert_eq!(stats.wins, 1);
        assert!(presenter.calls().contains(&PresenterCall::ShowStats(stats)));
    }

    #[test]
    fn test_battle_slots_fill_left_then_right() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();

        assert_eq!(
            zones.try_battle_zone(&id("a-01"), IN_LEFT, false, &presenter),
            Some(BattleSide::Left)
        );
        assert_eq!(zones.try_battle_zone(&id("a-02"), IN_LEFT, false, &presenter), None);
        assert_eq!(
            zones.try_battle_zone(&id("a-02"), IN_RIGHT, false, &presenter),
            Some(BattleSide::Right)
        );
        assert!(zones.battle_slots().is_full());
    }

    #[test]
    fn test_battle_zone_closed_during_battle() {
        let mut zones = ZoneResolver::new();
        let presenter = HeadlessPresenter::new();
        assert_eq!(zones.try_battle_zone(&id("a-01"), IN_LEFT, true, &presenter), None);
        assert!(presenter.calls().is_empty());
    }

    #[test]
    fn test_overlapping_slots_prefer_left() {
        let mut zones = ZoneResolver::new();
        let rect = Rect::from_origin_size(0.0, 0.0, 100.0, 100.0);
        let presenter = HeadlessPresenter::with_layout(HeadlessLayout {
            left_slot: Some(rect),
            right_slot: Some(rect),
            ..HeadlessLayout::default()
        });
        let point = Point::new(50.0, 50.0);
        assert_eq!(
            zones.try_battle_zone(&id("a-01"), point, false, &presenter),
            Some(BattleSide::Left)
        );
        assert_eq!(
            zones.try_battle_zone(&id("a-02"), point, false, &presenter),
            Some(BattleSide::Right)
        );
    }
}
