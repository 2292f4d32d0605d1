//! The album: one owner for all engine state.
//!
//! `Album` threads the catalog, the collection, the pack dispenser, the
//! zones, the battle engine and every card's drag controller together. UI
//! events come in as method calls; the async pipelines (`open_pack`,
//! `run_battle`, `play_return`) hold a `&RefCell<Album>` and borrow it
//! only between awaits.

use std::rc::Rc;

use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::battle::{BattleEngine, BattleResult, BattleScript};
use crate::cards::{CardId, Catalog};
use crate::collection::{AddOutcome, CollectionStore, OwnershipRecord, Storage};
use crate::core::error::{CardError, ConfigError, PackError};
use crate::core::geometry::Point;
use crate::core::{AlbumConfig, Clock, GameRng};
use crate::drag::{DragController, DragOutput, DragTuning, DropZone, PressGuard};
use crate::pack::PackDispenser;
use crate::presentation::Presenter;
use crate::zones::{ZoneDropTarget, ZoneResolver};

/// What releasing a card did.
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseOutcome {
    pub drag: DragOutput,
    /// The drop filled the second battle slot and a battle started. Hand
    /// the album to `run_battle` to play it.
    pub battle: Option<BattleScript>,
}

impl ReleaseOutcome {
    fn ignored() -> Self {
        Self {
            drag: DragOutput::Ignored,
            battle: None,
        }
    }
}

/// Application state.
pub struct Album {
    config: AlbumConfig,
    catalog: Catalog,
    store: CollectionStore,
    dispenser: PackDispenser,
    zones: ZoneResolver,
    battle: BattleEngine,
    battle_rng: GameRng,
    drags: FxHashMap<CardId, DragController>,
    materialized: FxHashSet<CardId>,
    clock: Box<dyn Clock>,
    /// Id of the open pack reveal.
    reveal: Option<u64>,
    packs: u64,
}

impl std::fmt::Debug for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Album")
            .field("store", &self.store)
            .field("dispenser", &self.dispenser)
            .field("zones", &self.zones)
            .field("battle", &self.battle)
            .field("reveal", &self.reveal)
            .finish_non_exhaustive()
    }
}

impl Album {
    /// Create an album with an empty collection.
    ///
    /// Fails if `config` does not validate. Call `hydrate` to pick up
    /// persisted state.
    pub fn new(
        config: AlbumConfig,
        catalog: Catalog,
        storage: Rc<dyn Storage>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let store = CollectionStore::new(&catalog, storage.clone());
        let dispenser = PackDispenser::new(config.draw_policy, rng.for_context("pack"), storage);

        Ok(Self {
            battle_rng: rng.for_context("battle"),
            config,
            catalog,
            store,
            dispenser,
            zones: ZoneResolver::new(),
            battle: BattleEngine::new(),
            drags: FxHashMap::default(),
            materialized: FxHashSet::default(),
            clock,
            reveal: None,
            packs: 0,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &AlbumConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneResolver {
        &self.zones
    }

    #[must_use]
    pub fn battle(&self) -> &BattleEngine {
        &self.battle
    }

    #[must_use]
    pub fn dispenser(&self) -> &PackDispenser {
        &self.dispenser
    }

    /// Drag controller of a materialized card.
    #[must_use]
    pub fn drag(&self, card: &CardId) -> Option<&DragController> {
        self.drags.get(card)
    }

    /// Check if a card's album slot is rendered.
    #[must_use]
    pub fn is_materialized(&self, card: &CardId) -> bool {
        self.materialized.contains(card)
    }

    /// Check if a pack reveal is in progress.
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    /// Id of the open pack reveal.
    #[must_use]
    pub fn reveal_id(&self) -> Option<u64> {
        self.reveal
    }

    // === Collection ===

    /// Load the persisted collection and cooldown, and render every owned
    /// card. Returns the number of cards rendered.
    pub fn hydrate(&mut self, presenter: &dyn Presenter) -> usize {
        self.store.load();
        let remaining = self.dispenser.restore(self.clock.now_ms());
        if remaining > 0 {
            debug!("pack cooldown resumes with {remaining} ms left");
        }

        let mut rendered = 0;
        for card in self.store.owned_cards() {
            if self.materialize(&card, presenter) {
                rendered += 1;
            }
        }
        self.refresh_progress(presenter);
        info!("album hydrated: {rendered} cards");
        rendered
    }

    /// Add one copy of a card. The first copy renders its slot.
    pub fn add_copy(
        &mut self,
        card: &CardId,
        presenter: &dyn Presenter,
    ) -> Result<AddOutcome, CardError> {
        let outcome = self.store.add_copy(card)?;
        if outcome.first_copy {
            self.materialize(card, presenter);
        }
        if let Some(progress) = self.store.progress(card.group()) {
            presenter.update_progress(card.group(), progress.owned, progress.total);
        }
        self.zones.refresh_display_stats(card, &self.store, presenter);
        Ok(outcome)
    }

    /// Render a card's album slot and attach its drag controller.
    ///
    /// Idempotent: returns `false` if the slot is already rendered.
    pub fn materialize(&mut self, card: &CardId, presenter: &dyn Presenter) -> bool {
        if !self.materialized.insert(card.clone()) {
            return false;
        }
        presenter.materialize_card(card);

        let tuning = DragTuning {
            threshold: self.config.drag_threshold,
            max_tilt_deg: self.config.max_tilt_deg,
        };
        self.drags
            .insert(card.clone(), DragController::new(card.clone(), tuning));
        true
    }

    /// Count a battle win and refresh the stats panel.
    pub fn record_win(
        &mut self,
        card: &CardId,
        presenter: &dyn Presenter,
    ) -> Option<OwnershipRecord> {
        let record = self.store.record_win(card)?;
        self.zones.refresh_display_stats(card, &self.store, presenter);
        Some(record)
    }

    fn refresh_progress(&self, presenter: &dyn Presenter) {
        for group in self.catalog.group_names() {
            if let Some(progress) = self.store.progress(group) {
                presenter.update_progress(group, progress.owned, progress.total);
            }
        }
    }

    /// Wipe the collection and the cooldown, and clear the album view.
    ///
    /// A running battle plays out; its win is recorded into the fresh
    /// collection. An open pack reveal is closed and the rest of its cards
    /// are never added.
    pub fn reset(&mut self, presenter: &dyn Presenter) {
        if let Some(reveal) = self.reveal.take() {
            presenter.end_reveal();
            info!("pack reveal {reveal} abandoned by reset");
        }
        self.zones.release_display_zone(presenter);
        self.store.reset();
        self.dispenser.clear_cooldown();
        self.drags.clear();
        self.materialized.clear();
        if !self.battle.is_active() {
            self.zones.clear_battle_slots(presenter);
        }

        presenter.clear_all_slots();
        presenter.reset_visual_state();
        self.refresh_progress(presenter);
        info!("album reset");
    }

    // === Drag and drop ===

    fn press_guard(&self, card: &CardId) -> PressGuard {
        PressGuard {
            battle_active: self.battle.is_active(),
            display_locked: self.zones.is_display_locked(card),
        }
    }

    /// Pointer pressed on a card.
    pub fn pointer_down(&mut self, card: &CardId, pos: Point) -> DragOutput {
        let guard = self.press_guard(card);
        match self.drags.get_mut(card) {
            Some(drag) => drag.pointer_down(pos, guard),
            None => DragOutput::Ignored,
        }
    }

    /// Pointer moved while a card is captured.
    pub fn pointer_move(
        &mut self,
        card: &CardId,
        pos: Point,
        presenter: &dyn Presenter,
    ) -> DragOutput {
        let Some(drag) = self.drags.get_mut(card) else {
            return DragOutput::Ignored;
        };
        let output = drag.pointer_move(pos);
        if let DragOutput::Started(visual) | DragOutput::Moved(visual) = output {
            presenter.render_drag(card, visual);
        }
        output
    }

    /// Pointer released at `pos`.
    pub fn pointer_up(
        &mut self,
        card: &CardId,
        pos: Point,
        presenter: &dyn Presenter,
    ) -> ReleaseOutcome {
        self.release(card, Some(pos), presenter)
    }

    /// Pointer capture lost: release where the pointer was last seen.
    pub fn capture_lost(&mut self, card: &CardId, presenter: &dyn Presenter) -> ReleaseOutcome {
        self.release(card, None, presenter)
    }

    fn release(
        &mut self,
        card: &CardId,
        pos: Option<Point>,
        presenter: &dyn Presenter,
    ) -> ReleaseOutcome {
        let battle_active = self.battle.is_active();
        let Some(drag) = self.drags.get_mut(card) else {
            return ReleaseOutcome::ignored();
        };
        let mut target = ZoneDropTarget {
            zones: &mut self.zones,
            store: &self.store,
            presenter,
            battle_active,
        };
        let output = match pos {
            Some(pos) => drag.pointer_up(pos, &mut target),
            None => drag.capture_lost(&mut target),
        };

        let battle = match output {
            DragOutput::Tap => {
                presenter.open_inspect(card);
                None
            }
            DragOutput::Dropped(zone) => {
                presenter.clear_drag_overrides(card);
                match zone {
                    DropZone::Battle(_) => self.try_start_battle(),
                    DropZone::Display => None,
                }
            }
            _ => None,
        };

        ReleaseOutcome {
            drag: output,
            battle,
        }
    }

    /// The spring-back `generation` of a missed drop is over.
    pub fn finish_return(&mut self, card: &CardId, generation: u64) -> bool {
        self.drags
            .get_mut(card)
            .is_some_and(|drag| drag.finish_return(generation))
    }

    /// Send the displayed card home.
    pub fn release_display_zone(&mut self, presenter: &dyn Presenter) -> Option<CardId> {
        self.zones.release_display_zone(presenter)
    }

    /// Track an album group opening or closing.
    pub fn set_group_expanded(&mut self, group: &str, open: bool, presenter: &dyn Presenter) {
        self.zones.set_group_expanded(group, open, presenter);
    }

    // === Battle ===

    /// Start a battle if both slots are filled and none is running.
    pub fn try_start_battle(&mut self) -> Option<BattleScript> {
        let script = self.battle.start(
            self.zones.battle_slots(),
            &self.config,
            &mut self.battle_rng,
        )?;
        info!("battle started: {} rounds", script.turns());
        Some(script)
    }

    /// Take ownership of the running battle for playback.
    ///
    /// Returns the battle id and its script, once per battle.
    pub fn claim_battle(&mut self) -> Option<(u64, BattleScript)> {
        self.battle.claim()
    }

    /// The rounds of battle `id` have played out.
    pub fn begin_deciding_battle(&mut self, id: u64) -> bool {
        self.battle.begin_deciding(id)
    }

    /// Commit the result of battle `id` and clear the arena.
    ///
    /// Does nothing unless `id` is the running battle.
    pub fn finish_battle(&mut self, id: u64, presenter: &dyn Presenter) -> Option<BattleResult> {
        if self.battle.id() != Some(id) {
            debug!("battle {id} is not running, nothing to finish");
            return None;
        }
        let result = self.battle.finish(id, self.zones.battle_slots());
        if let Some(result) = &result {
            self.record_win(&result.card, presenter);
        }
        self.zones.clear_battle_slots(presenter);
        result
    }

    // === Packs ===

    /// Milliseconds until the next pack.
    pub fn remaining_cooldown_ms(&mut self) -> u64 {
        self.dispenser.remaining_ms(self.clock.now_ms())
    }

    /// Check if a pack can be opened now.
    pub fn can_open_pack(&mut self) -> bool {
        self.reveal.is_none()
            && self
                .dispenser
                .can_dispense(self.clock.now_ms(), &self.catalog, &self.store)
    }

    /// Draw a pack and start the cooldown.
    ///
    /// An empty draw neither starts the cooldown nor opens a reveal.
    pub fn begin_pack(&mut self) -> Result<Vec<CardId>, PackError> {
        if self.reveal.is_some() {
            return Err(PackError::RevealInProgress);
        }
        let now = self.clock.now_ms();
        let remaining_ms = self.dispenser.remaining_ms(now);
        if remaining_ms > 0 {
            return Err(PackError::CooldownActive { remaining_ms });
        }
        if !self.dispenser.can_dispense(now, &self.catalog, &self.store) {
            return Err(PackError::Exhausted);
        }

        let cards = self
            .dispenser
            .draw(&self.catalog, &self.store, self.config.pack_size);
        if cards.is_empty() {
            warn!("pack draw came up empty");
            return Ok(cards);
        }

        self.dispenser
            .start_cooldown(now, self.config.pack_cooldown_ms);
        self.packs += 1;
        self.reveal = Some(self.packs);
        info!("pack {} opened: {} cards", self.packs, cards.len());
        Ok(cards)
    }

    /// Reveal `reveal` closed.
    ///
    /// Returns `false` if that reveal was already closed (by a reset).
    pub fn end_pack(&mut self, reveal: u64) -> bool {
        if self.reveal == Some(reveal) {
            self.reveal = None;
            true
        } else {
            false
        }
    }
}
