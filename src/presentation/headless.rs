//! A presenter with no UI.
//!
//! Records every call and resolves animations immediately (or never, when
//! stalled, to exercise the fallback timers). Used for simulations and
//! tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::future::{self, FutureExt, LocalBoxFuture};

use super::presenter::{
    BattleEvent, CardOrigin, CardStats, DragVisual, OutcomeEvent, Presenter, ReturnStep,
    RevealStep,
};
use crate::battle::BattleSide;
use crate::cards::CardId;
use crate::core::geometry::Rect;

/// One recorded presenter call.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    Materialize(CardId),
    ClearAllSlots,
    ResetVisualState,
    Progress { group: String, owned: usize, total: u32 },
    Inspect(CardId),
    Drag(CardId, DragVisual),
    Return(CardId, ReturnStep),
    ClearOverrides(CardId),
    MoveToDisplay(CardId),
    RestoreFromDisplay(CardId, CardOrigin),
    ShowStats(CardStats),
    ClearStats,
    PlaceClone(BattleSide, CardId),
    ClearBattleSlots,
    FightText(bool),
    Battle { round: u32, attacker: BattleSide, event: BattleEvent },
    Outcome { winner: BattleSide, event: OutcomeEvent },
    FadeOut(BattleSide),
    BeginReveal(Vec<CardId>),
    AwaitReveal(CardId),
    AnimateReveal(CardId),
    EndReveal,
}

/// Screen layout used for hit-testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessLayout {
    pub desktop: bool,
    pub display_zone: Option<Rect>,
    pub left_slot: Option<Rect>,
    pub right_slot: Option<Rect>,
}

impl Default for HeadlessLayout {
    fn default() -> Self {
        Self {
            desktop: true,
            display_zone: Some(Rect::from_origin_size(1000.0, 100.0, 300.0, 400.0)),
            left_slot: Some(Rect::from_origin_size(100.0, 600.0, 150.0, 200.0)),
            right_slot: Some(Rect::from_origin_size(300.0, 600.0, 150.0, 200.0)),
        }
    }
}

/// Presenter that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    layout: Cell<HeadlessLayout>,
    calls: RefCell<Vec<PresenterCall>>,
    reveal_script: RefCell<VecDeque<RevealStep>>,
    stall_animations: Cell<bool>,
}

impl HeadlessPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layout(layout: HeadlessLayout) -> Self {
        let presenter = Self::default();
        presenter.layout.set(layout);
        presenter
    }

    pub fn set_layout(&self, layout: HeadlessLayout) {
        self.layout.set(layout);
    }

    #[must_use]
    pub fn layout(&self) -> HeadlessLayout {
        self.layout.get()
    }

    /// Make every animation future pend forever.
    pub fn set_stall_animations(&self, stall: bool) {
        self.stall_animations.set(stall);
    }

    /// Queue answers for `await_reveal`. Once the queue runs dry every card
    /// is revealed.
    pub fn script_reveals(&self, steps: impl IntoIterator<Item = RevealStep>) {
        self.reveal_script.borrow_mut().extend(steps);
    }

    /// Every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls.borrow().clone()
    }

    /// Calls matching a predicate.
    #[must_use]
    pub fn calls_where(&self, predicate: impl Fn(&PresenterCall) -> bool) -> Vec<PresenterCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| predicate(c))
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: PresenterCall) {
        self.calls.borrow_mut().push(call);
    }

    fn animation(&self) -> LocalBoxFuture<'_, ()> {
        if self.stall_animations.get() {
            future::pending::<()>().boxed_local()
        } else {
            future::ready(()).boxed_local()
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn materialize_card(&self, card: &CardId) {
        self.record(PresenterCall::Materialize(card.clone()));
    }

    fn clear_all_slots(&self) {
        self.record(PresenterCall::ClearAllSlots);
    }

    fn reset_visual_state(&self) {
        self.record(PresenterCall::ResetVisualState);
    }

    fn update_progress(&self, group: &str, owned: usize, total: u32) {
        self.record(PresenterCall::Progress {
            group: group.to_string(),
            owned,
            total,
        });
    }

    fn open_inspect(&self, card: &CardId) {
        self.record(PresenterCall::Inspect(card.clone()));
    }

    fn is_desktop_viewport(&self) -> bool {
        self.layout.get().desktop
    }

    fn display_zone_rect(&self) -> Option<Rect> {
        self.layout.get().display_zone
    }

    fn battle_slot_rect(&self, side: BattleSide) -> Option<Rect> {
        match side {
            BattleSide::Left => self.layout.get().left_slot,
            BattleSide::Right => self.layout.get().right_slot,
        }
    }

    fn render_drag(&self, card: &CardId, visual: DragVisual) {
        self.record(PresenterCall::Drag(card.clone(), visual));
    }

    fn animate_return(&self, card: &CardId, step: ReturnStep) -> LocalBoxFuture<'_, ()> {
        self.record(PresenterCall::Return(card.clone(), step));
        self.animation()
    }

    fn clear_drag_overrides(&self, card: &CardId) {
        self.record(PresenterCall::ClearOverrides(card.clone()));
    }

    fn move_to_display(&self, card: &CardId) -> CardOrigin {
        self.record(PresenterCall::MoveToDisplay(card.clone()));
        CardOrigin {
            container: format!("slot:{}:{}", card.group(), card.slot()),
            index: 0,
        }
    }

    fn restore_from_display(&self, card: &CardId, origin: &CardOrigin) {
        self.record(PresenterCall::RestoreFromDisplay(card.clone(), origin.clone()));
    }

    fn show_card_stats(&self, stats: &CardStats) {
        self.record(PresenterCall::ShowStats(stats.clone()));
    }

    fn clear_card_stats(&self) {
        self.record(PresenterCall::ClearStats);
    }

    fn place_battle_clone(&self, side: BattleSide, card: &CardId) {
        self.record(PresenterCall::PlaceClone(side, card.clone()));
    }

    fn clear_battle_slots(&self) {
        self.record(PresenterCall::ClearBattleSlots);
    }

    fn show_fight_text(&self, visible: bool) {
        self.record(PresenterCall::FightText(visible));
    }

    fn render_battle(
        &self,
        round: u32,
        attacker: BattleSide,
        event: BattleEvent,
    ) -> LocalBoxFuture<'_, ()> {
        self.record(PresenterCall::Battle {
            round,
            attacker,
            event,
        });
        self.animation()
    }

    fn render_battle_outcome(
        &self,
        winner: BattleSide,
        event: OutcomeEvent,
    ) -> LocalBoxFuture<'_, ()> {
        self.record(PresenterCall::Outcome { winner, event });
        self.animation()
    }

    fn fade_out_winner(&self, winner: BattleSide) {
        self.record(PresenterCall::FadeOut(winner));
    }

    fn begin_reveal(&self, cards: &[CardId]) {
        self.record(PresenterCall::BeginReveal(cards.to_vec()));
    }

    fn await_reveal(&self, card: &CardId) -> LocalBoxFuture<'_, RevealStep> {
        self.record(PresenterCall::AwaitReveal(card.clone()));
        let step = self
            .reveal_script
            .borrow_mut()
            .pop_front()
            .unwrap_or(RevealStep::Revealed);
        future::ready(step).boxed_local()
    }

    fn animate_reveal(&self, card: &CardId) -> LocalBoxFuture<'_, ()> {
        self.record(PresenterCall::AnimateReveal(card.clone()));
        self.animation()
    }

    fn end_reveal(&self) {
        self.record(PresenterCall::EndReveal);
    }
}
