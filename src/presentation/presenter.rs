//! The presentation seam.
//!
//! The engine never touches markup, CSS or audio. It tells a `Presenter`
//! what happened and, for animations, awaits the future the presenter hands
//! back. Those futures are always raced against a fallback timer, so a
//! presenter that never resolves one cannot lock the engine up.

use futures::future::LocalBoxFuture;

use crate::battle::BattleSide;
use crate::cards::CardId;
use crate::collection::OwnershipRecord;
use crate::core::geometry::{Rect, Vec2};

/// Stats shown next to the card in the display zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardStats {
    pub card: CardId,
    /// Zero-padded slot number.
    pub album_number: String,
    pub wins: u32,
    pub copies: u32,
}

impl CardStats {
    #[must_use]
    pub fn new(card: &CardId, record: OwnershipRecord) -> Self {
        Self {
            card: card.clone(),
            album_number: card.album_number(),
            wins: record.wins,
            copies: record.quantity,
        }
    }
}

/// Where a card sat before it was moved into the display zone.
///
/// Opaque to the engine: the presenter hands it out when detaching the
/// card and gets it back when the card has to go home.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardOrigin {
    /// Parent container (the album slot element).
    pub container: String,
    /// Sibling position inside that container.
    pub index: usize,
}

/// Cosmetic drag feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragVisual {
    /// Offset from the press point.
    pub translation: Vec2,
    /// Frame-to-frame pointer velocity.
    pub velocity: Vec2,
    /// Tilt in degrees, already clamped.
    pub tilt_deg: f64,
    /// Shadow alpha.
    pub shadow_intensity: f64,
    /// Shadow offset in px.
    pub shadow_offset: f64,
}

/// One step of the spring-back after a drop outside every zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReturnStep {
    /// Fly a little further along the release velocity.
    Overshoot(Vec2),
    /// Animate back to the natural layout position.
    Origin,
}

/// Per-round battle animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    /// The attacker lunges at the defender.
    Attack,
    /// The defender shakes.
    React,
}

/// End-of-battle animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeEvent {
    /// The loser falls.
    Defeat,
    /// The winner jumps.
    Victory,
}

/// User decision on the top card of a pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// Clicked or swiped away: commit it.
    Revealed,
    /// The reveal was dismissed: stop here.
    Abandoned,
}

/// Everything the engine asks of the UI.
pub trait Presenter {
    // === Album grid ===

    /// Render a card into its album slot. Called at most once per card
    /// until the next reset.
    fn materialize_card(&self, card: &CardId);

    /// Remove every card from the album grid.
    fn clear_all_slots(&self);

    /// Drop all transient visual state (counters, overlays, drag styles).
    fn reset_visual_state(&self);

    /// Refresh a group header counter.
    fn update_progress(&self, _group: &str, _owned: usize, _total: u32) {}

    /// A tap (press without drag) asks for the enlarged inspect view.
    fn open_inspect(&self, _card: &CardId) {}

    // === Environment and layout ===

    /// Wide-screen predicate gating the display zone.
    fn is_desktop_viewport(&self) -> bool;

    /// Current screen rectangle of the display zone.
    fn display_zone_rect(&self) -> Option<Rect>;

    /// Current screen rectangle of a battle slot.
    fn battle_slot_rect(&self, side: BattleSide) -> Option<Rect>;

    // === Drag ===

    /// Apply drag feedback to the card being dragged.
    fn render_drag(&self, _card: &CardId, _visual: DragVisual) {}

    /// Play one spring-back step.
    fn animate_return(&self, card: &CardId, step: ReturnStep) -> LocalBoxFuture<'_, ()>;

    /// Remove every positioning override from the card.
    fn clear_drag_overrides(&self, card: &CardId);

    // === Display zone ===

    /// Move the card element into the display zone container.
    fn move_to_display(&self, card: &CardId) -> CardOrigin;

    /// Put the card element back exactly where it came from.
    fn restore_from_display(&self, card: &CardId, origin: &CardOrigin);

    /// Show stats for the displayed card.
    fn show_card_stats(&self, stats: &CardStats);

    /// Blank the stats panel.
    fn clear_card_stats(&self);

    // === Battle ===

    /// Put a presentation-only copy of the card in a battle slot.
    fn place_battle_clone(&self, side: BattleSide, card: &CardId);

    /// Empty both battle slots.
    fn clear_battle_slots(&self);

    /// Show or hide the "fight" cue.
    fn show_fight_text(&self, _visible: bool) {}

    /// Play one round animation.
    fn render_battle(&self, round: u32, attacker: BattleSide, event: BattleEvent)
        -> LocalBoxFuture<'_, ()>;

    /// Play an outcome animation (`Defeat` on the loser, `Victory` on the
    /// winner).
    fn render_battle_outcome(&self, winner: BattleSide, event: OutcomeEvent)
        -> LocalBoxFuture<'_, ()>;

    /// Start fading out the winner.
    fn fade_out_winner(&self, _winner: BattleSide) {}

    // === Pack reveal ===

    /// Show the stacked pack.
    fn begin_reveal(&self, cards: &[CardId]);

    /// Wait for the user to reveal (or dismiss) the top card.
    fn await_reveal(&self, card: &CardId) -> LocalBoxFuture<'_, RevealStep>;

    /// Fly the revealed card off the stack.
    fn animate_reveal(&self, card: &CardId) -> LocalBoxFuture<'_, ()>;

    /// Close the pack overlay.
    fn end_reveal(&self);
}
