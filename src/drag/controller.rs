//! Per-card drag state machine.
//!
//! ```text
//! Idle ──down──▶ Pressed ──move > threshold──▶ Dragging
//!                  │                             │
//!                  └──up──▶ Idle (tap)           ├──up, zone accepts──▶ Idle
//!                                                └──up, no zone──▶ Returning ──finish──▶ Idle
//! ```
//!
//! The controller is pure: it never touches the UI. Zone decisions are
//! delegated to a `DropTarget`, and cosmetic feedback is returned to the
//! caller as `DragVisual`s.

use crate::battle::BattleSide;
use crate::cards::CardId;
use crate::core::geometry::{Point, Vec2};
use crate::presentation::DragVisual;

use super::physics::{drag_visual, inertial_overshoot};

/// Drag tuning taken from `AlbumConfig`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragTuning {
    /// Distance that must be strictly exceeded to start dragging.
    pub threshold: f64,
    /// Tilt clamp in degrees.
    pub max_tilt_deg: f64,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            threshold: 6.0,
            max_tilt_deg: 6.0,
        }
    }
}

/// Conditions that block a press outright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressGuard {
    /// A battle is running.
    pub battle_active: bool,
    /// The card sits in the display zone.
    pub display_locked: bool,
}

impl PressGuard {
    #[must_use]
    pub fn blocks(&self) -> bool {
        self.battle_active || self.display_locked
    }
}

/// Zone that consumed a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropZone {
    Display,
    Battle(BattleSide),
}

/// Something that can accept a dropped card.
///
/// Asked in order: display zone first, then battle zone.
pub trait DropTarget {
    /// Accept the card into the display zone.
    fn try_display_zone(&mut self, card: &CardId, point: Point) -> bool;

    /// Accept the card into an empty battle slot.
    fn try_battle_zone(&mut self, card: &CardId, point: Point) -> Option<BattleSide>;
}

/// Spring-back parameters for a drop that missed every zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnPath {
    /// Where the card coasts to before heading home.
    pub overshoot: Vec2,
    /// Which spring-back of this card the path belongs to. Only the
    /// latest one may finish the return.
    pub generation: u64,
}

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    /// No pointer captured.
    Idle,
    /// Pointer down, not yet past the threshold.
    Pressed { start: Point, last: Point },
    /// Card follows the pointer.
    Dragging {
        start: Point,
        last: Point,
        velocity: Vec2,
    },
    /// Springing back home.
    Returning(ReturnPath),
}

/// What a pointer event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutput {
    /// Event ignored (guarded, or nothing captured).
    Ignored,
    /// Pointer captured.
    Pressed,
    /// Still within the threshold.
    Held,
    /// Threshold just exceeded.
    Started(DragVisual),
    /// Card moved.
    Moved(DragVisual),
    /// Released without dragging.
    Tap,
    /// A zone took the card.
    Dropped(DropZone),
    /// No zone took it; play the return animation.
    Returning(ReturnPath),
}

/// Drag controller attached to one album card.
#[derive(Clone, Debug)]
pub struct DragController {
    card: CardId,
    tuning: DragTuning,
    state: DragState,
    returns: u64,
}

impl DragController {
    #[must_use]
    pub fn new(card: CardId, tuning: DragTuning) -> Self {
        Self {
            card,
            tuning,
            state: DragState::Idle,
            returns: 0,
        }
    }

    #[must_use]
    pub fn card(&self) -> &CardId {
        &self.card
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Check if the card is following the pointer.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Capture the pointer.
    ///
    /// Accepted from `Idle`, and from `Returning` (grabbing a card mid
    /// spring-back restarts from its natural position).
    pub fn pointer_down(&mut self, pos: Point, guard: PressGuard) -> DragOutput {
        if guard.blocks() {
            return DragOutput::Ignored;
        }
        match self.state {
            DragState::Idle | DragState::Returning(_) => {
                self.state = DragState::Pressed {
                    start: pos,
                    last: pos,
                };
                DragOutput::Pressed
            }
            DragState::Pressed { .. } | DragState::Dragging { .. } => DragOutput::Ignored,
        }
    }

    /// Track the pointer. Events must arrive in order.
    pub fn pointer_move(&mut self, pos: Point) -> DragOutput {
        match self.state {
            DragState::Pressed { start, .. } => {
                if pos.distance(start) <= self.tuning.threshold {
                    self.state = DragState::Pressed { start, last: pos };
                    return DragOutput::Held;
                }
                // Velocity of the activating frame is measured from the press.
                let velocity = pos.offset_from(start);
                self.state = DragState::Dragging {
                    start,
                    last: pos,
                    velocity,
                };
                DragOutput::Started(drag_visual(velocity, velocity, self.tuning.max_tilt_deg))
            }
            DragState::Dragging { start, last, .. } => {
                let velocity = pos.offset_from(last);
                self.state = DragState::Dragging {
                    start,
                    last: pos,
                    velocity,
                };
                DragOutput::Moved(drag_visual(
                    pos.offset_from(start),
                    velocity,
                    self.tuning.max_tilt_deg,
                ))
            }
            DragState::Idle | DragState::Returning(_) => DragOutput::Ignored,
        }
    }

    /// Release the pointer at `pos`.
    pub fn pointer_up(&mut self, pos: Point, target: &mut impl DropTarget) -> DragOutput {
        match self.state {
            DragState::Pressed { .. } => {
                self.state = DragState::Idle;
                DragOutput::Tap
            }
            DragState::Dragging {
                start, velocity, ..
            } => {
                if target.try_display_zone(&self.card, pos) {
                    self.state = DragState::Idle;
                    return DragOutput::Dropped(DropZone::Display);
                }
                if let Some(side) = target.try_battle_zone(&self.card, pos) {
                    self.state = DragState::Idle;
                    return DragOutput::Dropped(DropZone::Battle(side));
                }
                self.returns += 1;
                let path = ReturnPath {
                    overshoot: inertial_overshoot(pos.offset_from(start), velocity),
                    generation: self.returns,
                };
                self.state = DragState::Returning(path);
                DragOutput::Returning(path)
            }
            DragState::Idle | DragState::Returning(_) => DragOutput::Ignored,
        }
    }

    /// Pointer capture was lost: release at the last known position.
    pub fn capture_lost(&mut self, target: &mut impl DropTarget) -> DragOutput {
        match self.state {
            DragState::Pressed { last, .. } | DragState::Dragging { last, .. } => {
                self.pointer_up(last, target)
            }
            DragState::Idle | DragState::Returning(_) => DragOutput::Ignored,
        }
    }

    /// The return animation finished (or its fallback fired).
    ///
    /// Returns `false` if the card is not on the `generation` spring-back
    /// any more: it was grabbed again mid-animation, and possibly missed
    /// again into a newer spring-back.
    pub fn finish_return(&mut self, generation: u64) -> bool {
        match self.state {
            DragState::Returning(path) if path.generation == generation => {
                self.state = DragState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any gesture in progress.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Target {
        display: bool,
        battle: Option<BattleSide>,
        asked: Vec<&'static str>,
    }

    impl DropTarget for Target {
        fn try_display_zone(&mut self, _card: &CardId, _point: Point) -> bool {
            self.asked.push("display");
            self.display
        }

        fn try_battle_zone(&mut self, _card: &CardId, _point: Point) -> Option<BattleSide> {
            self.asked.push("battle");
            self.battle
        }
    }

    fn controller() -> DragController {
        DragController::new(CardId::parse("a-01").unwrap(), DragTuning::default())
    }

    #[test]
    fn test_tap() {
        let mut drag = controller();
        let mut target = Target::default();

        assert_eq!(drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default()), DragOutput::Pressed);
        assert_eq!(drag.pointer_move(Point::new(3.0, 3.0)), DragOutput::Held);
        assert_eq!(drag.pointer_up(Point::new(3.0, 3.0), &mut target), DragOutput::Tap);
        assert_eq!(drag.state(), DragState::Idle);
        assert!(target.asked.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut drag = controller();
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());

        assert_eq!(drag.pointer_move(Point::new(6.0, 0.0)), DragOutput::Held);
        assert!(!drag.is_dragging());

        assert!(matches!(drag.pointer_move(Point::new(7.0, 0.0)), DragOutput::Started(_)));
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_guard_blocks_press() {
        let mut drag = controller();
        let battle = PressGuard {
            battle_active: true,
            display_locked: false,
        };
        let locked = PressGuard {
            battle_active: false,
            display_locked: true,
        };
        assert_eq!(drag.pointer_down(Point::default(), battle), DragOutput::Ignored);
        assert_eq!(drag.pointer_down(Point::default(), locked), DragOutput::Ignored);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_moves_track_velocity_and_translation() {
        let mut drag = controller();
        drag.pointer_down(Point::new(10.0, 10.0), PressGuard::default());
        drag.pointer_move(Point::new(20.0, 10.0));

        let DragOutput::Moved(visual) = drag.pointer_move(Point::new(25.0, 12.0)) else {
            panic!("expected a move");
        };
        assert_eq!(visual.translation, Vec2::new(15.0, 2.0));
        assert_eq!(visual.velocity, Vec2::new(5.0, 2.0));
        assert_eq!(visual.tilt_deg, 1.0);
    }

    #[test]
    fn test_display_checked_first_and_short_circuits() {
        let mut drag = controller();
        let mut target = Target {
            display: true,
            battle: Some(BattleSide::Left),
            ..Target::default()
        };
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        drag.pointer_move(Point::new(50.0, 0.0));

        let out = drag.pointer_up(Point::new(50.0, 0.0), &mut target);
        assert_eq!(out, DragOutput::Dropped(DropZone::Display));
        assert_eq!(target.asked, vec!["display"]);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_battle_drop() {
        let mut drag = controller();
        let mut target = Target {
            battle: Some(BattleSide::Right),
            ..Target::default()
        };
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        drag.pointer_move(Point::new(0.0, 50.0));

        let out = drag.pointer_up(Point::new(0.0, 50.0), &mut target);
        assert_eq!(out, DragOutput::Dropped(DropZone::Battle(BattleSide::Right)));
        assert_eq!(target.asked, vec!["display", "battle"]);
    }

    #[test]
    fn test_missed_drop_returns() {
        let mut drag = controller();
        let mut target = Target::default();
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        drag.pointer_move(Point::new(10.0, 0.0));
        drag.pointer_move(Point::new(12.0, 0.0));

        let out = drag.pointer_up(Point::new(12.0, 0.0), &mut target);
        let expected = ReturnPath {
            overshoot: Vec2::new(12.0 + 2.0 * 8.0, 0.0),
            generation: 1,
        };
        assert_eq!(out, DragOutput::Returning(expected));
        assert_eq!(drag.state(), DragState::Returning(expected));

        assert!(drag.finish_return(1));
        assert!(!drag.finish_return(1));
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_press_while_returning() {
        let mut drag = controller();
        let mut target = Target::default();
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        drag.pointer_move(Point::new(30.0, 0.0));
        drag.pointer_up(Point::new(30.0, 0.0), &mut target);

        assert_eq!(drag.pointer_down(Point::new(1.0, 1.0), PressGuard::default()), DragOutput::Pressed);
        assert!(!drag.finish_return(1));
    }

    #[test]
    fn test_stale_return_cannot_finish_newer_one() {
        let mut drag = controller();
        let mut target = Target::default();
        let mut miss = |drag: &mut DragController| {
            drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
            drag.pointer_move(Point::new(30.0, 0.0));
            match drag.pointer_up(Point::new(30.0, 0.0), &mut target) {
                DragOutput::Returning(path) => path.generation,
                other => panic!("expected a spring-back, got {other:?}"),
            }
        };

        let first = miss(&mut drag);
        let second = miss(&mut drag);
        assert_eq!(second, first + 1);

        assert!(!drag.finish_return(first));
        assert!(matches!(drag.state(), DragState::Returning(_)));
        assert!(drag.finish_return(second));
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_capture_lost_uses_last_position() {
        let mut drag = controller();
        let mut target = Target::default();
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        drag.pointer_move(Point::new(20.0, 0.0));

        let out = drag.capture_lost(&mut target);
        assert!(matches!(out, DragOutput::Returning(_)));
        assert_eq!(target.asked, vec!["display", "battle"]);

        assert_eq!(drag.capture_lost(&mut target), DragOutput::Ignored);
    }

    #[test]
    fn test_capture_lost_while_pressed_is_tap() {
        let mut drag = controller();
        let mut target = Target::default();
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        assert_eq!(drag.capture_lost(&mut target), DragOutput::Tap);
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut drag = controller();
        let mut target = Target::default();
        assert_eq!(drag.pointer_move(Point::new(50.0, 50.0)), DragOutput::Ignored);
        assert_eq!(drag.pointer_up(Point::new(50.0, 50.0), &mut target), DragOutput::Ignored);
    }

    #[test]
    fn test_second_press_ignored_while_captured() {
        let mut drag = controller();
        drag.pointer_down(Point::new(0.0, 0.0), PressGuard::default());
        assert_eq!(drag.pointer_down(Point::new(5.0, 5.0), PressGuard::default()), DragOutput::Ignored);
    }
}
