//! Drag feedback math.
//!
//! Purely cosmetic: nothing here decides where a card ends up.

use crate::core::geometry::Vec2;
use crate::presentation::DragVisual;

/// Degrees of tilt per px/frame of horizontal velocity.
pub const TILT_PER_VELOCITY: f64 = 0.2;

/// Frames of inertia projected when a drop misses every zone.
pub const INERTIA_FRAMES: f64 = 8.0;

const SHADOW_BASE: f64 = 0.15;
const SHADOW_PER_VELOCITY: f64 = 0.01;
const SHADOW_MAX: f64 = 0.3;
const SHADOW_OFFSET_PER_VELOCITY: f64 = 0.5;

/// Tilt for a horizontal velocity, clamped to `[-max_tilt, max_tilt]`.
#[must_use]
pub fn tilt_for(velocity_x: f64, max_tilt_deg: f64) -> f64 {
    (velocity_x * TILT_PER_VELOCITY).clamp(-max_tilt_deg, max_tilt_deg)
}

/// Feedback for a card displaced by `translation` and moving at `velocity`.
#[must_use]
pub fn drag_visual(translation: Vec2, velocity: Vec2, max_tilt_deg: f64) -> DragVisual {
    let speed_x = velocity.x.abs();
    DragVisual {
        translation,
        velocity,
        tilt_deg: tilt_for(velocity.x, max_tilt_deg),
        shadow_intensity: (speed_x * SHADOW_PER_VELOCITY + SHADOW_BASE).min(SHADOW_MAX),
        shadow_offset: speed_x * SHADOW_OFFSET_PER_VELOCITY,
    }
}

/// Where a released card coasts to before springing back.
#[must_use]
pub fn inertial_overshoot(translation: Vec2, velocity: Vec2) -> Vec2 {
    translation + velocity.scale(INERTIA_FRAMES)
}
