use crate::core::vec2::Vec2;

use super::HoverState;

/// Unit pull toward the particle's goal.
///
/// Hovering: toward the hover point, rotated by `jitter` radians so the flock
/// swirls in instead of converging rigidly. Otherwise toward `target`, and zero
/// once within `arrival_epsilon_sq` (squared distance) so settled particles stay still.
#[inline]
pub fn target_force(pos: Vec2, target: Vec2, hover: &HoverState, jitter: f32, arrival_epsilon_sq: f32) -> Vec2 {
    if hover.active {
        let to_hover = hover.position() - pos;
        return to_hover.normalize_or_zero().rotate(jitter);
    }

    let to_target = target - pos;
    if to_target.length_squared() < arrival_epsilon_sq {
        return Vec2::ZERO;
    }
    to_target.normalize_or_zero()
}

/// Push away from the pointer.
///
/// Magnitude falls linearly from 1 at the pointer to 0 at `radius`; exactly zero
/// at or beyond it, and when sitting exactly on the pointer (no direction).
#[inline]
pub fn pointer_force(pos: Vec2, pointer: Vec2, radius: f32) -> Vec2 {
    let away = pos - pointer;
    let dist_sq = away.length_squared();
    if radius <= 0.0 || dist_sq >= radius * radius {
        return Vec2::ZERO;
    }

    let dist = dist_sq.sqrt();
    let strength = (radius - dist) / radius;
    away.normalize_or_zero() * strength
}
