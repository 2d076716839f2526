use crate::core::particles::ParticleStore;
use crate::core::vec2::Vec2;

use super::SteeringParams;

/// Toroidal wrap with overscan: leaving past `extent + buffer` re-enters at
/// `-buffer` and vice versa.
#[inline(always)]
pub fn wrap_axis(value: f32, extent: f32, buffer: f32) -> f32 {
    if value > extent + buffer {
        -buffer
    } else if value < -buffer {
        extent + buffer
    } else {
        value
    }
}

/// Apply one tick of `acceleration` to particle `i`:
/// accelerate, damp, clamp to max speed, move, wrap.
#[inline]
pub fn integrate_particle(store: &mut ParticleStore, i: usize, acceleration: Vec2, params: &SteeringParams) {
    // A NaN here would never wash out of the trajectory
    let acceleration = if acceleration.is_finite() { acceleration } else { Vec2::ZERO };

    let mut vel = store.velocity(i) + acceleration * params.force_scale;
    vel *= params.damping;
    vel = vel.clamp_length(params.max_speed);
    if !vel.is_finite() {
        vel = Vec2::ZERO;
    }

    let moved = store.position(i) + vel;
    let pos = Vec2::new(
        wrap_axis(moved.x, store.width(), params.edge_buffer),
        wrap_axis(moved.y, store.height(), params.edge_buffer),
    );

    lane!(store.vel_x, store.vel_y, [i] = vel);
    lane!(store.pos_x, store.pos_y, [i] = pos);
}
