use crate::core::particles::ParticleStore;
use crate::core::vec2::Vec2;
use crate::spatial::quadtree::QuadPoint;

/// Normalized flocking directions (zero when no neighbour qualified)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlockForces {
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub count: u32,
}

/// Separation, alignment and cohesion for particle `i`.
///
/// Takes the first `max_neighbors` same-group candidates in query order, not the
/// nearest ones. Changing that would change the look of the flock.
pub fn flocking_forces(
    i: usize,
    store: &ParticleStore,
    candidates: &[QuadPoint],
    max_neighbors: usize,
) -> FlockForces {
    let pos = store.position(i);
    let group = store.visual_state[i];

    let mut separation = Vec2::ZERO;
    let mut alignment = Vec2::ZERO;
    let mut cohesion = Vec2::ZERO;
    let mut count = 0usize;

    for candidate in candidates {
        if count >= max_neighbors {
            break;
        }
        let j = candidate.index as usize;
        if j == i || store.visual_state[j] != group {
            continue;
        }

        let other = store.position(j);
        separation += pos - other;
        alignment += store.velocity(j);
        cohesion += other;
        count += 1;
    }

    if count == 0 {
        return FlockForces::default();
    }

    let nc = count as f32;
    FlockForces {
        separation: (separation / nc).normalize_or_zero(),
        alignment: (alignment / nc).normalize_or_zero(),
        // Steer toward the neighbourhood centre
        cohesion: (cohesion / nc - pos).normalize_or_zero(),
        count: count as u32,
    }
}
