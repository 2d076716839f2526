//! SteeringModel - per-particle force evaluation
//!
//! Five weighted contributions per particle:
//! - separation / alignment / cohesion from same-group neighbours (flocking.rs)
//! - target seeking toward the particle's own shape point, or the hover point (forces.rs)
//! - pointer repulsion, disabled while a hover is active (forces.rs)
//!
//! Evaluation only reads the store and the spatial index, so every particle of a
//! tick can be evaluated independently before `integrate` writes anything back.

mod flocking;
mod forces;
mod integrate;

pub use flocking::{flocking_forces, FlockForces};
pub use forces::{pointer_force, target_force};
pub use integrate::{integrate_particle, wrap_axis};

use crate::core::particles::ParticleStore;
use crate::core::random::particle_signed_unit;
use crate::core::vec2::Vec2;
use crate::domain::config::SimulationConfig;
use crate::spatial::quadtree::{Circle, QuadPoint, QuadTree};

/// Far enough off any canvas that repulsion never reaches a particle
pub const POINTER_OFFSCREEN: f32 = -100_000.0;

/// Steering constants resolved from a sanitized `SimulationConfig`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringParams {
    pub neighbor_radius: f32,
    pub max_neighbors: usize,
    pub mouse_influence_radius: f32,
    pub max_speed: f32,
    pub edge_buffer: f32,

    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub target_weight: f32,
    pub hover_target_weight: f32,
    pub pointer_weight: f32,

    pub force_scale: f32,
    pub damping: f32,
    pub arrival_epsilon_sq: f32,
    pub hover_jitter: f32,
}

impl SteeringParams {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            neighbor_radius: config.neighbor_radius,
            max_neighbors: config.max_neighbors as usize,
            mouse_influence_radius: config.mouse_influence_radius,
            max_speed: config.max_speed,
            edge_buffer: config.edge_buffer,
            separation_weight: config.separation_weight,
            alignment_weight: config.alignment_weight,
            cohesion_weight: config.cohesion_weight,
            target_weight: config.target_weight(),
            hover_target_weight: config.hover_target_weight,
            pointer_weight: config.pointer_weight,
            force_scale: config.force_scale,
            damping: config.damping,
            arrival_epsilon_sq: config.arrival_epsilon_sq,
            hover_jitter: config.hover_jitter,
        }
    }
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

/// Last known repulsion source
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self { x: POINTER_OFFSCREEN, y: POINTER_OFFSCREEN }
    }
}

impl PointerState {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// "Gather here" override for target seeking
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverState {
    pub active: bool,
    pub x: f32,
    pub y: f32,
}

impl HoverState {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Everything outside the store that a tick reads
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Environment {
    pub pointer: PointerState,
    pub hover: HoverState,
    pub seed: u32,
    pub frame: u64,
}

/// Unweighted force components of one particle for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteeringBreakdown {
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub target: Vec2,
    pub pointer: Vec2,
    /// Same-group neighbours that contributed
    pub neighbors: u32,
    pub hovering: bool,
}

impl SteeringBreakdown {
    /// Weighted sum; pointer repulsion dominates so the cursor parts the flock
    pub fn acceleration(&self, params: &SteeringParams) -> Vec2 {
        let target_weight = if self.hovering {
            params.hover_target_weight
        } else {
            params.target_weight
        };

        self.separation * params.separation_weight
            + self.alignment * params.alignment_weight
            + self.cohesion * params.cohesion_weight
            + self.target * target_weight
            + self.pointer * params.pointer_weight
    }
}

/// Evaluate every force on particle `i`.
///
/// `scratch` is reused between calls to hold the neighbourhood query.
pub fn evaluate(
    i: usize,
    store: &ParticleStore,
    tree: &QuadTree,
    env: &Environment,
    params: &SteeringParams,
    scratch: &mut Vec<QuadPoint>,
) -> SteeringBreakdown {
    let pos = store.position(i);

    scratch.clear();
    if params.max_neighbors > 0 && params.neighbor_radius > 0.0 {
        tree.query(&Circle::new(pos.x, pos.y, params.neighbor_radius), scratch);
    }
    let flock = flocking_forces(i, store, scratch, params.max_neighbors);

    let jitter = particle_signed_unit(env.seed, env.frame, i) * params.hover_jitter;
    let target = target_force(pos, store.target(i), &env.hover, jitter, params.arrival_epsilon_sq);

    let pointer = if env.hover.active {
        Vec2::ZERO
    } else {
        pointer_force(pos, env.pointer.position(), params.mouse_influence_radius)
    };

    SteeringBreakdown {
        separation: flock.separation,
        alignment: flock.alignment,
        cohesion: flock.cohesion,
        target,
        pointer,
        neighbors: flock.count,
        hovering: env.hover.active,
    }
}
