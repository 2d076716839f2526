//! ParticleStore - Structure of Arrays (SoA) buffers for the flock
//!
//! Instead of: Vec<Boid { pos, vel, target, group }>
//! We have:    pos_x[], pos_y[], vel_x[], vel_y[], target_x[], target_y[], visual_state[]
//!
//! All arrays always have the same length, equal to the target cloud used by the
//! last `initialize`. `target[i]` stays bound to `cloud[i]` until the next one.

use std::f32::consts::PI;

use crate::core::vec2::Vec2;
use crate::domain::points::{validate_cloud, TargetPoint};

/// PI * (3 - sqrt(5))
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Number of visual groups; flocking only happens inside a group
pub const VISUAL_GROUPS: u8 = 4;

/// Phase advance of the burst-speed sine per particle index (radians)
const BURST_PHASE_STEP: f32 = 0.35;

/// Parameters for the emergence burst seeded by `initialize`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedParams {
    /// Spiral radius as a fraction of the smaller viewport side
    pub spiral_spread: f32,
    pub burst_speed: f32,
    pub max_speed: f32,
}

/// SoA particle buffers
pub struct ParticleStore {
    width: f32,
    height: f32,

    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub target_x: Vec<f32>,
    pub target_y: Vec<f32>,
    pub visual_state: Vec<u8>, // 0..VISUAL_GROUPS

    // Bumped on every (re)initialize so callers can tell a rebuild from a relayout
    generation: u64,
}

impl ParticleStore {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pos_x: Vec::new(),
            pos_y: Vec::new(),
            vel_x: Vec::new(),
            vel_y: Vec::new(),
            target_x: Vec::new(),
            target_y: Vec::new(),
            visual_state: Vec::new(),
            generation: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec2 {
        lane!(self.pos_x, self.pos_y, [i])
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec2 {
        lane!(self.vel_x, self.vel_y, [i])
    }

    #[inline]
    pub fn target(&self, i: usize) -> Vec2 {
        lane!(self.target_x, self.target_y, [i])
    }

    /// Update the logical viewport without touching any particle
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Rebuild every buffer from `cloud` for a `width` x `height` viewport.
    ///
    /// Particles start on a golden-angle spiral around the viewport centre and burst
    /// outward, so the shape emerges instead of snapping into place. The result only
    /// depends on the cloud, the viewport and `params`.
    pub fn initialize(
        &mut self,
        cloud: &[TargetPoint],
        width: f32,
        height: f32,
        params: SeedParams,
    ) -> Result<(), String> {
        validate_cloud(cloud)?;

        let n = cloud.len();
        self.width = width;
        self.height = height;

        self.pos_x.clear();
        self.pos_y.clear();
        self.vel_x.clear();
        self.vel_y.clear();
        self.target_x.clear();
        self.target_y.clear();
        self.visual_state.clear();

        self.pos_x.reserve(n);
        self.pos_y.reserve(n);
        self.vel_x.reserve(n);
        self.vel_y.reserve(n);
        self.target_x.reserve(n);
        self.target_y.reserve(n);
        self.visual_state.reserve(n);

        let center = Vec2::new(width * 0.5, height * 0.5);
        let spread = width.min(height).max(0.0) * params.spiral_spread;

        for (i, point) in cloud.iter().enumerate() {
            let dir = Vec2::from_angle(i as f32 * GOLDEN_ANGLE);
            let radius = spread * ((i as f32 + 0.5) / n as f32).sqrt();
            let pos = center + dir * radius;

            let phase = (i as f32 * BURST_PHASE_STEP) % (2.0 * PI);
            let speed = (params.burst_speed * (0.75 + 0.25 * phase.sin())).min(params.max_speed);
            let vel = dir * speed;

            self.pos_x.push(pos.x);
            self.pos_y.push(pos.y);
            self.vel_x.push(vel.x);
            self.vel_y.push(vel.y);
            self.target_x.push(point.x);
            self.target_y.push(point.y);
            self.visual_state.push((i % VISUAL_GROUPS as usize) as u8);
        }

        self.generation += 1;
        Ok(())
    }
}
