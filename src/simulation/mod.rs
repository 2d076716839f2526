//! SimulationState - one flock, owned by one execution context
//!
//! All mutable simulation state lives in this struct and is passed explicitly to
//! every phase; there are no globals, so several flocks can coexist and tests
//! construct them directly.
//!
//! A tick:
//! 1. rebuild the quad-tree from current positions
//! 2. evaluate the steering model for every particle (parallel with `parallel`)
//! 3. integrate velocities/positions and wrap at the overscan border
//! 4. draw into the frame buffer (`render`)

use crate::core::particles::{ParticleStore, SeedParams};
use crate::domain::config::{ResizeTolerance, SimulationConfig};
use crate::domain::palette::Palette;
use crate::domain::points::TargetPoint;
use crate::spatial::quadtree::{QuadPoint, QuadTree, Rect};
use crate::systems::steering::{self, Environment, HoverState, PointerState, SteeringBreakdown, SteeringParams};

use crate::bridge::protocol::{HoverParams, InitParams, ResizeParams};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_frame.rs"]
mod render_frame;
#[path = "render/surface.rs"]
pub mod surface;

pub use perf_stats::PerfStats;
pub use surface::{FrameBuffer, PixelSink, RenderSurface};

pub(crate) use perf_timer::PerfTimer;
#[cfg(target_arch = "wasm32")]
pub(crate) use perf_timer::now_ms;

/// What a `resize` did to the particles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Small change: viewport updated, particles untouched
    Relayout,
    /// Large change: particles reseeded from the new cloud
    Rebuilt,
}

/// Result of one particle's steering evaluation, kept between the two passes
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Steer {
    pub(crate) acceleration: crate::core::vec2::Vec2,
    pub(crate) neighbors: u32,
}

/// The simulation world
pub struct SimulationState {
    config: SimulationConfig,
    params: SteeringParams,
    resize_tolerance: ResizeTolerance,

    store: ParticleStore,
    tree: QuadTree,
    pointer: PointerState,
    hover: HoverState,

    // Render
    is_dark: bool,
    framebuffer: FrameBuffer,

    // State
    frame: u64,
    frames_since_seed: u64,

    // Per-tick scratch, kept to avoid reallocating every frame
    steer: Vec<Steer>,
    #[cfg_attr(feature = "parallel", allow(dead_code))]
    scratch: Vec<QuadPoint>,

    // Perf metrics
    perf_enabled: bool,
    perf_detailed: bool,
    perf_stats: PerfStats,
}

impl SimulationState {
    /// Build a flock from an `init` message. Fails on an empty or non-finite
    /// target cloud.
    pub fn new(params: InitParams) -> Result<Self, String> {
        init::create_state(params)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn steering_params(&self) -> &SteeringParams {
        &self.params
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn width(&self) -> f32 {
        self.store.width()
    }

    pub fn height(&self) -> f32 {
        self.store.height()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn palette(&self) -> &'static Palette {
        Palette::resolve(self.config.theme_aware(), self.is_dark)
    }

    // === SETTINGS ===

    pub fn set_theme(&mut self, is_dark: bool) {
        settings::set_theme(self, is_dark);
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Detailed metrics are also posted across the bridge every tick
    pub fn enable_perf_detailed_metrics(&mut self, enabled: bool) {
        settings::enable_perf_detailed_metrics(self, enabled);
    }

    pub fn perf_detailed(&self) -> bool {
        self.perf_detailed
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === COMMANDS ===

    /// Apply a viewport change; rebuilds only past the resize tolerance
    pub fn resize(&mut self, params: ResizeParams) -> Result<ResizeOutcome, String> {
        commands::resize(self, params)
    }

    /// Reseed every particle toward a new shape at the current viewport
    pub fn retarget(&mut self, points: &[TargetPoint]) -> Result<(), String> {
        commands::retarget(self, points)
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        commands::set_pointer(self, x, y);
    }

    pub fn hover(&mut self, params: HoverParams) {
        commands::hover(self, params);
    }

    // === TICK ===

    /// Advance the flock one tick (index, steer, integrate)
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Draw the current state into the frame buffer
    pub fn render(&mut self) {
        render_frame::render(self);
    }

    /// Forces particle `i` would feel right now, against the index built by the
    /// last `step` (or init). Handy for debugging overlays and tests.
    pub fn steering_breakdown(&self, i: usize) -> Option<SteeringBreakdown> {
        if i >= self.store.len() {
            return None;
        }
        let mut scratch = Vec::new();
        Some(steering::evaluate(i, &self.store, &self.tree, &self.environment(), &self.params, &mut scratch))
    }

    fn environment(&self) -> Environment {
        Environment {
            pointer: self.pointer,
            hover: self.hover,
            seed: self.config.seed,
            frame: self.frame,
        }
    }

    fn seed_params(&self) -> SeedParams {
        SeedParams {
            spiral_spread: self.config.spiral_spread,
            burst_speed: self.config.burst_speed,
            max_speed: self.config.max_speed,
        }
    }

    /// Root region for the quad-tree: viewport plus overscan, padded so a particle
    /// sitting exactly on the far wrap edge is still indexed, grown to cover every
    /// particle (a relayout can leave some outside a shrunken viewport).
    fn index_bounds(&self) -> Rect {
        let pad = self.config.edge_buffer + 1.0;
        let (mut left, mut top) = (-pad, -pad);
        let (mut right, mut bottom) = (self.store.width() + pad, self.store.height() + pad);

        for i in 0..self.store.len() {
            let (x, y) = (self.store.pos_x[i], self.store.pos_y[i]);
            if x.is_finite() && y.is_finite() {
                left = left.min(x - 1.0);
                top = top.min(y - 1.0);
                right = right.max(x + 1.0);
                bottom = bottom.max(y + 1.0);
            }
        }
        Rect::from_corners(left, top, right - left, bottom - top)
    }

    /// Clear the tree and insert every particle
    fn rebuild_index(&mut self) {
        let bounds = self.index_bounds();
        self.tree.reset(bounds);
        self.tree.set_capacity(self.config.cell_size as usize);
        for i in 0..self.store.len() {
            self.tree.insert(QuadPoint {
                x: self.store.pos_x[i],
                y: self.store.pos_y[i],
                index: i as u32,
            });
        }
    }
}

/// Canvas size in whole pixels for a logical viewport
fn surface_size(width: f32, height: f32) -> (u32, u32) {
    let w = if width.is_finite() { width.ceil().max(1.0) } else { 1.0 };
    let h = if height.is_finite() { height.ceil().max(1.0) } else { 1.0 };
    (w as u32, h as u32)
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
