//! Murmur Engine - boid flocking that assembles into target shapes, in WASM
//!
//! Particles seek their own point of a target cloud (text or image), flock with
//! their visual group, scatter from the pointer and gather on hover. The whole
//! simulation runs inside a dedicated worker and draws to a transferred canvas.
//!
//! Architecture:
//! - core/        - Vec2 math, SoA particle buffers, RNG, macros
//! - spatial/     - arena quad-tree for neighbour queries
//! - domain/      - config, palettes, target points
//! - systems/     - steering model (flocking, target, pointer, integrate)
//! - simulation/  - SimulationState: one flock, tick orchestration, rendering
//! - bridge/      - message protocol, state machine, worker hosts
//! - shapes/      - target cloud builders (image alpha, bitmap text)

// Macros must be declared first so every later module sees them
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod bridge;
pub mod shapes;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Thread pool for the parallel steering pass (call from JS before the first tick)
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{ParticleStore, Vec2};
pub use bridge::{Envelope, InboundMessage, InitParams, OutboundMessage, SimulationHost};
pub use domain::{EngineProfile, SimulationConfig, TargetPoint};
pub use simulation::{FrameBuffer, PerfStats, PixelSink, RenderSurface, ResizeOutcome, SimulationState};
pub use spatial::QuadTree;

#[cfg(not(target_arch = "wasm32"))]
pub use bridge::{spawn_worker, WorkerHandle, OUTBOX_CAPACITY};

#[cfg(target_arch = "wasm32")]
pub use bridge::BoidWorker;
