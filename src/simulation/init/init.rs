use crate::core::particles::ParticleStore;
use crate::spatial::quadtree::{QuadTree, Rect};
use crate::systems::steering::{HoverState, PointerState, SteeringParams};

use crate::bridge::protocol::InitParams;
use crate::domain::config::ResizeTolerance;

use super::perf_stats::PerfStats;
use super::surface::FrameBuffer;
use super::{surface_size, SimulationState};

pub(super) fn create_state(params: InitParams) -> Result<SimulationState, String> {
    let InitParams { width, height, target_points, mut config } = params;
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(format!("invalid viewport {}x{}", width, height));
    }

    config.sanitize();
    let (fb_w, fb_h) = surface_size(width, height);
    let capacity = config.cell_size as usize;

    let mut state = SimulationState {
        params: SteeringParams::from_config(&config),
        config,
        resize_tolerance: ResizeTolerance::default(),

        store: ParticleStore::new(width, height),
        tree: QuadTree::new(Rect::from_corners(0.0, 0.0, width, height), capacity),
        pointer: PointerState::default(),
        hover: HoverState::default(),

        is_dark: false,
        framebuffer: FrameBuffer::new(fb_w, fb_h),

        frame: 0,
        frames_since_seed: 0,

        steer: Vec::with_capacity(target_points.len()),
        scratch: Vec::with_capacity(64),

        perf_enabled: false,
        perf_detailed: false,
        perf_stats: PerfStats::default(),
    };

    let seed = state.seed_params();
    state.store.initialize(&target_points, width, height, seed)?;
    state.rebuild_index();

    console_log!(
        "flock ready: {} particles, {}x{}, profile {:?}",
        state.store.len(),
        width,
        height,
        state.config.profile
    );
    Ok(state)
}
