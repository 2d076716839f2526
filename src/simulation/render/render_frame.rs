use super::{PerfTimer, SimulationState};

/// Disc radius per visual group, in pixels
const GROUP_RADIUS: [f32; 4] = [1.0, 1.4, 1.8, 2.2];

pub(super) fn render(state: &mut SimulationState) {
    let t0 = if state.perf_enabled { Some(PerfTimer::start()) } else { None };

    let palette = state.palette();
    let alpha = fade_alpha(state.frames_since_seed, state.config.fade_in_frames());

    state.framebuffer.clear(palette.background);
    if alpha > 0.0 {
        let store = &state.store;
        for i in 0..store.len() {
            let group = store.visual_state[i];
            let mut color = palette.group(group);
            color[3] = (color[3] as f32 * alpha).round() as u8;
            let radius = GROUP_RADIUS[group as usize % GROUP_RADIUS.len()];
            state.framebuffer.fill_disc(store.pos_x[i], store.pos_y[i], radius, color);
        }
    }

    if let Some(t0) = t0 {
        state.perf_stats.render_ms = t0.elapsed_ms();
    }
}

/// Opacity multiplier `frames` ticks after a (re)seed
#[inline]
pub(super) fn fade_alpha(frames: u64, fade_in_frames: u32) -> f32 {
    if fade_in_frames == 0 {
        1.0
    } else {
        (frames as f32 / fade_in_frames as f32).min(1.0)
    }
}
