use crate::bridge::protocol::{HoverParams, HoverPhase, ResizeParams};
use crate::domain::points::TargetPoint;
use crate::systems::steering::HoverState;

use super::{surface_size, ResizeOutcome, SimulationState};

pub(super) fn resize(state: &mut SimulationState, params: ResizeParams) -> Result<ResizeOutcome, String> {
    let ResizeParams { width, height, target_points } = params;
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(format!("invalid viewport {}x{}", width, height));
    }

    let dw = width - state.store.width();
    let dh = height - state.store.height();

    let outcome = if state.resize_tolerance.requires_rebuild(dw, dh) {
        let seed = state.seed_params();
        state.store.initialize(&target_points, width, height, seed)?;
        state.frames_since_seed = 0;
        ResizeOutcome::Rebuilt
    } else {
        // Keyboard popping in and out on mobile: keep the shape where it is
        state.store.set_viewport(width, height);
        ResizeOutcome::Relayout
    };

    let (fb_w, fb_h) = surface_size(width, height);
    state.framebuffer.resize(fb_w, fb_h);
    state.rebuild_index();
    Ok(outcome)
}

pub(super) fn retarget(state: &mut SimulationState, points: &[TargetPoint]) -> Result<(), String> {
    let (width, height) = (state.store.width(), state.store.height());
    let seed = state.seed_params();
    state.store.initialize(points, width, height, seed)?;
    state.frames_since_seed = 0;
    state.rebuild_index();
    Ok(())
}

pub(super) fn set_pointer(state: &mut SimulationState, x: f32, y: f32) {
    if x.is_finite() && y.is_finite() {
        state.pointer.x = x;
        state.pointer.y = y;
    }
}

pub(super) fn hover(state: &mut SimulationState, params: HoverParams) {
    match params.subtype {
        HoverPhase::Start => {
            // Missing coordinates gather the flock at the pointer, or at the
            // viewport centre while the pointer is off-canvas
            let (width, height) = (state.store.width(), state.store.height());
            let margin = state.config.edge_buffer;
            let pointer = state.pointer;
            let on_canvas = (-margin..=width + margin).contains(&pointer.x)
                && (-margin..=height + margin).contains(&pointer.y);
            let (fallback_x, fallback_y) = if on_canvas {
                (pointer.x, pointer.y)
            } else {
                (width * 0.5, height * 0.5)
            };

            let x = params.x.filter(|v| v.is_finite()).unwrap_or(fallback_x);
            let y = params.y.filter(|v| v.is_finite()).unwrap_or(fallback_y);
            state.hover = HoverState { active: true, x, y };
        }
        HoverPhase::End => {
            state.hover.active = false;
        }
    }
}
