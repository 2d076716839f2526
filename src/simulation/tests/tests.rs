use std::f32::consts::FRAC_PI_4;

use super::*;
use crate::bridge::protocol::HoverPhase;
use crate::core::vec2::Vec2;
use crate::domain::config::EngineProfile;

fn grid_cloud(n: usize, width: f32, height: f32) -> Vec<TargetPoint> {
    let cols = (n as f32).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let cx = (i % cols) as f32 / cols as f32;
            let cy = (i / cols) as f32 / cols as f32;
            TargetPoint::new(width * (0.2 + 0.6 * cx), height * (0.2 + 0.6 * cy))
        })
        .collect()
}

fn init_params(n: usize, width: f32, height: f32) -> InitParams {
    InitParams {
        width,
        height,
        target_points: grid_cloud(n, width, height),
        config: SimulationConfig::default(),
    }
}

fn themed(n: usize) -> SimulationState {
    SimulationState::new(init_params(n, 400.0, 300.0)).unwrap()
}

fn classic(n: usize, width: f32, height: f32) -> SimulationState {
    let mut params = init_params(n, width, height);
    params.config.profile = EngineProfile::Classic;
    SimulationState::new(params).unwrap()
}

#[test]
fn init_sizes_buffers_to_cloud() {
    let state = SimulationState::new(init_params(120, 400.0, 300.0)).unwrap();

    assert_eq!(state.particle_count(), 120);
    assert_eq!(state.store().vel_y.len(), 120);
    assert_eq!(state.store().visual_state.len(), 120);
    assert_eq!(state.store().generation(), 1);
    assert_eq!(state.frame(), 0);
    assert_eq!(state.tree().len(), 120);
    assert_eq!((state.framebuffer().width(), state.framebuffer().height()), (400, 300));
}

#[test]
fn init_rejects_empty_cloud_and_bad_viewport() {
    let mut empty = init_params(1, 400.0, 300.0);
    empty.target_points.clear();
    assert!(SimulationState::new(empty).is_err());

    assert!(SimulationState::new(init_params(10, f32::NAN, 300.0)).is_err());
    assert!(SimulationState::new(init_params(10, 400.0, -1.0)).is_err());
}

#[test]
fn init_sanitizes_config() {
    let mut params = init_params(10, 400.0, 300.0);
    params.config.max_speed = f32::INFINITY;
    params.config.cell_size = 0;
    let state = SimulationState::new(params).unwrap();

    assert_eq!(state.config().max_speed, 4.0);
    assert_eq!(state.steering_params().max_speed, 4.0);
    assert_eq!(state.tree().capacity(), 1);
}

#[test]
fn same_inputs_give_same_trajectories() {
    let mut a = SimulationState::new(init_params(200, 500.0, 400.0)).unwrap();
    let mut b = SimulationState::new(init_params(200, 500.0, 400.0)).unwrap();
    a.set_pointer(250.0, 200.0);
    b.set_pointer(250.0, 200.0);

    for _ in 0..40 {
        a.step();
        b.step();
    }

    assert_eq!(a.store().pos_x, b.store().pos_x);
    assert_eq!(a.store().pos_y, b.store().pos_y);
    assert_eq!(a.store().vel_x, b.store().vel_x);
}

#[test]
fn speed_and_position_stay_bounded() {
    let mut state = SimulationState::new(init_params(300, 320.0, 240.0)).unwrap();
    let max_speed = state.config().max_speed;
    let buffer = state.config().edge_buffer;

    for frame in 0..200 {
        // Sweep the pointer through the flock to keep things lively
        state.set_pointer((frame * 7 % 320) as f32, 120.0);
        state.step();

        let store = state.store();
        for i in 0..store.len() {
            let v = store.velocity(i);
            assert!(v.is_finite());
            assert!(v.length() <= max_speed + 1e-3, "particle {} speed {}", i, v.length());

            let p = store.position(i);
            assert!(p.x >= -buffer && p.x <= 320.0 + buffer, "x {} escaped", p.x);
            assert!(p.y >= -buffer && p.y <= 240.0 + buffer, "y {} escaped", p.y);
        }
    }
    assert_eq!(state.frame(), 200);
}

#[test]
fn particles_settle_near_their_targets() {
    let mut params = init_params(16, 400.0, 300.0);
    // Flocking off: only the pull toward the shape remains
    params.config.max_neighbors = 0;
    let mut state = SimulationState::new(params).unwrap();

    let start: f32 = (0..16).map(|i| (state.store().target(i) - state.store().position(i)).length()).sum();
    for _ in 0..600 {
        state.step();
    }
    let end: f32 = (0..16).map(|i| (state.store().target(i) - state.store().position(i)).length()).sum();

    assert!(end < start * 0.25, "start {} end {}", start, end);
}

#[test]
fn small_resize_keeps_particles() {
    let mut state = SimulationState::new(init_params(80, 400.0, 600.0)).unwrap();
    for _ in 0..10 {
        state.step();
    }
    let before_x = state.store().pos_x.clone();
    let before_y = state.store().pos_y.clone();

    // Mobile keyboard: height drops by less than the tolerance
    let outcome = state
        .resize(ResizeParams { width: 405.0, height: 490.0, target_points: grid_cloud(30, 405.0, 490.0) })
        .unwrap();

    assert_eq!(outcome, ResizeOutcome::Relayout);
    assert_eq!(state.store().pos_x, before_x);
    assert_eq!(state.store().pos_y, before_y);
    assert_eq!(state.particle_count(), 80);
    assert_eq!(state.store().generation(), 1);
    assert_eq!((state.width(), state.height()), (405.0, 490.0));
    assert_eq!(state.framebuffer().height(), 490);
}

#[test]
fn shrinking_relayout_keeps_every_particle_indexed() {
    let mut state = SimulationState::new(init_params(40, 400.0, 600.0)).unwrap();
    // Flock resting along the bottom edge
    for i in 0..state.particle_count() {
        state.store.pos_x[i] = 10.0 + i as f32 * 9.0;
        state.store.pos_y[i] = 595.0;
    }

    let outcome = state
        .resize(ResizeParams { width: 400.0, height: 482.0, target_points: Vec::new() })
        .unwrap();

    assert_eq!(outcome, ResizeOutcome::Relayout);
    assert_eq!(state.tree().len(), state.particle_count());

    state.step();
    assert_eq!(state.tree().len(), state.particle_count());
}

#[test]
fn large_resize_rebuilds_from_new_cloud() {
    let mut state = SimulationState::new(init_params(80, 400.0, 600.0)).unwrap();
    state.step();

    let outcome = state
        .resize(ResizeParams { width: 400.0, height: 800.0, target_points: grid_cloud(50, 400.0, 800.0) })
        .unwrap();

    assert_eq!(outcome, ResizeOutcome::Rebuilt);
    assert_eq!(state.particle_count(), 50);
    assert_eq!(state.store().target_y.len(), 50);
    assert_eq!(state.store().visual_state.len(), 50);
    assert_eq!(state.store().generation(), 2);
    assert_eq!(state.tree().len(), 50);

    let outcome = state
        .resize(ResizeParams { width: 300.0, height: 800.0, target_points: grid_cloud(20, 300.0, 800.0) })
        .unwrap();
    assert_eq!(outcome, ResizeOutcome::Rebuilt);
    assert_eq!(state.particle_count(), 20);
}

#[test]
fn large_resize_without_cloud_fails_and_keeps_state() {
    let mut state = SimulationState::new(init_params(30, 400.0, 300.0)).unwrap();
    let result = state.resize(ResizeParams { width: 900.0, height: 300.0, target_points: Vec::new() });

    assert!(result.is_err());
    assert_eq!(state.particle_count(), 30);
    assert_eq!(state.store().generation(), 1);
}

#[test]
fn retarget_keeps_viewport() {
    let mut state = SimulationState::new(init_params(30, 400.0, 300.0)).unwrap();
    state.retarget(&grid_cloud(45, 400.0, 300.0)).unwrap();

    assert_eq!(state.particle_count(), 45);
    assert_eq!((state.width(), state.height()), (400.0, 300.0));
    assert!(state.retarget(&[]).is_err());
    assert_eq!(state.particle_count(), 45);
}

#[test]
fn hover_redirects_every_particle_within_one_tick() {
    let mut state = SimulationState::new(init_params(60, 400.0, 300.0)).unwrap();
    state.step();

    let hover = Vec2::new(20.0, 15.0);
    // Pointer right on the flock; hovering must silence it
    state.set_pointer(200.0, 150.0);
    state.hover(HoverParams { subtype: HoverPhase::Start, x: Some(hover.x), y: Some(hover.y) });

    for i in 0..state.particle_count() {
        let b = state.steering_breakdown(i).unwrap();
        assert!(b.hovering);
        assert_eq!(b.pointer, Vec2::ZERO);

        let to_hover = hover - state.store().position(i);
        assert!(to_hover.angle_to(b.target).abs() <= FRAC_PI_4 + 1e-4);
        assert!((b.target.length() - 1.0).abs() < 1e-4);
    }

    state.hover(HoverParams { subtype: HoverPhase::End, x: None, y: None });
    let b = state.steering_breakdown(0).unwrap();
    assert!(!b.hovering);
    assert!(state.steering_breakdown(state.particle_count()).is_none());
}

#[test]
fn hover_without_coordinates_uses_pointer() {
    let mut state = SimulationState::new(init_params(10, 400.0, 300.0)).unwrap();
    state.set_pointer(33.0, 44.0);
    state.hover(HoverParams { subtype: HoverPhase::Start, x: None, y: None });

    let hover = state.hover_state();
    assert!(hover.active);
    assert_eq!((hover.x, hover.y), (33.0, 44.0));
}

#[test]
fn hover_without_coordinates_or_pointer_gathers_at_centre() {
    let mut state = SimulationState::new(init_params(10, 400.0, 300.0)).unwrap();
    state.hover(HoverParams { subtype: HoverPhase::Start, x: None, y: None });

    let hover = state.hover_state();
    assert!(hover.active);
    assert_eq!((hover.x, hover.y), (200.0, 150.0));

    // Only one coordinate given: the other comes from the centre
    state.hover(HoverParams { subtype: HoverPhase::Start, x: Some(20.0), y: None });
    assert_eq!((state.hover_state().x, state.hover_state().y), (20.0, 150.0));
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut state = SimulationState::new(init_params(10, 400.0, 300.0)).unwrap();
    state.set_pointer(10.0, 20.0);
    state.set_pointer(f32::NAN, 5.0);

    assert_eq!(state.pointer().position(), Vec2::new(10.0, 20.0));
}

#[test]
fn default_config_follows_theme() {
    let mut state = SimulationState::new(init_params(10, 400.0, 300.0)).unwrap();
    let light = *state.palette();
    state.set_theme(true);
    assert_ne!(*state.palette(), light);
}

#[test]
fn theme_changes_pixels_not_physics() {
    let mut light = themed(150);
    let mut dark = themed(150);
    dark.set_theme(true);

    for _ in 0..60 {
        light.step();
        dark.step();
    }
    assert_eq!(light.store().pos_x, dark.store().pos_x);
    assert_eq!(light.store().pos_y, dark.store().pos_y);

    light.render();
    dark.render();
    assert_ne!(light.framebuffer().pixels(), dark.framebuffer().pixels());
}

#[test]
fn classic_profile_ignores_theme() {
    let mut a = classic(50, 200.0, 200.0);
    let mut b = classic(50, 200.0, 200.0);
    b.set_theme(true);

    a.render();
    b.render();
    assert_eq!(a.framebuffer().pixels(), b.framebuffer().pixels());
    assert!(a.framebuffer().pixels().iter().any(|&c| c != 0));
}

#[test]
fn themed_profile_fades_in() {
    let mut state = themed(50);
    state.render();
    assert!(state.framebuffer().pixels().iter().all(|&c| c == 0));

    for _ in 0..5 {
        state.step();
    }
    state.render();
    let early_max_alpha = state.framebuffer().pixels().chunks_exact(4).map(|px| px[3]).max().unwrap_or(0);
    assert!(early_max_alpha > 0);

    for _ in 0..60 {
        state.step();
    }
    state.render();
    let late_max_alpha = state.framebuffer().pixels().chunks_exact(4).map(|px| px[3]).max().unwrap_or(0);
    assert!(late_max_alpha > early_max_alpha);
}

#[test]
fn fade_alpha_ramps_linearly() {
    assert_eq!(render_frame::fade_alpha(0, 0), 1.0);
    assert_eq!(render_frame::fade_alpha(0, 45), 0.0);
    assert!((render_frame::fade_alpha(9, 45) - 0.2).abs() < 1e-6);
    assert_eq!(render_frame::fade_alpha(90, 45), 1.0);
}

#[test]
fn perf_stats_only_when_enabled() {
    let mut state = SimulationState::new(init_params(64, 400.0, 300.0)).unwrap();
    state.step();
    assert_eq!(state.get_perf_stats(), PerfStats::default());

    state.enable_perf_metrics(true);
    state.step();
    state.render();
    let stats = state.get_perf_stats();
    assert_eq!(stats.particle_count(), 64);
    assert_eq!(stats.indexed_points(), 64);
    assert_eq!(stats.frame(), 2);
    assert!(stats.quadtree_nodes() >= 1);
    assert!(stats.step_ms() >= 0.0);

    state.enable_perf_metrics(false);
    assert_eq!(state.get_perf_stats(), PerfStats::default());
}

#[test]
fn detailed_metrics_imply_perf_metrics() {
    let mut state = SimulationState::new(init_params(8, 100.0, 100.0)).unwrap();
    state.enable_perf_detailed_metrics(true);
    assert!(state.perf_detailed());

    state.step();
    assert_eq!(state.get_perf_stats().particle_count(), 8);
}
