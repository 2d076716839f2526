#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::systems::steering::{self, integrate_particle};

use super::{PerfTimer, SimulationState, Steer};

pub(super) fn step(state: &mut SimulationState) {
    let perf_on = state.perf_enabled;
    if perf_on {
        state.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === INDEX ===
    if perf_on {
        let t0 = PerfTimer::start();
        state.rebuild_index();
        state.perf_stats.index_ms = t0.elapsed_ms();
    } else {
        state.rebuild_index();
    }

    // === STEER ===
    // Forces for every particle are computed against the same snapshot before any
    // particle moves, so the result does not depend on evaluation order.
    if perf_on {
        let t0 = PerfTimer::start();
        compute_steering(state);
        state.perf_stats.steer_ms = t0.elapsed_ms();
    } else {
        compute_steering(state);
    }

    // === INTEGRATE ===
    if perf_on {
        let t0 = PerfTimer::start();
        apply_steering(state);
        state.perf_stats.integrate_ms = t0.elapsed_ms();
    } else {
        apply_steering(state);
    }

    state.frame = state.frame.wrapping_add(1);
    state.frames_since_seed = state.frames_since_seed.saturating_add(1);

    if perf_on {
        state.perf_stats.particle_count = state.store.len() as u32;
        state.perf_stats.quadtree_nodes = state.tree.node_count() as u32;
        state.perf_stats.indexed_points = state.tree.len() as u32;
        state.perf_stats.neighbor_hits = state.steer.iter().map(|s| s.neighbors).sum();
        state.perf_stats.frame = state.frame as u32;
        if let Some(start) = step_start {
            state.perf_stats.step_ms = start.elapsed_ms();
        }
    }
}

#[cfg(feature = "parallel")]
fn compute_steering(state: &mut SimulationState) {
    let env = state.environment();
    let SimulationState { store, tree, params, steer, .. } = state;
    let (store, tree, params) = (&*store, &*tree, &*params);

    (0..store.len())
        .into_par_iter()
        .map_init(Vec::new, |scratch, i| {
            let forces = steering::evaluate(i, store, tree, &env, params, scratch);
            Steer {
                acceleration: forces.acceleration(params),
                neighbors: forces.neighbors,
            }
        })
        .collect_into_vec(steer);
}

#[cfg(not(feature = "parallel"))]
fn compute_steering(state: &mut SimulationState) {
    let env = state.environment();
    let SimulationState { store, tree, params, steer, scratch, .. } = state;

    steer.clear();
    for i in 0..store.len() {
        let forces = steering::evaluate(i, store, tree, &env, params, scratch);
        steer.push(Steer {
            acceleration: forces.acceleration(params),
            neighbors: forces.neighbors,
        });
    }
}

fn apply_steering(state: &mut SimulationState) {
    let SimulationState { store, params, steer, .. } = state;
    for (i, s) in steer.iter().enumerate().take(store.len()) {
        integrate_particle(store, i, s.acceleration, params);
    }
}
