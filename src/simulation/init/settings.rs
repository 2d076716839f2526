use super::perf_stats::PerfStats;
use super::SimulationState;

pub(super) fn set_theme(state: &mut SimulationState, is_dark: bool) {
    state.is_dark = is_dark;
}

pub(super) fn enable_perf_metrics(state: &mut SimulationState, enabled: bool) {
    state.perf_enabled = enabled;
    if !enabled {
        state.perf_detailed = false;
        state.perf_stats.reset();
    }
}

pub(super) fn enable_perf_detailed_metrics(state: &mut SimulationState, enabled: bool) {
    state.perf_detailed = enabled;
    if enabled {
        state.perf_enabled = true;
    }
}

pub(super) fn get_perf_stats(state: &SimulationState) -> PerfStats {
    state.perf_stats.clone()
}
