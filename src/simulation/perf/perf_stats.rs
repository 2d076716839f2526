use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Per-tick breakdown, filled only while perf metrics are enabled
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) index_ms: f64,
    pub(super) steer_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) render_ms: f64,
    pub(super) particle_count: u32,
    pub(super) quadtree_nodes: u32,
    pub(super) indexed_points: u32,
    pub(super) neighbor_hits: u32,
    pub(super) frame: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn index_ms(&self) -> f64 { self.index_ms }
    #[wasm_bindgen(getter)]
    pub fn steer_ms(&self) -> f64 { self.steer_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn quadtree_nodes(&self) -> u32 { self.quadtree_nodes }
    #[wasm_bindgen(getter)]
    pub fn indexed_points(&self) -> u32 { self.indexed_points }
    #[wasm_bindgen(getter)]
    pub fn neighbor_hits(&self) -> u32 { self.neighbor_hits }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.frame }
}
