//! Simulation tuning
//!
//! Every field is optional on the wire; missing fields take the defaults below.
//! `sanitize()` runs before a config is used so NaN or negative tuning values
//! never reach the steering model.

use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

/// Presets for the two flavours of the engine that used to be separate workers.
/// A profile only picks defaults; explicit config fields win.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineProfile {
    /// Fixed fill colour, no fade-in, gentle target pull
    Classic,
    /// Theme-aware fill, fade-in, slightly stronger target pull
    #[default]
    Themed,
}

impl EngineProfile {
    pub fn target_weight(self) -> f32 {
        match self {
            EngineProfile::Classic => 0.5,
            EngineProfile::Themed => 0.6,
        }
    }

    pub fn theme_aware(self) -> bool {
        matches!(self, EngineProfile::Themed)
    }

    pub fn fade_in_frames(self) -> u32 {
        match self {
            EngineProfile::Classic => 0,
            EngineProfile::Themed => 45,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    // Configuration surface passed at init
    pub neighbor_radius: f32,
    pub max_neighbors: u32,
    /// Quad-tree node capacity before subdivision
    pub cell_size: u32,
    pub mouse_influence_radius: f32,

    pub max_speed: f32,
    /// Overscan around the viewport before a particle wraps
    pub edge_buffer: f32,

    // Weights
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub target_weight: Option<f32>,
    pub hover_target_weight: f32,
    pub pointer_weight: f32,

    // Integration
    pub force_scale: f32,
    pub damping: f32,
    pub arrival_epsilon_sq: f32,
    /// Max angular jitter (radians) of the hover pull
    pub hover_jitter: f32,

    // Emergence burst
    pub burst_speed: f32,
    pub spiral_spread: f32,

    pub profile: EngineProfile,
    pub fade_in_frames: Option<u32>,
    pub theme_aware: Option<bool>,
    pub seed: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: 30.0,
            max_neighbors: 10,
            cell_size: 4,
            mouse_influence_radius: 100.0,
            max_speed: 4.0,
            edge_buffer: 10.0,
            separation_weight: 0.5,
            alignment_weight: 0.1,
            cohesion_weight: 0.2,
            target_weight: None,
            hover_target_weight: 1.0,
            pointer_weight: 2.0,
            force_scale: 0.2,
            damping: 0.95,
            arrival_epsilon_sq: 1.0,
            hover_jitter: FRAC_PI_4,
            burst_speed: 3.0,
            spiral_spread: 0.08,
            profile: EngineProfile::Themed,
            fade_in_frames: None,
            theme_aware: None,
            seed: 0x9E37_79B9,
        }
    }
}

impl SimulationConfig {
    pub fn target_weight(&self) -> f32 {
        self.target_weight.unwrap_or_else(|| self.profile.target_weight())
    }

    pub fn theme_aware(&self) -> bool {
        self.theme_aware.unwrap_or_else(|| self.profile.theme_aware())
    }

    pub fn fade_in_frames(&self) -> u32 {
        self.fade_in_frames.unwrap_or_else(|| self.profile.fade_in_frames())
    }

    /// Clamp every tuning value into a usable range; non-finite values fall back
    /// to the default.
    pub fn sanitize(&mut self) {
        let d = SimulationConfig::default();

        self.neighbor_radius = clamp_finite(self.neighbor_radius, 0.0, 10_000.0, d.neighbor_radius);
        self.max_neighbors = self.max_neighbors.min(1024);
        self.cell_size = self.cell_size.clamp(1, 1024);
        self.mouse_influence_radius =
            clamp_finite(self.mouse_influence_radius, 0.0, 10_000.0, d.mouse_influence_radius);
        self.max_speed = clamp_finite(self.max_speed, 0.01, 1_000.0, d.max_speed);
        self.edge_buffer = clamp_finite(self.edge_buffer, 0.0, 1_000.0, d.edge_buffer);

        self.separation_weight = clamp_finite(self.separation_weight, 0.0, 100.0, d.separation_weight);
        self.alignment_weight = clamp_finite(self.alignment_weight, 0.0, 100.0, d.alignment_weight);
        self.cohesion_weight = clamp_finite(self.cohesion_weight, 0.0, 100.0, d.cohesion_weight);
        self.target_weight = self
            .target_weight
            .map(|w| clamp_finite(w, 0.0, 100.0, self.profile.target_weight()));
        self.hover_target_weight =
            clamp_finite(self.hover_target_weight, 0.0, 100.0, d.hover_target_weight);
        self.pointer_weight = clamp_finite(self.pointer_weight, 0.0, 100.0, d.pointer_weight);

        self.force_scale = clamp_finite(self.force_scale, 0.0, 10.0, d.force_scale);
        self.damping = clamp_finite(self.damping, 0.0, 1.0, d.damping);
        self.arrival_epsilon_sq = clamp_finite(self.arrival_epsilon_sq, 0.0, 10_000.0, d.arrival_epsilon_sq);
        self.hover_jitter = clamp_finite(self.hover_jitter, 0.0, std::f32::consts::PI, d.hover_jitter);

        self.burst_speed = clamp_finite(self.burst_speed, 0.0, 1_000.0, d.burst_speed);
        self.spiral_spread = clamp_finite(self.spiral_spread, 0.0, 1.0, d.spiral_spread);
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Viewport change that forces a particle rebuild.
///
/// Empirically tuned: the tall height tolerance swallows mobile on-screen
/// keyboards opening and closing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeTolerance {
    pub width: f32,
    pub height: f32,
}

impl Default for ResizeTolerance {
    fn default() -> Self {
        Self { width: 10.0, height: 120.0 }
    }
}

impl ResizeTolerance {
    #[inline]
    pub fn requires_rebuild(&self, delta_width: f32, delta_height: f32) -> bool {
        delta_width.abs() >= self.width || delta_height.abs() >= self.height
    }
}
