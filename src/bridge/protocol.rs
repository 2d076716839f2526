//! Messages crossing the worker boundary
//!
//! Inbound messages are JSON objects tagged by `"type"`. Kinds this build does
//! not know decode to `InboundMessage::Unknown` and are ignored, so a newer page
//! talking to an older engine never kills the loop.

use serde::{Deserialize, Serialize};

use crate::domain::config::SimulationConfig;
use crate::domain::points::TargetPoint;
use crate::simulation::PerfStats;

/// One-time setup; the render surface travels beside it, not inside
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitParams {
    pub width: f32,
    pub height: f32,
    pub target_points: Vec<TargetPoint>,
    #[serde(flatten)]
    pub config: SimulationConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeParams {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub target_points: Vec<TargetPoint>,
}

/// New shape at the same viewport (navigation to another section)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetargetParams {
    pub target_points: Vec<TargetPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PointerParams {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoverPhase {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct HoverParams {
    pub subtype: HoverPhase,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeParams {
    pub is_dark: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PerfParams {
    pub enabled: bool,
    #[serde(default)]
    pub detailed: bool,
}

/// Control context -> simulation
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    Init(InitParams),
    Resize(ResizeParams),
    Retarget(RetargetParams),
    Pointer(PointerParams),
    Hover(HoverParams),
    Theme(ThemeParams),
    Perf(PerfParams),
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Wire name, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::Init(_) => "init",
            InboundMessage::Resize(_) => "resize",
            InboundMessage::Retarget(_) => "retarget",
            InboundMessage::Pointer(_) => "pointer",
            InboundMessage::Hover(_) => "hover",
            InboundMessage::Theme(_) => "theme",
            InboundMessage::Perf(_) => "perf",
            InboundMessage::Unknown => "unknown",
        }
    }
}

/// Simulation -> control context. Telemetry only; never drives control flow.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    FrameTime { duration: f64 },
    PerfStats(PerfStats),
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }
}

/// A message plus the render surface whose ownership moves with it (init only)
pub struct Envelope<S> {
    pub message: InboundMessage,
    pub transfer: Option<S>,
}

impl<S> Envelope<S> {
    pub fn message(message: InboundMessage) -> Self {
        Self { message, transfer: None }
    }

    pub fn with_transfer(message: InboundMessage, surface: S) -> Self {
        Self { message, transfer: Some(surface) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_carries_config_and_points() {
        let msg = InboundMessage::from_json(
            r#"{"type":"init","width":800,"height":600,"neighborRadius":40,"maxNeighbors":8,
                "cellSize":6,"mouseInfluenceRadius":120,"targetPoints":[{"x":1,"y":2},{"x":3.5,"y":4}]}"#,
        )
        .unwrap();

        let InboundMessage::Init(init) = msg else {
            panic!("expected init, got {:?}", msg);
        };
        assert_eq!(init.width, 800.0);
        assert_eq!(init.target_points.len(), 2);
        assert_eq!(init.target_points[1], TargetPoint::new(3.5, 4.0));
        assert_eq!(init.config.neighbor_radius, 40.0);
        assert_eq!(init.config.max_neighbors, 8);
        assert_eq!(init.config.cell_size, 6);
        assert_eq!(init.config.mouse_influence_radius, 120.0);
        assert_eq!(init.config.damping, 0.95);
    }

    #[test]
    fn hover_start_and_end() {
        let start = InboundMessage::from_json(r#"{"type":"hover","subtype":"start","x":100,"y":90}"#).unwrap();
        assert_eq!(
            start,
            InboundMessage::Hover(HoverParams { subtype: HoverPhase::Start, x: Some(100.0), y: Some(90.0) })
        );

        let end = InboundMessage::from_json(r#"{"type":"hover","subtype":"end"}"#).unwrap();
        assert_eq!(end, InboundMessage::Hover(HoverParams { subtype: HoverPhase::End, x: None, y: None }));
    }

    #[test]
    fn theme_and_pointer() {
        assert_eq!(
            InboundMessage::from_json(r#"{"type":"theme","isDark":true}"#).unwrap(),
            InboundMessage::Theme(ThemeParams { is_dark: true })
        );
        assert_eq!(
            InboundMessage::from_json(r#"{"type":"pointer","x":-5,"y":12.5}"#).unwrap(),
            InboundMessage::Pointer(PointerParams { x: -5.0, y: 12.5 })
        );
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let msg = InboundMessage::from_json(r#"{"type":"teleport","x":1}"#).unwrap();
        assert_eq!(msg, InboundMessage::Unknown);
        assert_eq!(msg.kind(), "unknown");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(InboundMessage::from_json(r#"{"type":"pointer","x":"left"}"#).is_err());
        assert!(InboundMessage::from_json("not json").is_err());
    }

    #[test]
    fn frame_time_wire_shape() {
        let json = OutboundMessage::FrameTime { duration: 2.5 }.to_json().unwrap();
        assert_eq!(json, r#"{"type":"frameTime","duration":2.5}"#);
    }
}
