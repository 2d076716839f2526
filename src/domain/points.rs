use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// One point of a target shape, in canvas pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub x: f32,
    pub y: f32,
}

impl TargetPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<TargetPoint> for Vec2 {
    fn from(p: TargetPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Rejects clouds the simulation cannot be seeded from: empty, or holding
/// non-finite coordinates.
pub fn validate_cloud(points: &[TargetPoint]) -> Result<(), String> {
    if points.is_empty() {
        return Err("target point cloud is empty".to_string());
    }
    if let Some(idx) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(format!("target point {} is not finite", idx));
    }
    Ok(())
}
