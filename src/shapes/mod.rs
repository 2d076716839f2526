//! Target shapes - turning an image or a line of text into a point cloud
//!
//! The simulation only needs a finite, non-empty, order-stable `[TargetPoint]`.
//! These helpers produce one the way the page does: sample an image's alpha
//! channel (or a bitmap font) on a grid whose density depends on the viewport
//! tier, fit it to the viewport, then cap the count.

mod sampling;
mod text;

pub use sampling::{downsample, fit_to_viewport, points_from_image, sample_alpha, ALPHA_THRESHOLD};
pub use text::points_from_text;

use crate::domain::points::TargetPoint;

/// Viewport size class; picks sampling density and the point cap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportTier {
    Small,
    Medium,
    Large,
}

impl ViewportTier {
    pub fn for_width(width: f32) -> Self {
        if width < 640.0 {
            ViewportTier::Small
        } else if width < 1024.0 {
            ViewportTier::Medium
        } else {
            ViewportTier::Large
        }
    }

    /// Grid step in pixels between samples
    pub fn sample_step(self) -> u32 {
        match self {
            ViewportTier::Small => 3,
            ViewportTier::Medium => 4,
            ViewportTier::Large => 5,
        }
    }

    pub fn max_points(self) -> usize {
        match self {
            ViewportTier::Small => 1200,
            ViewportTier::Medium => 2000,
            ViewportTier::Large => 3000,
        }
    }
}

/// Image cloud when `image` decodes to something visible, otherwise the text
/// cloud. Image failures never reach the simulation.
pub fn load_or_fallback(image: Option<&[u8]>, text: &str, width: f32, height: f32) -> Vec<TargetPoint> {
    if let Some(bytes) = image {
        match points_from_image(bytes, width, height) {
            Ok(points) if !points.is_empty() => return points,
            Ok(_) => console_warn!("image has no visible pixels, using text shape"),
            Err(e) => console_warn!("image failed to load ({}), using text shape", e),
        }
    }
    points_from_text(text, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_by_width() {
        assert_eq!(ViewportTier::for_width(375.0), ViewportTier::Small);
        assert_eq!(ViewportTier::for_width(640.0), ViewportTier::Medium);
        assert_eq!(ViewportTier::for_width(1023.0), ViewportTier::Medium);
        assert_eq!(ViewportTier::for_width(1920.0), ViewportTier::Large);

        assert!(ViewportTier::Small.sample_step() < ViewportTier::Large.sample_step());
        assert!(ViewportTier::Small.max_points() < ViewportTier::Large.max_points());
    }

    #[test]
    fn broken_image_falls_back_to_text() {
        let from_text = points_from_text("HI", 800.0, 600.0);
        let loaded = load_or_fallback(Some(b"definitely not a png"), "HI", 800.0, 600.0);

        assert!(!loaded.is_empty());
        assert_eq!(loaded, from_text);
        assert_eq!(load_or_fallback(None, "HI", 800.0, 600.0), from_text);
    }
}
