use crate::domain::points::TargetPoint;

use super::ViewportTier;

/// Pixels at or below this alpha are background
pub const ALPHA_THRESHOLD: u8 = 128;

/// Fraction of the viewport a fitted shape may fill
const FIT_MARGIN: f32 = 0.8;

/// Every `step`-th pixel (both axes) of an RGBA8 image whose alpha exceeds
/// `threshold`, in row-major order.
pub fn sample_alpha(rgba: &[u8], width: u32, height: u32, step: u32, threshold: u8) -> Vec<TargetPoint> {
    let step = step.max(1) as usize;
    let (w, h) = (width as usize, height as usize);
    let mut points = Vec::new();

    for y in (0..h).step_by(step) {
        for x in (0..w).step_by(step) {
            let alpha_idx = (y * w + x) * 4 + 3;
            match rgba.get(alpha_idx) {
                Some(&a) if a > threshold => points.push(TargetPoint::new(x as f32, y as f32)),
                Some(_) => {}
                None => return points,
            }
        }
    }
    points
}

/// Keep at most `cap` points, evenly strided, preserving order
pub fn downsample(points: &[TargetPoint], cap: usize) -> Vec<TargetPoint> {
    if points.len() <= cap {
        return points.to_vec();
    }
    let n = points.len();
    (0..cap).map(|i| points[i * n / cap]).collect()
}

/// Scale a shape drawn on a `src_w` x `src_h` canvas to sit centred in the
/// viewport, aspect preserved.
pub fn fit_to_viewport(points: &[TargetPoint], src_w: f32, src_h: f32, view_w: f32, view_h: f32) -> Vec<TargetPoint> {
    if !(src_w > 0.0 && src_h > 0.0) {
        return points.to_vec();
    }
    let scale = (view_w / src_w).min(view_h / src_h) * FIT_MARGIN;
    let off_x = (view_w - src_w * scale) * 0.5;
    let off_y = (view_h - src_h * scale) * 0.5;

    points
        .iter()
        .map(|p| TargetPoint::new(off_x + p.x * scale, off_y + p.y * scale))
        .collect()
}

/// Decode a PNG/JPEG and sample its alpha channel for a `view_w` x `view_h`
/// viewport.
pub fn points_from_image(bytes: &[u8], view_w: f32, view_h: f32) -> Result<Vec<TargetPoint>, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("failed to decode image: {}", e))?
        .into_rgba8();
    let (width, height) = img.dimensions();

    let tier = ViewportTier::for_width(view_w);
    let sampled = sample_alpha(img.as_raw(), width, height, tier.sample_step(), ALPHA_THRESHOLD);
    let fitted = fit_to_viewport(&sampled, width as f32, height as f32, view_w, view_h);
    Ok(downsample(&fitted, tier.max_points()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn sample_alpha_is_row_major_and_strided() {
        // 4x2, opaque at (0,0), (2,0), (1,1)
        let mut rgba = vec![0u8; 4 * 2 * 4];
        for (x, y) in [(0usize, 0usize), (2, 0), (1, 1)] {
            rgba[(y * 4 + x) * 4 + 3] = 255;
        }

        let all = sample_alpha(&rgba, 4, 2, 1, ALPHA_THRESHOLD);
        assert_eq!(all, vec![TargetPoint::new(0.0, 0.0), TargetPoint::new(2.0, 0.0), TargetPoint::new(1.0, 1.0)]);

        let strided = sample_alpha(&rgba, 4, 2, 2, ALPHA_THRESHOLD);
        assert_eq!(strided, vec![TargetPoint::new(0.0, 0.0), TargetPoint::new(2.0, 0.0)]);
    }

    #[test]
    fn short_buffer_stops_sampling() {
        let rgba = [0, 0, 0, 255, 0, 0, 0, 255];
        let points = sample_alpha(&rgba, 4, 4, 1, 0);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn downsample_keeps_order_and_cap() {
        let points: Vec<TargetPoint> = (0..10).map(|i| TargetPoint::new(i as f32, 0.0)).collect();

        let capped = downsample(&points, 4);
        let xs: Vec<f32> = capped.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 5.0, 7.0]);

        assert_eq!(downsample(&points, 50).len(), 10);
        assert!(downsample(&points, 0).is_empty());
    }

    #[test]
    fn fit_centres_and_keeps_aspect() {
        let corners = [TargetPoint::new(0.0, 0.0), TargetPoint::new(100.0, 50.0)];
        let fitted = fit_to_viewport(&corners, 100.0, 50.0, 1000.0, 1000.0);

        // Width bound: scale 10 * 0.8 = 8
        assert_eq!(fitted[0], TargetPoint::new(100.0, 300.0));
        assert_eq!(fitted[1], TargetPoint::new(900.0, 700.0));
    }

    #[test]
    fn png_alpha_becomes_points() {
        let mut img = RgbaImage::new(30, 30);
        for y in 10..20 {
            for x in 10..20 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let points = points_from_image(&bytes, 300.0, 300.0).unwrap();
        assert!(!points.is_empty());
        // Only the opaque square survives, and it lands around the centre
        for p in &points {
            assert!(p.x > 100.0 && p.x < 200.0, "x {}", p.x);
            assert!(p.y > 100.0 && p.y < 200.0, "y {}", p.y);
        }
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(points_from_image(&[1, 2, 3, 4], 300.0, 300.0).is_err());
    }
}
