//! Render targets
//!
//! The simulation draws into its own `FrameBuffer`; a `RenderSurface` is wherever
//! finished frames go. In the browser that is the transferred OffscreenCanvas,
//! natively a `PixelSink`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::palette::Rgba;

/// RGBA8 pixels, row-major, tightly packed
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width as usize) * (height as usize) * 4, 0);
    }

    pub fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Source-over blend of a filled disc, clipped to the buffer
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if color[3] == 0 || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }

        let min_x = (cx - radius).floor().max(0.0);
        let min_y = (cy - radius).floor().max(0.0);
        let max_x = (cx + radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (cy + radius).ceil().min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let r_sq = radius * radius;
        let stride = self.width as usize;
        for y in min_y as u32..=max_y as u32 {
            let dy = y as f32 + 0.5 - cy;
            for x in min_x as u32..=max_x as u32 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy > r_sq {
                    continue;
                }
                let idx = ((y as usize) * stride + x as usize) * 4;
                blend_over(&mut self.pixels[idx..idx + 4], color);
            }
        }
    }
}

#[inline(always)]
fn blend_over(dst: &mut [u8], src: Rgba) {
    let sa = src[3] as u32;
    if sa == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    let inv = 255 - sa;
    for c in 0..3 {
        dst[c] = ((src[c] as u32 * sa + dst[c] as u32 * inv) / 255) as u8;
    }
    dst[3] = (sa + dst[3] as u32 * inv / 255).min(255) as u8;
}

/// Where finished frames are shown
pub trait RenderSurface {
    fn resize(&mut self, width: u32, height: u32);
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), String>;
}

/// In-memory surface for native hosts and tests.
///
/// Clones share counters, so a test can keep one while the worker owns another.
#[derive(Clone, Default)]
pub struct PixelSink {
    presented: Arc<AtomicU64>,
    size: Arc<AtomicU64>,
}

impl PixelSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented.load(Ordering::Relaxed)
    }

    /// Last size set through `resize`
    pub fn size(&self) -> (u32, u32) {
        let packed = self.size.load(Ordering::Relaxed);
        ((packed >> 32) as u32, packed as u32)
    }
}

impl RenderSurface for PixelSink {
    fn resize(&mut self, width: u32, height: u32) {
        self.size.store(((width as u64) << 32) | height as u64, Ordering::Relaxed);
    }

    fn present(&mut self, _frame: &FrameBuffer) -> Result<(), String> {
        self.presented.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
