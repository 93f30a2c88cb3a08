//! The drawing surface and stroke capture.
//!
//! [`CanvasSurface`] owns a square grayscale raster, white background with
//! black ink, living for the life of the session and cleared only on explicit
//! user action. Strokes are round-cap, round-join polylines stamped with
//! filled discs, matching a browser canvas stroked with `lineWidth = 15` and
//! round caps. The surface reads back as an RGBA buffer so the extractor sees
//! exactly what a browser canvas would hand over.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;

/// Background intensity (white).
const BACKGROUND: Luma<u8> = Luma([255u8]);

/// Stroke intensity (black ink).
const INK: Luma<u8> = Luma([0u8]);

/// Stroke rendering parameters.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    /// Stroke width in pixels.
    pub width: u32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { width: 15 }
    }
}

/// State of the stroke capture machine: `Idle → Drawing → Idle`.
///
/// Pointer moves only mutate the canvas while in `Drawing`; moves while idle
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// No stroke in progress.
    Idle,
    /// A stroke is in progress; holds the last pointer position.
    Drawing {
        /// Last pointer x coordinate.
        last_x: f32,
        /// Last pointer y coordinate.
        last_y: f32,
    },
}

impl StrokeState {
    /// Returns true if a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self, StrokeState::Drawing { .. })
    }
}

/// A mutable square raster owned by the drawing session.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    image: GrayImage,
    size: u32,
}

impl CanvasSurface {
    /// Creates a new white canvas of `size` × `size` pixels.
    pub fn new(size: u32) -> Self {
        let image = GrayImage::from_pixel(size, size, BACKGROUND);
        Self { image, size }
    }

    /// Side length of the canvas in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Repaints the whole canvas white.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = BACKGROUND;
        }
    }

    /// Returns true if no pixel differs from the background.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| *p == BACKGROUND)
    }

    /// Stamps a round-cap ink segment from one point to another.
    ///
    /// The segment is rendered as filled discs of half the stroke width,
    /// stepped at one-pixel spacing along the segment, which produces round
    /// caps and round joins for free. Points outside the canvas are clipped.
    pub fn stroke_segment(&mut self, from: (f32, f32), to: (f32, f32), style: StrokeStyle) {
        let radius = (style.width / 2).max(1) as i32;
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = length.ceil() as u32;

        for step in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                step as f32 / steps as f32
            };
            let x = (from.0 + dx * t).round() as i32;
            let y = (from.1 + dy * t).round() as i32;
            draw_filled_circle_mut(&mut self.image, (x, y), radius, INK);
        }
    }

    /// Stamps a single round dot, used for a press with no movement.
    pub fn stroke_dot(&mut self, at: (f32, f32), style: StrokeStyle) {
        self.stroke_segment(at, at, style);
    }

    /// Reads the rendered surface back as a row-major RGBA buffer.
    ///
    /// Each pixel expands to `[v, v, v, 255]`, the layout a browser canvas
    /// returns from `getImageData`.
    pub fn to_rgba_buffer(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity((self.size * self.size * 4) as usize);
        for pixel in self.image.pixels() {
            let v = pixel.0[0];
            buffer.extend_from_slice(&[v, v, v, 255]);
        }
        buffer
    }

    /// Direct access to the underlying raster.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }
}
