//! Canvas-expanding rotation with explicit padding tracking
//!
//! Quarter turns are exact index permutations. Any other angle is resampled
//! with nearest-neighbor inverse mapping about the canvas center, so every
//! canvas pixel is either a copy of one source pixel or padding. Keeping the
//! geometry in one place lets callers ask which canvas pixels hold content.

use crate::buffer::pixel::Pixel;
use crate::buffer::pixel_buffer::PixelBuffer;
use crate::io::error::{Result, dimension_error};
use ndarray::Array2;
use std::ops::Range;

// Tolerance for snapping near-quarter angles and near-integer canvas sizes
const ANGLE_EPSILON: f64 = 1e-9;

/// Counter-clockwise rotation of a `width` x `height` rectangle
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    /// Quarter turns when the angle is a multiple of 90 degrees
    quarter_turns: Option<u8>,
    cos: f64,
    sin: f64,
    source: (usize, usize),
    canvas: (usize, usize),
}

/// Reduce any angle to the range [0, 360)
pub fn normalize_angle(angle_degrees: f64) -> f64 {
    let normalized = angle_degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Number of quarter turns if the angle is a multiple of 90 degrees
pub fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = normalize_angle(angle_degrees);
    let turns = (normalized / 90.0).round();
    ((normalized - turns * 90.0).abs() < ANGLE_EPSILON).then(|| (turns as u8) % 4)
}

impl Rotation {
    /// Describe the rotation of a `width` x `height` image by `angle_degrees`
    pub fn new(angle_degrees: f64, width: usize, height: usize) -> Self {
        let quarter_turns = quarter_turns(angle_degrees);
        let radians = normalize_angle(angle_degrees).to_radians();
        let (sin, cos) = radians.sin_cos();

        let canvas = match quarter_turns {
            Some(0 | 2) => (width, height),
            Some(_) => (height, width),
            None => {
                let (w, h) = (width as f64, height as f64);
                let canvas_w = w.mul_add(cos.abs(), h * sin.abs());
                let canvas_h = w.mul_add(sin.abs(), h * cos.abs());
                (
                    (canvas_w - ANGLE_EPSILON).ceil().max(0.0) as usize,
                    (canvas_h - ANGLE_EPSILON).ceil().max(0.0) as usize,
                )
            }
        };

        Self {
            quarter_turns,
            cos,
            sin,
            source: (width, height),
            canvas,
        }
    }

    /// Canvas dimensions (width, height) after rotation
    pub const fn canvas(&self) -> (usize, usize) {
        self.canvas
    }

    /// Source dimensions (width, height) before rotation
    pub const fn source(&self) -> (usize, usize) {
        self.source
    }

    /// Test whether the rotation leaves the image untouched
    pub fn is_identity(&self) -> bool {
        self.quarter_turns == Some(0)
    }

    /// Test whether the rotation is an exact index permutation
    pub const fn is_exact(&self) -> bool {
        self.quarter_turns.is_some()
    }

    /// Source pixel that lands on canvas pixel (`x`, `y`), or `None` for padding
    pub fn source_of(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        let (src_w, src_h) = self.source;
        let (dst_w, dst_h) = self.canvas;
        if x >= dst_w || y >= dst_h || src_w == 0 || src_h == 0 {
            return None;
        }

        match self.quarter_turns {
            Some(0) => Some((x, y)),
            Some(1) => Some((src_w - 1 - y, x)),
            Some(2) => Some((src_w - 1 - x, src_h - 1 - y)),
            Some(_) => Some((y, src_h - 1 - x)),
            None => {
                let dx = x as f64 + 0.5 - dst_w as f64 / 2.0;
                let dy = y as f64 + 0.5 - dst_h as f64 / 2.0;
                let sx = dx.mul_add(self.cos, -dy * self.sin) + src_w as f64 / 2.0;
                let sy = dx.mul_add(self.sin, dy * self.cos) + src_h as f64 / 2.0;
                let inside =
                    sx >= 0.0 && sy >= 0.0 && sx < src_w as f64 && sy < src_h as f64;
                inside.then(|| (sx.floor() as usize, sy.floor() as usize))
            }
        }
    }

    /// Columns of canvas row `y` that hold rotated content
    ///
    /// A rotated rectangle is convex, so the content of one row is contiguous.
    pub fn content_span(&self, y: usize) -> Range<usize> {
        let (dst_w, dst_h) = self.canvas;
        if y >= dst_h {
            return 0..0;
        }
        if self.is_exact() {
            return 0..dst_w;
        }

        let first = (0..dst_w).find(|&x| self.source_of(x, y).is_some());
        let last = (0..dst_w).rev().find(|&x| self.source_of(x, y).is_some());
        match (first, last) {
            (Some(start), Some(end)) => start..end + 1,
            _ => 0..0,
        }
    }

    /// Content spans of every canvas row
    pub fn content_spans(&self) -> Vec<Range<usize>> {
        (0..self.canvas.1).map(|y| self.content_span(y)).collect()
    }

    /// Resample `buffer` onto the rotated canvas
    pub fn apply(&self, buffer: &PixelBuffer) -> PixelBuffer {
        let (dst_w, dst_h) = self.canvas;
        let pixels = Array2::from_shape_fn((dst_h, dst_w), |(y, x)| {
            self.source_of(x, y)
                .and_then(|(sx, sy)| buffer.get(sx, sy))
                .unwrap_or(Pixel::TRANSPARENT)
        });
        PixelBuffer::from_array(pixels)
    }

    /// Write the content of a rotated `canvas` back onto a copy of `original`
    ///
    /// Each canvas pixel returns to the source pixel it was sampled from, so
    /// padding never reaches the output. Source pixels that no canvas pixel
    /// sampled keep their original value. When several canvas pixels share a
    /// source pixel, the last in row-major order wins.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if `canvas` or `original` does not match the
    /// dimensions this rotation was built for
    pub fn restore(&self, canvas: &PixelBuffer, original: &PixelBuffer) -> Result<PixelBuffer> {
        if canvas.dimensions() != self.canvas {
            return Err(dimension_error("restore canvas", self.canvas, canvas.dimensions()));
        }
        if original.dimensions() != self.source {
            return Err(dimension_error("restore source", self.source, original.dimensions()));
        }

        let mut restored = original.clone();
        let (dst_w, dst_h) = self.canvas;
        for y in 0..dst_h {
            for x in 0..dst_w {
                if let (Some((sx, sy)), Some(pixel)) = (self.source_of(x, y), canvas.get(x, y)) {
                    restored.set(sx, sy, pixel);
                }
            }
        }
        Ok(restored)
    }
}
