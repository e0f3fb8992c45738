//! Bit-packed boolean masks over the rotated canvas

use crate::buffer::{Pixel, PixelBuffer};
use crate::sorting::keys::SortKey;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size boolean grid marking which pixels belong to sortable regions
///
/// Stored row-major with one bit per pixel. Reads outside the grid are "off".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl Mask {
    /// Create a mask with every cell off
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, false)
    }

    /// Create a mask with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        Self {
            bits: BitVec::repeat(value, width * height),
            width,
            height,
        }
    }

    /// Create a mask by evaluating `cell(x, y)` for every position
    pub fn from_fn(width: usize, height: usize, cell: impl Fn(usize, usize) -> bool) -> Self {
        let mut bits = BitVec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(cell(x, y));
            }
        }
        Self {
            bits,
            width,
            height,
        }
    }

    /// Mark pixels whose lightness reaches `threshold`
    pub fn from_buffer(buffer: &PixelBuffer, threshold: f64) -> Self {
        Self::from_fn(buffer.width(), buffer.height(), |x, y| {
            buffer
                .get(x, y)
                .is_some_and(|pixel| SortKey::Lightness.key(pixel) >= threshold)
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Test the cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits.get(y * self.width + x).as_deref() == Some(&true)
    }

    /// Set the cell at column `x`, row `y`; positions outside the grid are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.bits.set(y * self.width + x, value);
        }
    }

    /// Count cells that are on
    pub fn count_on(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if every cell is off
    pub fn is_blank(&self) -> bool {
        self.bits.not_any()
    }

    /// Resample to new dimensions with nearest-neighbor lookup
    #[must_use]
    pub fn scaled(&self, width: usize, height: usize) -> Self {
        if self.width == 0 || self.height == 0 {
            return Self::new(width, height);
        }
        Self::from_fn(width, height, |x, y| {
            self.get(x * self.width / width, y * self.height / height)
        })
    }

    /// Cells that are on in both masks
    ///
    /// The result has the dimensions of `self`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x, y) && other.get(x, y)
        })
    }

    /// Mask with every cell flipped
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            bits: !self.bits.clone(),
            width: self.width,
            height: self.height,
        }
    }

    /// Render as opaque white (on) and black (off) pixels
    pub fn to_buffer(&self) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.width, self.height, Pixel::opaque(0, 0, 0));
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    buffer.set(x, y, Pixel::opaque(255, 255, 255));
                }
            }
        }
        buffer
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mask({}x{}, {} on)",
            self.width,
            self.height,
            self.count_on()
        )
    }
}
