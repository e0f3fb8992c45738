//! Row-major RGBA pixel grid with fixed dimensions
//!
//! The buffer is the unit handed across the core boundary: decoders produce one,
//! the sorting pipeline mutates rows of it in place, and encoders consume it.
//! Rotation and cropping never resize a buffer; they return new ones.

use crate::buffer::pixel::Pixel;
use crate::buffer::rotation::Rotation;
use crate::io::error::{Result, dimension_error};
use image::{DynamicImage, RgbaImage};
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis, s};

/// Two-dimensional grid of pixels indexed by `(row, column)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array2<Pixel>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single pixel value
    pub fn new(width: usize, height: usize, fill: Pixel) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), fill),
        }
    }

    /// Wrap an existing `(height, width)` array
    pub const fn from_array(pixels: Array2<Pixel>) -> Self {
        Self { pixels }
    }

    /// Build a buffer from explicit rows
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the rows don't all have the same length
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(ragged) = rows.iter().find(|row| row.len() != width) {
            return Err(dimension_error(
                "row assembly",
                (width, height),
                (ragged.len(), height),
            ));
        }

        let flat: Vec<Pixel> = rows.into_iter().flatten().collect();
        let pixels = Array2::from_shape_vec((height, width), flat)
            .map_err(|_shape_error| dimension_error("row assembly", (width, height), (0, 0)))?;

        Ok(Self { pixels })
    }

    /// Convert a decoded image of any pixel format to RGBA pixels
    ///
    /// Formats without alpha become fully opaque.
    pub fn from_image(image: &DynamicImage) -> Self {
        Self::from_rgba(&image.to_rgba8())
    }

    /// Copy an RGBA image into a buffer
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let pixels = Array2::from_shape_fn((height, width), |(y, x)| {
            Pixel::from(*image.get_pixel(x as u32, y as u32))
        });
        Self { pixels }
    }

    /// Convert the buffer back into an RGBA image
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            self.get(x as usize, y as usize)
                .unwrap_or(Pixel::TRANSPARENT)
                .into()
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Dimensions as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Total pixel count
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Test whether the buffer holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.pixels.get((y, x)).copied()
    }

    /// Overwrite the pixel at column `x`, row `y`
    ///
    /// Returns false when the coordinate is outside the buffer.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> bool {
        if let Some(slot) = self.pixels.get_mut((y, x)) {
            *slot = pixel;
            true
        } else {
            false
        }
    }

    /// View of row `y`
    pub fn row(&self, y: usize) -> Option<ArrayView1<'_, Pixel>> {
        (y < self.height()).then(|| self.pixels.row(y))
    }

    /// Mutable view of row `y`
    pub fn row_mut(&mut self, y: usize) -> Option<ArrayViewMut1<'_, Pixel>> {
        (y < self.height()).then(|| self.pixels.row_mut(y))
    }

    /// Iterate over all rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Pixel>> {
        self.pixels.axis_iter(Axis(0))
    }

    /// Copy every row into owned vectors
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Underlying `(height, width)` array
    pub const fn pixels(&self) -> &Array2<Pixel> {
        &self.pixels
    }

    /// Mutable access to the underlying array
    pub const fn pixels_mut(&mut self) -> &mut Array2<Pixel> {
        &mut self.pixels
    }

    /// Rotate counter-clockwise by `angle_degrees`, expanding the canvas
    ///
    /// Area not covered by the rotated image is filled with `Pixel::TRANSPARENT`.
    pub fn rotate(&self, angle_degrees: f64) -> Self {
        Rotation::new(angle_degrees, self.width(), self.height()).apply(self)
    }

    /// Copy the rectangle starting at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the rectangle extends past the buffer
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width());
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height());
        if !fits_x || !fits_y {
            return Err(dimension_error(
                "crop",
                (x.saturating_add(width), y.saturating_add(height)),
                self.dimensions(),
            ));
        }

        Ok(Self {
            pixels: self.pixels.slice(s![y..y + height, x..x + width]).to_owned(),
        })
    }

    /// Crop from the top-left corner to the reference dimensions
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the reference is larger than the buffer in either axis
    pub fn crop_to_reference(&self, width: usize, height: usize) -> Result<Self> {
        self.crop(0, 0, width, height)
    }

    /// Crop the centered window of the reference dimensions
    ///
    /// Rotating by an angle and back leaves the original content at the center
    /// of an enlarged canvas; this removes the padding on every side.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the reference is larger than the buffer in either axis
    pub fn crop_centered(&self, width: usize, height: usize) -> Result<Self> {
        if width > self.width() || height > self.height() {
            return Err(dimension_error(
                "centered crop",
                (width, height),
                self.dimensions(),
            ));
        }
        self.crop(
            (self.width() - width) / 2,
            (self.height() - height) / 2,
            width,
            height,
        )
    }
}
