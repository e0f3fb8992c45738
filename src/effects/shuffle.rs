//! Shuffle effects over rows and row order

use crate::buffer::PixelBuffer;
use ndarray::Axis;
use rand::Rng;
use rand::seq::SliceRandom;

/// Uniformly permute the pixels inside every row
///
/// Each row keeps exactly the pixels it had; only their order changes.
pub fn shuffle_rows<R: Rng>(buffer: &mut PixelBuffer, rng: &mut R) {
    for mut row in buffer.pixels_mut().axis_iter_mut(Axis(0)) {
        let mut pixels = row.to_vec();
        pixels.shuffle(rng);
        for (slot, pixel) in row.iter_mut().zip(pixels) {
            *slot = pixel;
        }
    }
}

/// Uniform permutation of `0..height`
///
/// Entry `i` is the source row that ends up at row `i`.
pub fn row_permutation<R: Rng>(height: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..height).collect();
    order.shuffle(rng);
    order
}

/// Uniformly permute the order of whole rows
///
/// Each row's internal pixel sequence is preserved.
pub fn shuffle_axis<R: Rng>(buffer: &mut PixelBuffer, rng: &mut R) {
    let rows = buffer.to_rows();
    let order = row_permutation(rows.len(), rng);
    for (mut target, &source) in buffer.pixels_mut().axis_iter_mut(Axis(0)).zip(&order) {
        if let Some(pixels) = rows.get(source) {
            for (slot, &pixel) in target.iter_mut().zip(pixels) {
                *slot = pixel;
            }
        }
    }
}
