//! Edge detection with a 3×3 Laplacian kernel
//!
//! - Converts pixels to a grayscale plane using the lightness key.
//! - Convolves with the "find edges" kernel using border clamping.
//! - Thresholds the absolute response into a boolean edge mask.
//!
//! The absolute value matters: both sides of a step are reported, so a binary
//! mask's edge includes the "off" cells that touch an "on" region.

use crate::buffer::PixelBuffer;
use crate::intervals::mask::Mask;
use crate::sorting::keys::SortKey;
use ndarray::Array2;
use num_traits::{Float, NumAssign};

/// 3×3 convolution kernel indexed `[row][column]`
pub type Kernel3<T> = [[T; 3]; 3];

/// Laplacian kernel that responds to any local intensity change
pub const FIND_EDGES_KERNEL: Kernel3<f32> = [
    [-1.0, -1.0, -1.0],
    [-1.0, 8.0, -1.0],
    [-1.0, -1.0, -1.0],
];

/// Lightness plane of a buffer, values in [0, 1]
pub fn grayscale(buffer: &PixelBuffer) -> Array2<f32> {
    buffer
        .pixels()
        .mapv(|pixel| SortKey::Lightness.key(pixel) as f32)
}

/// Convolve a plane with a 3×3 kernel, clamping reads at the borders
pub fn convolve3<T>(input: &Array2<T>, kernel: &Kernel3<T>) -> Array2<T>
where
    T: Float + NumAssign,
{
    let (h, w) = input.dim();
    if h == 0 || w == 0 {
        return Array2::zeros((h, w));
    }

    Array2::from_shape_fn((h, w), |(y, x)| {
        let mut sum = T::zero();
        for (ky, kernel_row) in kernel.iter().enumerate() {
            let yy = (y + ky).saturating_sub(1).min(h - 1);
            for (kx, &weight) in kernel_row.iter().enumerate() {
                let xx = (x + kx).saturating_sub(1).min(w - 1);
                let sample = input.get((yy, xx)).copied().unwrap_or_else(T::zero);
                sum += sample * weight;
            }
        }
        sum
    })
}

/// Absolute "find edges" response of a buffer, clamped to [0, 1]
pub fn edge_response(buffer: &PixelBuffer) -> Array2<f32> {
    convolve3(&grayscale(buffer), &FIND_EDGES_KERNEL).mapv(|value| value.abs().min(1.0))
}

/// Pixels whose edge response reaches `threshold`
pub fn edge_mask(buffer: &PixelBuffer, threshold: f64) -> Mask {
    let response = edge_response(buffer);
    let (height, width) = response.dim();
    Mask::from_fn(width, height, |x, y| {
        response
            .get((y, x))
            .is_some_and(|&value| f64::from(value) >= threshold)
    })
}

/// Cells of a binary mask that border a cell of the opposite state
pub fn mask_edges(mask: &Mask) -> Mask {
    let plane = Array2::from_shape_fn((mask.height(), mask.width()), |(y, x)| {
        if mask.get(x, y) { 1.0_f32 } else { 0.0 }
    });
    let response = convolve3(&plane, &FIND_EDGES_KERNEL);
    Mask::from_fn(mask.width(), mask.height(), |x, y| {
        response.get((y, x)).is_some_and(|value| value.abs() > 0.0)
    })
}
