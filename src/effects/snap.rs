//! Snap effect: a random share of pixels vanishes and reappears elsewhere
//!
//! Source coordinates are drawn without replacement. Each drawn pixel leaves
//! a transparent hole and overwrites a uniformly chosen different coordinate.
//! All reads come from a snapshot taken before any write, so a pixel that is
//! moved onto another drawn coordinate is never moved a second time.

use crate::buffer::{Pixel, PixelBuffer};
use rand::Rng;
use rand::seq::index;

/// Distinct flat indices to snap out of `total` pixels
///
/// Draws `round(fraction * total)` indices, clamped to `total`.
pub fn snap_sources<R: Rng>(total: usize, fraction: f64, rng: &mut R) -> Vec<usize> {
    let amount = ((fraction.clamp(0.0, 1.0) * total as f64).round() as usize).min(total);
    index::sample(rng, total, amount).into_vec()
}

/// Uniformly chosen flat index in `0..total` other than `source`
///
/// `total` must be at least two.
pub fn relocation_target<R: Rng>(source: usize, total: usize, rng: &mut R) -> usize {
    let target = rng.random_range(0..total - 1);
    if target >= source { target + 1 } else { target }
}

/// Apply the snap effect in place, returning the number of pixels relocated
///
/// Buffers with fewer than two pixels have nowhere to relocate to and are left unchanged.
pub fn snap<R: Rng>(buffer: &mut PixelBuffer, fraction: f64, rng: &mut R) -> usize {
    let total = buffer.len();
    let width = buffer.width();
    if total < 2 || width == 0 {
        return 0;
    }

    let sources = snap_sources(total, fraction, rng);
    if sources.is_empty() {
        return 0;
    }

    let snapshot = buffer.clone();
    let coordinates = |flat: usize| (flat % width, flat / width);

    for &source in &sources {
        let (x, y) = coordinates(source);
        buffer.set(x, y, Pixel::TRANSPARENT);
    }

    for &source in &sources {
        let (sx, sy) = coordinates(source);
        let (tx, ty) = coordinates(relocation_target(source, total, rng));
        if let Some(pixel) = snapshot.get(sx, sy) {
            buffer.set(tx, ty, pixel);
        }
    }

    log::debug!("Snapped {} of {total} pixels", sources.len());
    sources.len()
}
