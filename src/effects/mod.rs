//! Whole-image effects that replace per-row interval sorting

/// Row and row-order shuffling
pub mod shuffle;
/// Stochastic pixel relocation
pub mod snap;

use crate::buffer::PixelBuffer;
use crate::intervals::IntervalStrategy;
use rand::Rng;

/// Apply the effect named by `strategy` in place
///
/// Returns false, leaving the buffer untouched, when the strategy is a row
/// partition rather than an effect.
pub fn apply_effect<R: Rng>(
    strategy: IntervalStrategy,
    buffer: &mut PixelBuffer,
    snap_fraction: f64,
    rng: &mut R,
) -> bool {
    match strategy {
        IntervalStrategy::Snap => {
            snap::snap(buffer, snap_fraction, rng);
            true
        }
        IntervalStrategy::ShuffleTotal => {
            shuffle::shuffle_rows(buffer, rng);
            true
        }
        IntervalStrategy::ShuffleAxis => {
            shuffle::shuffle_axis(buffer, rng);
            true
        }
        _ => false,
    }
}
