//! Rotate, partition, sort and reassemble one image
//!
//! The pipeline moves through four stages. [`SortingPipeline::prepare`] rotates
//! the source onto a canvas and builds the interval engine. Rows are then
//! partitioned and sorted independently, either one at a time through
//! [`RotatedImage::process_row`] or in parallel batches through
//! [`RotatedImage::sort_rows`]. Finally [`RotatedImage::reassemble`] maps every
//! canvas pixel back to the source pixel it was sampled from.
//!
//! Every row draws from its own random source derived from the seed and the
//! row index, so the result does not depend on how rows are scheduled.

use crate::buffer::{Pixel, PixelBuffer, Rotation};
use crate::effects::apply_effect;
use crate::intervals::strategy::retain_sorted;
use crate::intervals::{Interval, IntervalEngine};
use crate::io::configuration::ROW_BATCH_SIZE;
use crate::io::error::Result;
use crate::sorting::config::SortingConfig;
use crate::sorting::keys::SortKey;
use crate::sorting::progress::{NoProgress, ProgressObserver, ProgressStep};
use ndarray::{ArrayView1, ArrayViewMut1, Axis, s};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;

// Odd 64-bit constant spreading consecutive row indices across the seed space
const ROW_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random source owned by canvas row `y`
pub fn row_rng(seed: u64, y: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (y as u64).wrapping_add(1).wrapping_mul(ROW_SEED_MIX))
}

/// Sort each interval of `row` in place by `key`
///
/// Intervals reaching past the row are clipped to it.
pub fn sort_segments(mut row: ArrayViewMut1<'_, Pixel>, intervals: &[Interval], key: SortKey) {
    let len = row.len();
    for interval in intervals {
        let end = interval.end.min(len);
        if interval.start + 1 >= end {
            continue;
        }
        let mut segment = row.slice_mut(s![interval.start..end]);
        let mut pixels = segment.to_vec();
        key.sort(&mut pixels);
        for (slot, pixel) in segment.iter_mut().zip(pixels) {
            *slot = pixel;
        }
    }
}

/// Configured sorting pipeline, reusable across images
pub struct SortingPipeline {
    config: SortingConfig,
    observer: Arc<dyn ProgressObserver>,
}

impl SortingPipeline {
    /// Validate `config` and build a pipeline without progress reporting
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter fails validation
    pub fn new(config: SortingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observer: Arc::new(NoProgress),
        })
    }

    /// Report every stage to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Configuration the pipeline runs with
    pub const fn config(&self) -> &SortingConfig {
        &self.config
    }

    /// Rotate `source` onto a canvas and build its interval engine
    ///
    /// The source buffer is only read.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy's mask cannot be produced
    pub fn prepare(&self, source: &PixelBuffer) -> Result<RotatedImage> {
        let angle = self.config.normalized_angle();
        let (width, height) = source.dimensions();
        let rotation = Rotation::new(angle, width, height);
        let canvas = rotation.apply(source);
        let (canvas_width, canvas_height) = canvas.dimensions();
        log::debug!(
            "Rotated {width}x{height} by {angle} degrees onto {canvas_width}x{canvas_height} canvas"
        );
        self.observer.on_step(ProgressStep::Rotated {
            width: canvas_width,
            height: canvas_height,
        });

        let mut mask_rng = StdRng::seed_from_u64(self.config.seed);
        let engine = IntervalEngine::prepare(&self.config, &canvas, &mut mask_rng)?;

        Ok(RotatedImage {
            spans: rotation.content_spans(),
            canvas,
            engine,
            sort_key: self.config.sort_key,
            randomness: self.config.randomness,
            seed: self.config.seed,
            rotation,
            original: source.clone(),
            observer: Arc::clone(&self.observer),
        })
    }

    /// Produce the sorted image, or the effect output for effect strategies
    ///
    /// # Errors
    ///
    /// Returns an error if the mask cannot be produced or the reassembled
    /// canvas cannot be cropped back to the source size
    pub fn run(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
        log::info!(
            "Sorting {}x{} image: interval {}, key {}",
            source.width(),
            source.height(),
            self.config.interval,
            self.config.sort_key
        );

        if self.config.interval.is_effect() {
            let mut output = source.clone();
            let mut rng = StdRng::seed_from_u64(self.config.seed);
            apply_effect(
                self.config.interval,
                &mut output,
                self.config.snap_fraction,
                &mut rng,
            );
            self.observer.on_step(ProgressStep::EffectApplied);
            return Ok(output);
        }

        let mut rotated = self.prepare(source)?;
        rotated.sort_rows();
        rotated.reassemble()
    }
}

/// Rotated canvas with everything needed to sort its rows
pub struct RotatedImage {
    canvas: PixelBuffer,
    spans: Vec<Range<usize>>,
    engine: IntervalEngine,
    sort_key: SortKey,
    randomness: f64,
    seed: u64,
    rotation: Rotation,
    original: PixelBuffer,
    observer: Arc<dyn ProgressObserver>,
}

impl RotatedImage {
    /// Rotated canvas in its current state
    pub const fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    /// Number of canvas rows
    pub fn rows(&self) -> usize {
        self.canvas.height()
    }

    /// Interval engine built for this canvas
    pub const fn engine(&self) -> &IntervalEngine {
        &self.engine
    }

    /// Intervals of canvas row `y` after the randomness skips
    ///
    /// Intervals lie inside the row's content span, in canvas coordinates.
    pub fn intervals_for_row(&self, y: usize) -> Vec<Interval> {
        match (self.canvas.row(y), self.spans.get(y)) {
            (Some(row), Some(span)) => row_intervals(
                &self.engine,
                y,
                row,
                span.clone(),
                self.randomness,
                self.seed,
            ),
            _ => Vec::new(),
        }
    }

    /// Partition and sort canvas row `y`
    ///
    /// Rows past the canvas are ignored.
    pub fn process_row(&mut self, y: usize) {
        let intervals = self.intervals_for_row(y);
        if let Some(row) = self.canvas.row_mut(y) {
            sort_segments(row, &intervals, self.sort_key);
        }
    }

    /// Sort every row, in parallel batches
    ///
    /// Progress is reported after each batch.
    pub fn sort_rows(&mut self) {
        let total = self.canvas.height();
        let (engine, spans) = (&self.engine, &self.spans);
        let (sort_key, randomness, seed) = (self.sort_key, self.randomness, self.seed);

        let mut completed = 0;
        while completed < total {
            let end = (completed + ROW_BATCH_SIZE).min(total);
            let first = completed;
            self.canvas
                .pixels_mut()
                .slice_mut(s![first..end, ..])
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate()
                .for_each(|(offset, row)| {
                    let y = first + offset;
                    let span = spans.get(y).cloned().unwrap_or(0..0);
                    let intervals = row_intervals(engine, y, row.view(), span, randomness, seed);
                    sort_segments(row, &intervals, sort_key);
                });
            completed = end;
            self.observer.on_step(ProgressStep::RowsSorted { completed, total });
        }

        log::debug!("Sorted {total} rows");
    }

    /// Map the canvas back onto the source dimensions
    ///
    /// Padding is discarded and source pixels the rotation never sampled keep
    /// their original value.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the canvas no longer matches the rotation
    pub fn reassemble(self) -> Result<PixelBuffer> {
        let restored = self.rotation.restore(&self.canvas, &self.original)?;
        self.observer.on_step(ProgressStep::Reassembled);
        Ok(restored)
    }
}

fn row_intervals(
    engine: &IntervalEngine,
    y: usize,
    row: ArrayView1<'_, Pixel>,
    span: Range<usize>,
    randomness: f64,
    seed: u64,
) -> Vec<Interval> {
    let mut rng = row_rng(seed, y);
    let intervals = engine.intervals(y, row, span, &mut rng);
    retain_sorted(intervals, randomness, &mut rng)
}
