//! Interval strategies and the per-row interval engine
//!
//! A strategy either partitions rows into intervals or names a whole-image
//! effect. The engine is built once per call: masks needed by edge and
//! automaton strategies are computed up front, then each row asks for its
//! intervals independently.

use crate::buffer::{Pixel, PixelBuffer};
use crate::intervals::automaton::{automaton_mask, choose_rule, validate_rule};
use crate::intervals::edges::{edge_mask, mask_edges};
use crate::intervals::interval::{Interval, runs_where, tile_with_widths};
use crate::intervals::mask::Mask;
use crate::io::configuration::{MASK_IMAGE_THRESHOLD, WAVE_JITTER};
use crate::io::error::{Result, SortError, unknown_function};
use crate::sorting::config::{MaskSource, SortingConfig};
use crate::sorting::keys::SortKey;
use ndarray::ArrayView1;
use rand::Rng;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// How rows are partitioned, or which effect replaces partitioning
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntervalStrategy {
    /// Random widths around the characteristic length
    #[default]
    Random,
    /// Runs of pixels whose lightness lies within the thresholds
    Threshold,
    /// Runs of pixels between detected edges
    Edges,
    /// Regular bands of the characteristic length plus jitter
    Waves,
    /// Each row is one interval (`none`)
    Whole,
    /// Runs of "on" mask cells (`file-mask`)
    FileMask,
    /// Runs between the outer contours of the mask (`file-edges`)
    FileEdges,
    /// Stochastic pixel relocation effect
    Snap,
    /// Shuffle pixels within every row
    ShuffleTotal,
    /// Shuffle the order of whole rows
    ShuffleAxis,
}

impl IntervalStrategy {
    /// Every strategy in catalog order
    pub const ALL: [Self; 10] = [
        Self::Random,
        Self::Threshold,
        Self::Edges,
        Self::Waves,
        Self::Whole,
        Self::FileMask,
        Self::FileEdges,
        Self::Snap,
        Self::ShuffleTotal,
        Self::ShuffleAxis,
    ];

    /// Catalog name of the strategy
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Threshold => "threshold",
            Self::Edges => "edges",
            Self::Waves => "waves",
            Self::Whole => "none",
            Self::FileMask => "file-mask",
            Self::FileEdges => "file-edges",
            Self::Snap => "snap",
            Self::ShuffleTotal => "shuffle-total",
            Self::ShuffleAxis => "shuffle-axis",
        }
    }

    /// Names of every strategy in catalog order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|strategy| strategy.name()).collect()
    }

    /// Test whether the strategy is a whole-image effect rather than a row partition
    pub const fn is_effect(self) -> bool {
        matches!(self, Self::Snap | Self::ShuffleTotal | Self::ShuffleAxis)
    }

    /// Test whether the strategy consumes a mask from the mask source
    pub const fn needs_mask(self) -> bool {
        matches!(self, Self::FileMask | Self::FileEdges)
    }
}

impl fmt::Display for IntervalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntervalStrategy {
    type Err = SortError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        // Older configurations call the mask strategy plain "file"
        if name == "file" {
            return Ok(Self::FileMask);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == name)
            .ok_or_else(|| unknown_function("interval", name, &Self::names()))
    }
}

/// Produces interval sequences for the rows of one rotated canvas
#[derive(Clone, Debug)]
pub struct IntervalEngine {
    strategy: IntervalStrategy,
    lower_threshold: f64,
    upper_threshold: f64,
    length: usize,
    /// Cells allowed inside intervals, for mask-driven strategies
    sortable: Option<Mask>,
}

impl IntervalEngine {
    /// Build the engine for `canvas`, computing any mask the strategy needs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A mask-driven strategy has a disabled or empty mask source
    /// - The configured automaton rule is above 255
    pub fn prepare<R: Rng>(config: &SortingConfig, canvas: &PixelBuffer, rng: &mut R) -> Result<Self> {
        let sortable = match config.interval {
            IntervalStrategy::Edges => Some(edge_mask(canvas, config.lower_threshold).inverted()),
            IntervalStrategy::FileMask => Some(source_mask(config, canvas, rng)?),
            IntervalStrategy::FileEdges => {
                let mask = source_mask(config, canvas, rng)?;
                let boundaries = mask.inverted().intersection(&mask_edges(&mask));
                Some(boundaries.inverted())
            }
            _ => None,
        };

        if let Some(mask) = &sortable {
            log::debug!("{} engine mask: {mask}", config.interval);
        }

        Ok(Self {
            strategy: config.interval,
            lower_threshold: config.lower_threshold,
            upper_threshold: config.upper_threshold,
            length: config.effective_length(),
            sortable,
        })
    }

    /// Strategy this engine partitions with
    pub const fn strategy(&self) -> IntervalStrategy {
        self.strategy
    }

    /// Mask of sortable cells, for mask-driven strategies
    pub const fn mask(&self) -> Option<&Mask> {
        self.sortable.as_ref()
    }

    /// Intervals of canvas row `y`, restricted to the columns in `span`
    ///
    /// Returned intervals use row coordinates. Spans shorter than two pixels
    /// and effect strategies produce no intervals.
    pub fn intervals<R: Rng>(
        &self,
        y: usize,
        row: ArrayView1<'_, Pixel>,
        span: Range<usize>,
        rng: &mut R,
    ) -> Vec<Interval> {
        let offset = span.start;
        let len = span.len();
        if len < 2 {
            return Vec::new();
        }

        let local = match self.strategy {
            IntervalStrategy::Random => {
                let widest = self.length.saturating_mul(2) - 1;
                tile_with_widths(len, || rng.random_range(1..=widest))
            }
            IntervalStrategy::Waves => {
                tile_with_widths(len, || {
                    self.length.saturating_add(rng.random_range(0..=WAVE_JITTER))
                })
            }
            IntervalStrategy::Whole => vec![Interval::new(0, len)],
            IntervalStrategy::Threshold => runs_where(len, |i| {
                row.get(offset + i).is_some_and(|&pixel| {
                    let lightness = SortKey::Lightness.key(pixel);
                    lightness >= self.lower_threshold && lightness <= self.upper_threshold
                })
            }),
            IntervalStrategy::Edges | IntervalStrategy::FileMask | IntervalStrategy::FileEdges => {
                self.sortable.as_ref().map_or_else(Vec::new, |mask| {
                    runs_where(len, |i| mask.get(offset + i, y))
                })
            }
            IntervalStrategy::Snap
            | IntervalStrategy::ShuffleTotal
            | IntervalStrategy::ShuffleAxis => Vec::new(),
        };

        local.into_iter().map(|interval| interval.shifted(offset)).collect()
    }
}

/// Drop each interval independently with probability `randomness`
///
/// Exactly one draw is made per interval, skipped or not.
pub fn retain_sorted<R: Rng>(intervals: Vec<Interval>, randomness: f64, rng: &mut R) -> Vec<Interval> {
    intervals
        .into_iter()
        .filter(|_| rng.random::<f64>() >= randomness)
        .collect()
}

// Mask from the configured source, sized to the rotated canvas
fn source_mask<R: Rng>(config: &SortingConfig, canvas: &PixelBuffer, rng: &mut R) -> Result<Mask> {
    let (width, height) = canvas.dimensions();
    match &config.mask {
        MaskSource::Automaton { rule } => {
            let rule = match rule {
                Some(rule) => validate_rule(*rule)?,
                None => choose_rule(rng),
            };
            log::info!("Generating elementary cellular automaton, rule {rule}");
            Ok(automaton_mask(rule, width, height))
        }
        MaskSource::Image(image) => {
            if image.is_empty() {
                return Err(SortError::MaskUnavailable {
                    reason: "mask image has no pixels".to_string(),
                });
            }
            let rotated = image.rotate(config.angle);
            Ok(Mask::from_buffer(&rotated, MASK_IMAGE_THRESHOLD).scaled(width, height))
        }
        MaskSource::Disabled => Err(SortError::MaskUnavailable {
            reason: format!("strategy '{}' requires a mask source", config.interval),
        }),
    }
}
