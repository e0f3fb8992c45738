//! Immutable parameter bundle for one sorting call

use crate::buffer::PixelBuffer;
use crate::buffer::rotation::normalize_angle;
use crate::intervals::automaton::validate_rule;
use crate::intervals::strategy::IntervalStrategy;
use crate::io::configuration::{
    DEFAULT_CHARACTERISTIC_LENGTH, DEFAULT_LOWER_THRESHOLD, DEFAULT_RANDOMNESS,
    DEFAULT_SEED, DEFAULT_SNAP_FRACTION, DEFAULT_UPPER_THRESHOLD,
};
use crate::io::error::{Result, SortError, invalid_parameter};
use crate::sorting::keys::SortKey;

/// Where mask-driven strategies get their mask from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskSource {
    /// Generate an elementary cellular automaton pattern
    Automaton {
        /// Rule number (0-255); a recommended rule is drawn when absent
        rule: Option<u32>,
    },
    /// Threshold an externally supplied image
    Image(PixelBuffer),
    /// No mask available
    Disabled,
}

impl Default for MaskSource {
    fn default() -> Self {
        Self::Automaton { rule: None }
    }
}

/// Parameters controlling interval generation and sorting
#[derive(Clone, Debug, PartialEq)]
pub struct SortingConfig {
    /// Strategy that partitions rows (or the effect applied instead)
    pub interval: IntervalStrategy,
    /// Key pixels are ordered by inside each interval
    pub sort_key: SortKey,
    /// Counter-clockwise rotation applied before sorting, in degrees
    pub angle: f64,
    /// Fraction of intervals left unsorted, in [0, 1]
    pub randomness: f64,
    /// Lower lightness bound (threshold) and edge response cutoff (edges)
    pub lower_threshold: f64,
    /// Upper lightness bound for threshold intervals
    pub upper_threshold: f64,
    /// Mean interval width for random and wave intervals
    pub characteristic_length: usize,
    /// Mask source for mask-driven strategies
    pub mask: MaskSource,
    /// Fraction of pixels relocated by the snap effect, in [0, 1]
    pub snap_fraction: f64,
    /// Seed of the per-call random source
    pub seed: u64,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            interval: IntervalStrategy::default(),
            sort_key: SortKey::default(),
            angle: 0.0,
            randomness: DEFAULT_RANDOMNESS,
            lower_threshold: DEFAULT_LOWER_THRESHOLD,
            upper_threshold: DEFAULT_UPPER_THRESHOLD,
            characteristic_length: DEFAULT_CHARACTERISTIC_LENGTH,
            mask: MaskSource::default(),
            snap_fraction: DEFAULT_SNAP_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl SortingConfig {
    /// Default configuration with strategy and key resolved from catalog names
    ///
    /// # Errors
    ///
    /// Returns an unknown function error if either name is not in its catalog
    pub fn from_names(interval: &str, sort_key: &str) -> Result<Self> {
        Ok(Self {
            interval: interval.parse()?,
            sort_key: sort_key.parse()?,
            ..Self::default()
        })
    }

    /// Angle reduced to [0, 360)
    pub fn normalized_angle(&self) -> f64 {
        normalize_angle(self.angle)
    }

    /// Characteristic length clamped to at least one pixel
    pub fn effective_length(&self) -> usize {
        self.characteristic_length.max(1)
    }

    /// Check every parameter before any pixel is touched
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The angle is not finite
    /// - A threshold, the randomness or the snap fraction is outside [0, 1]
    /// - The lower threshold exceeds the upper threshold
    /// - The automaton rule is above 255
    /// - A mask-driven strategy has no usable mask source
    pub fn validate(&self) -> Result<()> {
        if !self.angle.is_finite() {
            return Err(invalid_parameter(
                "angle",
                &self.angle,
                &"must be a finite number of degrees",
            ));
        }

        check_unit_range("lower_threshold", self.lower_threshold)?;
        check_unit_range("upper_threshold", self.upper_threshold)?;
        check_unit_range("randomness", self.randomness)?;
        check_unit_range("snap_fraction", self.snap_fraction)?;

        if self.lower_threshold > self.upper_threshold {
            return Err(invalid_parameter(
                "lower_threshold",
                &self.lower_threshold,
                &format!(
                    "must not exceed upper_threshold ({})",
                    self.upper_threshold
                ),
            ));
        }

        match &self.mask {
            MaskSource::Automaton { rule: Some(rule) } => {
                validate_rule(*rule)?;
            }
            MaskSource::Image(image) if self.interval.needs_mask() && image.is_empty() => {
                return Err(SortError::MaskUnavailable {
                    reason: "mask image has no pixels".to_string(),
                });
            }
            MaskSource::Disabled if self.interval.needs_mask() => {
                return Err(SortError::MaskUnavailable {
                    reason: format!("strategy '{}' requires a mask source", self.interval),
                });
            }
            _ => {}
        }

        Ok(())
    }
}

fn check_unit_range(parameter: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &"must be between 0 and 1",
        ))
    }
}
