//! Sort keys, configuration and the sorting pipeline
//!
//! This module contains the sorting-related functionality:
//! - Pixel sort key catalog
//! - Validated parameter bundle
//! - Rotate, partition, sort and reassemble stages
//! - Progress observation hooks

/// Validated sorting parameters and mask sources
pub mod config;
/// Sort key catalog
pub mod keys;
/// Staged sorting pipeline
pub mod pipeline;
/// Progress observer trait and steps
pub mod progress;

pub use config::{MaskSource, SortingConfig};
pub use keys::SortKey;
pub use pipeline::{RotatedImage, SortingPipeline};
pub use progress::{ProgressObserver, ProgressStep};
