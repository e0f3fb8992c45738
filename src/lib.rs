//! Interval-based pixel sorting for glitch-art images
//!
//! An image is rotated, each row is split into intervals by a strategy
//! (random widths, lightness thresholds, edges, bands, masks), the pixels inside
//! every interval are sorted by a key, and the result is rotated back. A few
//! strategies replace sorting with whole-image effects that relocate or shuffle pixels.

#![deny(unsafe_code)]

/// Pixel values, pixel buffers and rotation geometry
pub mod buffer;
/// Whole-image snap and shuffle effects
pub mod effects;
/// Interval strategies, masks and edge detection
pub mod intervals;
/// Input/output operations and error handling
pub mod io;
/// Sort keys, configuration and the staged sorting pipeline
pub mod sorting;

pub use io::error::{Result, SortError};
