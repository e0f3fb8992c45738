//! Interval generation
//!
//! This module contains everything that decides which pixels get sorted together:
//! - Interval ranges and run/tiling helpers
//! - Boolean masks
//! - Edge detection
//! - Elementary cellular automaton patterns
//! - Strategy catalog and the per-row engine

/// Elementary cellular automaton mask generator
pub mod automaton;
/// Laplacian edge detection
pub mod edges;
/// Half-open index ranges and builders
pub mod interval;
/// Boolean pixel masks
pub mod mask;
/// Strategy catalog and per-row interval engine
pub mod strategy;

pub use interval::Interval;
pub use mask::Mask;
pub use strategy::{IntervalEngine, IntervalStrategy};
