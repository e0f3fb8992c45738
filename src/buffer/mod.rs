//! Pixel data model
//!
//! This module contains the buffer-related functionality:
//! - RGBA pixel values
//! - Fixed-size pixel grids with cropping
//! - Canvas-expanding rotation with padding tracking

/// RGBA pixel value type
pub mod pixel;
/// Fixed-size pixel grid
pub mod pixel_buffer;
/// Rotation geometry and resampling
pub mod rotation;

pub use pixel::Pixel;
pub use pixel_buffer::PixelBuffer;
pub use rotation::Rotation;
