//! Input/output boundary
//!
//! This module contains everything outside the pure sorting core:
//! - Command-line parsing and batch file processing
//! - Default parameters and tuning constants
//! - Error types
//! - Image decoding and encoding
//! - Terminal progress display

/// Command-line interface and file batch processing
pub mod cli;
/// Default parameters and tuning constants
pub mod configuration;
/// Error types and path context
pub mod error;
/// Image file loading and saving
pub mod image;
/// Multi-file progress bars
pub mod progress;
