//! Sorting constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible sorting
pub const DEFAULT_SEED: u64 = 42;

/// Default lower lightness bound for threshold intervals and edge response
pub const DEFAULT_LOWER_THRESHOLD: f64 = 0.25;

/// Default upper lightness bound for threshold intervals
pub const DEFAULT_UPPER_THRESHOLD: f64 = 0.8;

/// Default mean interval width for random and wave intervals
pub const DEFAULT_CHARACTERISTIC_LENGTH: usize = 50;

/// Default fraction of intervals left unsorted
pub const DEFAULT_RANDOMNESS: f64 = 0.1;

/// Default fraction of pixels relocated by the snap effect
pub const DEFAULT_SNAP_FRACTION: f64 = 0.5;

// Interval generation settings
/// Largest extra width added to each wave interval
pub const WAVE_JITTER: usize = 10;

/// Lightness above which an external mask image pixel counts as "on"
pub const MASK_IMAGE_THRESHOLD: f64 = 0.5;

/// Rules drawn from when no cellular automaton rule is configured
pub const RECOMMENDED_RULES: [u8; 17] = [
    26, 19, 23, 25, 35, 106, 11, 110, 45, 41, 105, 54, 3, 15, 9, 154, 142,
];

/// Pixel size of one automaton cell for ordinary images
pub const AUTOMATON_CELL_SIZE: usize = 4;

/// Pixel size of one automaton cell along axes longer than `AUTOMATON_LARGE_AXIS`
pub const AUTOMATON_LARGE_CELL_SIZE: usize = 8;

// Coarser cells keep generation cheap on very large images
/// Axis length above which the large cell size is used
pub const AUTOMATON_LARGE_AXIS: usize = 2500;

// Parallel execution settings
/// Rows sorted between two progress notifications
pub const ROW_BATCH_SIZE: usize = 64;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_sorted";
/// Extension of every written image
pub const OUTPUT_EXTENSION: &str = "png";
/// Input file extensions picked up from directories
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];
