//! Command-line interface for batch pixel sorting of image files

use crate::intervals::IntervalStrategy;
use crate::io::configuration::{
    DEFAULT_CHARACTERISTIC_LENGTH, DEFAULT_LOWER_THRESHOLD, DEFAULT_RANDOMNESS, DEFAULT_SEED,
    DEFAULT_SNAP_FRACTION, DEFAULT_UPPER_THRESHOLD, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, SortError, WithPath};
use crate::io::image::{load_image, save_image};
use crate::io::progress::ProgressManager;
use crate::sorting::config::{MaskSource, SortingConfig};
use crate::sorting::keys::SortKey;
use crate::sorting::pipeline::SortingPipeline;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pixelsort")]
#[command(
    author,
    version,
    about = "Sort pixels inside row intervals for glitch-art effects"
)]
/// Command-line arguments for the pixel sorting tool
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Interval strategy (random, threshold, edges, waves, none, file-mask,
    /// file-edges, snap, shuffle-total, shuffle-axis)
    #[arg(short, long, default_value_t = IntervalStrategy::default())]
    pub interval: IntervalStrategy,

    /// Sort key (lightness, intensity, hue, saturation, red, green, blue,
    /// alpha, minimum, maximum)
    #[arg(short, long, default_value_t = SortKey::default())]
    pub key: SortKey,

    /// Counter-clockwise rotation applied before sorting, in degrees
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Fraction of intervals left unsorted (0-1)
    #[arg(short, long, default_value_t = DEFAULT_RANDOMNESS)]
    pub randomness: f64,

    /// Lower lightness threshold, also the edge cutoff (0-1)
    #[arg(short, long, default_value_t = DEFAULT_LOWER_THRESHOLD)]
    pub lower: f64,

    /// Upper lightness threshold (0-1)
    #[arg(short, long, default_value_t = DEFAULT_UPPER_THRESHOLD)]
    pub upper: f64,

    /// Characteristic interval length in pixels
    #[arg(short = 'c', long, default_value_t = DEFAULT_CHARACTERISTIC_LENGTH)]
    pub length: usize,

    /// Mask image for file-mask and file-edges (a cellular automaton is used otherwise)
    #[arg(short, long, value_name = "MASK")]
    pub mask: Option<PathBuf>,

    /// Elementary cellular automaton rule for generated masks (0-255)
    #[arg(long)]
    pub rule: Option<u32>,

    /// Fraction of pixels relocated by the snap effect (0-1)
    #[arg(long, default_value_t = DEFAULT_SNAP_FRACTION)]
    pub snap_fraction: f64,

    /// Random seed for reproducible output
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Directory for sorted output (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Sorting configuration described by the flags, with the given mask source
    pub fn sorting_config(&self, mask: MaskSource) -> SortingConfig {
        SortingConfig {
            interval: self.interval,
            sort_key: self.key,
            angle: self.angle,
            randomness: self.randomness,
            lower_threshold: self.lower,
            upper_threshold: self.upper,
            characteristic_length: self.length,
            mask,
            snap_fraction: self.snap_fraction,
            seed: self.seed,
        }
    }

    /// Output path for `input_path`: `<stem>_sorted.png` in the output directory
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        match (&self.output, input_path.parent()) {
            (Some(dir), _) => dir.join(output_name),
            (None, Some(parent)) => parent.join(output_name),
            (None, None) => PathBuf::from(output_name),
        }
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<Arc<ProgressManager>>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli
            .should_show_progress()
            .then(|| Arc::new(ProgressManager::new()));

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is not a supported image or a directory
    /// - The flags don't form a valid sorting configuration
    /// - The mask image or an input image can't be loaded
    /// - An output image can't be written
    pub fn process(&self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("Nothing to process in {}", self.cli.target.display());
            return Ok(());
        }

        let config = self.cli.sorting_config(self.mask_source()?);
        config.validate()?;

        if let Some(ref pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&config, file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn mask_source(&self) -> Result<MaskSource> {
        match &self.cli.mask {
            Some(path) => Ok(MaskSource::Image(load_image(path)?)),
            None => Ok(MaskSource::Automaton {
                rule: self.cli.rule,
            }),
        }
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_supported(target) {
                return Err(SortError::InvalidTarget {
                    path: target.clone(),
                    reason: format!(
                        "file must be one of: {}",
                        SUPPORTED_EXTENSIONS.join(", ")
                    ),
                });
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target)? {
                let path = entry.with_path(target)?.path();
                if is_supported(&path) && !is_sorted_output(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(SortError::InvalidTarget {
                path: target.clone(),
                reason: "target must be an image file or directory".to_string(),
            })
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.cli.output_path(input_path);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&self, config: &SortingConfig, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.cli.output_path(input_path);

        let mut pipeline = SortingPipeline::new(config.clone())?;
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(index, input_path);
            pipeline = pipeline.with_observer(pm.observer(index));
        }

        let source = load_image(input_path)?;
        let sorted = pipeline.run(&source)?;
        save_image(&sorted, &output_path)?;

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(index);
        }

        log::info!(
            "Sorted {} -> {} in {:.2?}",
            input_path.display(),
            output_path.display(),
            start_time.elapsed()
        );

        Ok(())
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

fn is_sorted_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
