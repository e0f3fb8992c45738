//! CLI entry point for the pixel sorting tool

use clap::Parser;
use pixelsort::io::cli::{Cli, FileProcessor};

fn main() -> pixelsort::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let processor = FileProcessor::new(cli);
    processor.process()
}
