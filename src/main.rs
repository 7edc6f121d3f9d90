//! CLI entry point for overlapping wave function collapse synthesis

use clap::Parser;
use wavetile::io::cli::{Cli, FileProcessor};
use wavetile::io::logging;

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
