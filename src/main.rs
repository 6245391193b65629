//! CLI entry point for convolution kernel recovery

use clap::Parser;
use kernelfit::io::cli::{Cli, FileProcessor};
use kernelfit::io::logging::init_logging;

fn main() -> kernelfit::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
