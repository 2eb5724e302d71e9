//! imgconv: Image Conversion CLI Tool
//!
//! Usage: `imgconv <INPUT> <FORMAT> [OUTPUT_DIR]`, or `imgconv --interactive`.

use anyhow::Result;
use clap::Parser;

use imgconv::cli::{run_cli, run_interactive, Cli};
use imgconv::utils::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if cli.interactive {
        return run_interactive(&cli);
    }

    run_cli(&cli)
}
