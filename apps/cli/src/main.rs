//! arcindex CLI — landing-index builder for phase-folder archives.
//!
//! Scans an archive checkout for phase folders, extracts article metadata,
//! and regenerates the single landing index page.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
