// src/bin/cli.rs
use std::process::ExitCode;

use lighting_filters::cli;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    cli::run()
}
