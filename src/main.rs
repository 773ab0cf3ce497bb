//! CLI entry point for C-shape marking sessions

use clap::Parser;
use cshape::io::cli::{Cli, run_cli};
use cshape::io::logging::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run_cli(cli, std::io::stdin().lock(), &mut std::io::stderr())
}
