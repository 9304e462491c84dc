#![warn(missing_docs)]

//! Entry point for the `gridmig` binary.

mod cli;
mod document;
mod error;
mod migrate;
mod plan;

use std::process;

use clap::Parser;
use tracing::error;

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log.spec());

    match command {
        Commands::Migrate(args) => migrate::run(&args),
        Commands::Plan(args) => plan::run(&args),
    }
}
