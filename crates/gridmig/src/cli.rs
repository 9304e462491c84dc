//! Command-line interface definitions for gridmig.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use grid_migration::GridSize;
use logging::LogArgs;

/// Command-line interface for the `gridmig` binary.
#[derive(Parser, Debug)]
#[command(
    name = "gridmig",
    about = "Migrate home-screen layouts between grid sizes",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate a layout document onto a new grid.
    Migrate(MigrateArgs),
    /// Print the intermediate grid sizes between two grids.
    Plan(PlanArgs),
}

/// Serialization format of a layout document.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Rusty Object Notation.
    #[default]
    Ron,
    /// JSON.
    Json,
}

/// Arguments for the `migrate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Layout document to read; `.json` files are parsed as JSON, anything else as RON.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Target grid, e.g. `5x7`.
    #[arg(long, value_name = "CxR")]
    pub to: GridSize,

    /// Target hotseat size; defaults to the document's hotseat size.
    #[arg(long, value_name = "N")]
    pub hotseat: Option<u32>,

    /// Reserve the top row of the first page.
    #[arg(long)]
    pub first_row_blocked: bool,

    /// Jump straight to the target grid instead of stepping one cell at a time.
    #[arg(long)]
    pub single_step: bool,

    /// Write the migrated document here instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Ron)]
    pub format: Format,
}

/// Arguments for the `plan` subcommand.
#[derive(Args, Debug, Clone, Copy)]
pub struct PlanArgs {
    /// Source grid, e.g. `3x3`.
    #[arg(long, value_name = "CxR")]
    pub from: GridSize,

    /// Target grid, e.g. `5x7`.
    #[arg(long, value_name = "CxR")]
    pub to: GridSize,
}
