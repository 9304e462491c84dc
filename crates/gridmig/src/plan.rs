//! Implementation of the `plan` subcommand.

use grid_migration::{GridSize, multistep};

use crate::{cli::PlanArgs, error::Result};

/// Grid sizes visited between `from` and `to`, one per line.
pub fn render(from: GridSize, to: GridSize) -> Result<String> {
    let path = multistep::plan(from, to)?;
    Ok(path.iter().map(|g| format!("{g}\n")).collect())
}

/// Run the `plan` subcommand.
pub fn run(args: &PlanArgs) -> Result<()> {
    print!("{}", render(args.from, args.to)?);
    Ok(())
}
