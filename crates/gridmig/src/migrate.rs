//! Implementation of the `migrate` subcommand.

use std::{
    fs,
    io::{self, Write as _},
};

use grid_migration::{
    MigrationOptions, MigrationOutcome, MigrationRequest, PackageSet, migrate_records,
    reader::records_from_layout,
};
use tracing::{info, warn};

use crate::{
    cli::MigrateArgs,
    document::{self, LayoutDocument},
    error::Result,
};

/// Migrate `doc` according to `request`, producing the document to store.
///
/// `request.source_grid` and `request.hotseat_source_size` are taken from
/// `doc`; the rest comes from the caller.
pub fn migrate_document(
    doc: &LayoutDocument,
    request: &MigrationRequest,
) -> Result<(LayoutDocument, MigrationOutcome)> {
    let request = MigrationRequest {
        source_grid: doc.grid,
        hotseat_source_size: doc.hotseat_size,
        ..*request
    };
    let outcome = match &doc.installed {
        Some(installed) => migrate_records(
            &request,
            &doc.records,
            &doc.pages,
            &PackageSet::new(installed.iter().map(String::as_str)),
        )?,
        None => migrate_records(&request, &doc.records, &doc.pages, &|_: &str| true)?,
    };
    let migrated = LayoutDocument {
        grid: request.target_grid,
        hotseat_size: request.hotseat_target_size,
        installed: doc.installed.clone(),
        pages: outcome.layout.pages.keys().copied().collect(),
        records: records_from_layout(&outcome.layout),
    };
    Ok((migrated, outcome))
}

/// Run the `migrate` subcommand.
pub fn run(args: &MigrateArgs) -> Result<()> {
    let doc = document::read(&args.input)?;
    let request = MigrationRequest {
        source_grid: doc.grid,
        target_grid: args.to,
        hotseat_source_size: doc.hotseat_size,
        hotseat_target_size: args.hotseat.unwrap_or(doc.hotseat_size),
        options: MigrationOptions {
            first_row_blocked: args.first_row_blocked,
            multi_step: !args.single_step,
            ..MigrationOptions::default()
        },
    };
    let (migrated, outcome) = migrate_document(&doc, &request)?;

    let summary = &outcome.summary;
    for id in &summary.evicted {
        warn!(id = %id, "evicted from hotseat");
    }
    info!(
        input = %args.input.display(),
        from = %doc.grid,
        to = %migrated.grid,
        unchanged = summary.unchanged,
        relocated = summary.relocated,
        moved = summary.moved,
        pages_created = summary.pages_created.len(),
        dropped = summary.dropped.len(),
        "layout migrated"
    );

    let text = document::render(&migrated, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, text)?,
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}
