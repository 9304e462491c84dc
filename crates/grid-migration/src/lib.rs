#![warn(missing_docs)]

//! Grid migration engine for home-screen layouts.
//!
//! Re-places icons, shortcuts, folders and widgets laid out for one workspace
//! grid and hotseat size onto another, deterministically and without losing
//! anything that can be kept:
//! - [`reader`]: turn persisted records into a [`Layout`], dropping orphans
//! - [`hotseat`]: resize the hotseat with weighted eviction
//! - [`workspace`]: relocate items that no longer fit, adding pages if needed
//! - [`multistep`]: split large grid changes into one-cell steps
//! - [`engine`]: the single entry point tying these together
//!
//! The engine is a pure, synchronous transform over in-memory data. Callers
//! own persistence and must not run two migrations over the same stored
//! layout concurrently.

pub mod engine;
mod error;
pub mod geom;
pub mod hotseat;
pub mod item;
pub mod layout;
pub mod multistep;
pub mod occupancy;
pub mod rank;
pub mod reader;
pub mod workspace;

#[cfg(test)]
mod property_tests;

pub use engine::{
    MigrationOptions, MigrationOutcome, MigrationRequest, MigrationSummary, migrate,
    migrate_records,
};
pub use error::{Error, Result};
pub use geom::{CellRect, GridSize};
pub use item::{Item, ItemId, ItemKind, PageId, Placement};
pub use layout::Layout;
pub use rank::{RankingPolicy, Weight};
pub use reader::{DropReason, ItemReader, PackageSet, Record, RecordContainer, TargetResolver};
