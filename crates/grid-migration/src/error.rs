//! Error handling for the grid migration engine.

use std::result;

use thiserror::Error;

use crate::{
    geom::GridSize,
    item::{ItemId, PageId},
};

/// Convenient result type for engine operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors surfaced by the engine.
///
/// Orphaned targets and hotseat/workspace overflow are never errors; they are
/// recovered in place and reported through the migration summary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A grid with a zero dimension.
    #[error("invalid grid {columns}x{rows}: both dimensions must be non-zero")]
    InvalidGrid {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// A grid size string that is not `<columns>x<rows>`.
    #[error("invalid grid spec '{0}', expected <columns>x<rows>")]
    GridSpec(String),
    /// An item is larger than an empty page of the target grid.
    #[error("item {id} spans {span_x}x{span_y} which cannot fit a {grid} grid")]
    FootprintExceedsGrid {
        /// Offending item.
        id: ItemId,
        /// Item width in cells.
        span_x: u32,
        /// Item height in cells.
        span_y: u32,
        /// Grid it had to fit.
        grid: GridSize,
    },
    /// An input workspace item lies outside its page's grid.
    #[error("item {id} on page {page} lies outside the {grid} grid")]
    OutOfBounds {
        /// Offending item.
        id: ItemId,
        /// Page holding the item.
        page: PageId,
        /// Grid the page belongs to.
        grid: GridSize,
    },
    /// Two workspace items on one page share a cell.
    #[error("items {first} and {second} overlap on page {page}")]
    Overlap {
        /// Page holding both items.
        page: PageId,
        /// Item encountered first.
        first: ItemId,
        /// Item encountered second.
        second: ItemId,
    },
    /// An item id occurs more than once (folder children included).
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    /// Two hotseat items claim the same slot.
    #[error("hotseat slot {slot} is occupied twice")]
    HotseatSlotTaken {
        /// Contested slot.
        slot: u32,
    },
    /// A hotseat item sits beyond the hotseat.
    #[error("hotseat slot {slot} is outside a hotseat of size {size}")]
    HotseatSlotOutOfRange {
        /// Offending slot.
        slot: u32,
        /// Hotseat size.
        size: u32,
    },
    /// The multi-step path produced the same size twice in a row.
    #[error("grid migration stalled at {size}")]
    StalledPath {
        /// Size at which no progress was made.
        size: GridSize,
    },
    /// An item could not be placed even on a fresh page.
    #[error("item {id} could not be placed on an empty page")]
    Unplaceable {
        /// Offending item.
        id: ItemId,
    },
}
