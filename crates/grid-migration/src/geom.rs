//! Grid geometry: workspace grid dimensions and cell rectangles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dimensions of a workspace page grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize")]
pub struct GridSize {
    /// Number of cell columns (x extent).
    columns: u32,
    /// Number of cell rows (y extent).
    rows: u32,
}

/// Unchecked serde mirror of [`GridSize`].
#[derive(Deserialize)]
struct RawGridSize {
    /// Column count as written in the document.
    columns: u32,
    /// Row count as written in the document.
    rows: u32,
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = Error;

    fn try_from(raw: RawGridSize) -> Result<Self> {
        Self::new(raw.columns, raw.rows)
    }
}

impl GridSize {
    /// Construct a grid size; both dimensions must be non-zero.
    pub fn new(columns: u32, rows: u32) -> Result<Self> {
        if columns == 0 || rows == 0 || columns.checked_mul(rows).is_none() {
            return Err(Error::InvalidGrid { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Column count.
    #[must_use]
    pub const fn columns(self) -> u32 {
        self.columns
    }

    /// Row count.
    #[must_use]
    pub const fn rows(self) -> u32 {
        self.rows
    }

    /// Total number of cells, saturating at `u32::MAX`.
    #[must_use]
    pub const fn cells(self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    /// Whether `rect` lies entirely inside this grid.
    #[must_use]
    pub fn contains(self, rect: CellRect) -> bool {
        rect.x.checked_add(rect.w).is_some_and(|r| r <= self.columns)
            && rect.y.checked_add(rect.h).is_some_and(|b| b <= self.rows)
    }

    /// Whether a `w`×`h` footprint fits on an empty page of this grid.
    #[must_use]
    pub fn admits(self, w: u32, h: u32) -> bool {
        w <= self.columns && h <= self.rows
    }

    /// Copy with a different column count.
    pub(crate) const fn with_columns(self, columns: u32) -> Self {
        Self { columns, ..self }
    }

    /// Copy with a different row count.
    pub(crate) const fn with_rows(self, rows: u32) -> Self {
        Self { rows, ..self }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

impl FromStr for GridSize {
    type Err = Error;

    /// Parse `"<columns>x<rows>"`, e.g. `"5x7"`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::GridSpec(s.to_string());
        let (c, r) = s.trim().split_once(['x', 'X']).ok_or_else(bad)?;
        let columns = c.trim().parse::<u32>().map_err(|_| bad())?;
        let rows = r.trim().parse::<u32>().map_err(|_| bad())?;
        Self::new(columns, rows)
    }
}

/// A rectangle of cells: origin `(x, y)` and span `w`×`h`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    /// Leftmost column.
    pub x: u32,
    /// Topmost row.
    pub y: u32,
    /// Span in columns.
    pub w: u32,
    /// Span in rows.
    pub h: u32,
}

impl CellRect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A 1×1 rectangle at `(x, y)`.
    #[must_use]
    pub const fn cell(x: u32, y: u32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Exclusive right edge, saturating at `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Footprint in cells, saturating at `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.w.saturating_mul(self.h)
    }

    /// Same span, new origin.
    #[must_use]
    pub const fn moved_to(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }

    /// Whether the two half-open rectangles share at least one cell.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{} {}x{})", self.x, self.y, self.w, self.h)
    }
}
