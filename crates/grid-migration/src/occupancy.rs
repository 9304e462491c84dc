//! Per-page cell occupancy.
//!
//! An [`OccupancyMap`] tracks which cells of one page are filled and answers
//! the placement queries the workspace migrator needs. Searches scan in
//! row-major order (y outer, x inner, both ascending), so the first vacant
//! region in reading order always wins.

use crate::geom::{CellRect, GridSize};

/// Filled/vacant state of every cell on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMap {
    /// Grid the map covers.
    grid: GridSize,
    /// Row-major cell flags, `true` when filled.
    cells: Vec<bool>,
}

impl OccupancyMap {
    /// An all-vacant map for `grid`.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            cells: vec![false; grid.cells() as usize],
        }
    }

    /// Grid covered by this map.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Flat index of cell `(x, y)`.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.grid.columns() + x) as usize
    }

    /// Set every cell of `x, y, w, h` to `filled`.
    ///
    /// The caller guarantees the rectangle lies within the grid.
    pub fn mark_region(&mut self, x: u32, y: u32, w: u32, h: u32, filled: bool) {
        for cy in y..y + h {
            for cx in x..x + w {
                let i = self.index(cx, cy);
                self.cells[i] = filled;
            }
        }
    }

    /// Mark `rect` as filled.
    pub fn fill(&mut self, rect: CellRect) {
        self.mark_region(rect.x, rect.y, rect.w, rect.h, true);
    }

    /// True iff every cell in the rectangle is vacant.
    ///
    /// Rectangles reaching past the grid are never vacant.
    #[must_use]
    pub fn is_region_vacant(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if !self.grid.contains(CellRect::new(x, y, w, h)) {
            return false;
        }
        (y..y + h).all(|cy| (x..x + w).all(|cx| !self.cells[self.index(cx, cy)]))
    }

    /// First origin in reading order whose `w`×`h` region is vacant.
    #[must_use]
    pub fn find_vacant_region(&self, w: u32, h: u32) -> Option<(u32, u32)> {
        if !self.grid.admits(w, h) {
            return None;
        }
        for y in 0..=self.grid.rows() - h {
            for x in 0..=self.grid.columns() - w {
                if self.is_region_vacant(x, y, w, h) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Number of vacant cells.
    #[must_use]
    pub fn vacant_cells(&self) -> usize {
        self.cells.iter().filter(|c| !**c).count()
    }
}
