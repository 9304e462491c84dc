//! Relocating workspace items onto a new grid.
//!
//! Each page is migrated in ascending page order. Items that still fit keep
//! their position; the rest are re-placed on the same page, largest footprint
//! first. Whatever cannot stay on its page joins a single global queue that is
//! drained afterwards across all pages, allocating new pages only when no
//! existing page has room. Sharing one queue lets leftovers from several
//! pages consolidate onto one new page.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::{Error, Result},
    geom::{CellRect, GridSize},
    item::{Item, PageId, Placement, reading_order},
    occupancy::OccupancyMap,
};

/// Result of one workspace migration step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkspaceOutcome {
    /// Items by page, each page in reading order.
    pub pages: BTreeMap<PageId, Vec<Item>>,
    /// Items left exactly where they were.
    pub unchanged: usize,
    /// Items re-placed on their own page.
    pub relocated: usize,
    /// Items moved to a different page.
    pub moved: usize,
    /// Pages allocated for overflow, in allocation order.
    pub created: Vec<PageId>,
}

/// Workspace rectangle of an item keyed under a page.
fn footprint(item: &Item) -> CellRect {
    item.rect().unwrap_or(CellRect::cell(0, 0))
}

/// Fresh occupancy for one page, optionally with row 0 reserved.
fn seed_map(grid: GridSize, blocked: bool) -> OccupancyMap {
    let mut map = OccupancyMap::new(grid);
    if blocked {
        map.mark_region(0, 0, grid.columns(), 1, true);
    }
    map
}

/// Put `item` at `(x, y)` on `page` and fill its cells.
fn place(mut item: Item, page: PageId, x: u32, y: u32, map: &mut OccupancyMap) -> Item {
    if let Some(rect) = item.rect() {
        let rect = rect.moved_to(x, y);
        map.fill(rect);
        item.placement = Placement::Workspace { page, rect };
    }
    item
}

/// Migrate `pages` onto `target`.
///
/// With `first_row_blocked`, row 0 of the lowest page id is unavailable and
/// anything sitting there is displaced like any other overflow. Fails only if
/// an item is larger than an empty `target` page.
pub fn migrate_workspace(
    pages: BTreeMap<PageId, Vec<Item>>,
    target: GridSize,
    first_row_blocked: bool,
) -> Result<WorkspaceOutcome> {
    for item in pages.values().flatten() {
        let rect = footprint(item);
        if !target.admits(rect.w, rect.h) {
            return Err(Error::FootprintExceedsGrid {
                id: item.id,
                span_x: rect.w,
                span_y: rect.h,
                grid: target,
            });
        }
    }

    let first_page = pages.keys().next().copied();
    let mut outcome = WorkspaceOutcome::default();
    let mut maps: BTreeMap<PageId, OccupancyMap> = BTreeMap::new();
    let mut queue: Vec<Item> = Vec::new();

    for (page, mut items) in pages {
        items.sort_by(reading_order);
        let mut map = seed_map(target, first_row_blocked && Some(page) == first_page);
        let mut placed = Vec::with_capacity(items.len());
        let mut overflow = Vec::new();

        for item in items {
            let rect = footprint(&item);
            if target.contains(rect) && map.is_region_vacant(rect.x, rect.y, rect.w, rect.h) {
                map.fill(rect);
                placed.push(item);
            } else {
                overflow.push(item);
            }
        }
        outcome.unchanged += placed.len();

        // Stable sort: equal footprints keep their reading order.
        overflow.sort_by(|a, b| b.area().cmp(&a.area()));
        let displaced = overflow.len();
        for item in overflow {
            let rect = footprint(&item);
            match map.find_vacant_region(rect.w, rect.h) {
                Some((x, y)) => {
                    debug!(id = %item.id, page = %page, x, y, "relocated on page");
                    placed.push(place(item, page, x, y, &mut map));
                    outcome.relocated += 1;
                }
                None => queue.push(item),
            }
        }
        debug!(
            page = %page,
            kept = placed.len(),
            displaced,
            vacant = map.vacant_cells(),
            "page migrated"
        );
        outcome.pages.insert(page, placed);
        maps.insert(page, map);
    }

    for item in queue {
        let rect = footprint(&item);
        let found = maps.iter().find_map(|(page, map)| {
            map.find_vacant_region(rect.w, rect.h)
                .map(|(x, y)| (*page, x, y))
        });
        let (page, x, y) = match found {
            Some(spot) => spot,
            None => {
                let page = maps
                    .keys()
                    .next_back()
                    .map_or(PageId::new(0), |p| p.next());
                let map = seed_map(target, false);
                let (x, y) = map
                    .find_vacant_region(rect.w, rect.h)
                    .ok_or(Error::Unplaceable { id: item.id })?;
                debug!(page = %page, "allocating page for overflow");
                maps.insert(page, map);
                outcome.created.push(page);
                (page, x, y)
            }
        };
        debug!(id = %item.id, page = %page, x, y, "placed overflow item");
        let map = maps
            .get_mut(&page)
            .ok_or(Error::Unplaceable { id: item.id })?;
        let item = place(item, page, x, y, map);
        outcome.pages.entry(page).or_default().push(item);
        outcome.moved += 1;
    }

    for items in outcome.pages.values_mut() {
        items.sort_by(reading_order);
    }
    Ok(outcome)
}
