//! The in-memory item set: workspace pages plus the hotseat.

use std::collections::{BTreeMap, HashSet};

use crate::{
    error::{Error, Result},
    geom::GridSize,
    item::{Item, ItemId, PageId, Placement},
};

/// Items partitioned by container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Workspace items keyed by page, in ascending page order. Pages may be
    /// present with no items.
    pub pages: BTreeMap<PageId, Vec<Item>>,
    /// Hotseat slots; index `i` holds the item whose slot is `i`.
    pub hotseat: Vec<Option<Item>>,
}

impl Layout {
    /// Hotseat items in slot order.
    pub fn hotseat_items(&self) -> impl Iterator<Item = &Item> {
        self.hotseat.iter().flatten()
    }

    /// Every top-level item: pages in order, then the hotseat.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.pages.values().flatten().chain(self.hotseat_items())
    }

    /// Ids of all items, folder children included.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items().flat_map(Item::ids)
    }

    /// Number of top-level items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items().count()
    }

    /// Whether the layout holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest page id in use.
    #[must_use]
    pub fn last_page(&self) -> Option<PageId> {
        self.pages.keys().next_back().copied()
    }

    /// Check every layout invariant against `grid` and a hotseat of `hotseat_size`.
    ///
    /// Ids are unique, workspace items sit on the page they are keyed under,
    /// inside the grid and without overlap, and hotseat items sit in their own
    /// in-range slot.
    pub fn verify(&self, grid: GridSize, hotseat_size: u32) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.ids() {
            if !seen.insert(id) {
                return Err(Error::DuplicateId(id));
            }
        }

        for (&page, items) in &self.pages {
            let mut placed: Vec<(ItemId, _)> = Vec::with_capacity(items.len());
            for item in items {
                let rect = match item.placement {
                    Placement::Workspace { page: p, rect } if p == page => rect,
                    _ => {
                        return Err(Error::OutOfBounds {
                            id: item.id,
                            page,
                            grid,
                        });
                    }
                };
                if rect.w == 0 || rect.h == 0 || !grid.contains(rect) {
                    return Err(Error::OutOfBounds {
                        id: item.id,
                        page,
                        grid,
                    });
                }
                if let Some((other, _)) = placed.iter().find(|(_, r)| rect.intersects(r)) {
                    return Err(Error::Overlap {
                        page,
                        first: *other,
                        second: item.id,
                    });
                }
                placed.push((item.id, rect));
            }
        }

        for (index, entry) in self.hotseat.iter().enumerate() {
            let Some(item) = entry else { continue };
            let slot = item.slot().unwrap_or(u32::MAX);
            if slot >= hotseat_size {
                return Err(Error::HotseatSlotOutOfRange {
                    slot,
                    size: hotseat_size,
                });
            }
            if slot as usize != index {
                return Err(Error::HotseatSlotTaken { slot });
            }
        }
        Ok(())
    }
}
