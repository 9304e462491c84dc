//! Placed items and their identifiers.

use std::{cmp::Ordering, fmt, iter};

use serde::{Deserialize, Serialize};

use crate::geom::CellRect;

/// Stable identifier of an item, unique within one layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a workspace page. Pages are ordered by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(u32);

impl PageId {
    /// Wrap a raw page id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw page id value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for PageId {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an item is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Launcher icon for an installed application.
    Application,
    /// Legacy pinned shortcut.
    Shortcut,
    /// App-published shortcut.
    DeepShortcut,
    /// Folder owning an ordered list of children.
    Folder,
    /// Folder-like pair of exactly two applications.
    AppPair,
    /// App widget hosted on the workspace.
    Widget,
}

impl ItemKind {
    /// Kinds that own children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Folder | Self::AppPair)
    }

    /// Kinds that may live in a folder.
    #[must_use]
    pub const fn is_folder_child(self) -> bool {
        matches!(self, Self::Application | Self::Shortcut | Self::DeepShortcut)
    }
}

/// Where an item lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// A rectangle of cells on a workspace page.
    Workspace {
        /// Owning page.
        page: PageId,
        /// Occupied cells.
        rect: CellRect,
    },
    /// One slot of the hotseat.
    Hotseat {
        /// Zero-based slot index.
        slot: u32,
    },
    /// Inside a folder or app pair.
    Folder {
        /// Owning folder.
        parent: ItemId,
        /// Zero-based position within the folder.
        rank: u32,
    },
}

/// One placed element of the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Stable identity.
    pub id: ItemId,
    /// Item category.
    pub kind: ItemKind,
    /// Current container and position.
    pub placement: Placement,
    /// Backing package, if the kind has one.
    pub package: Option<String>,
    /// Folder contents in folder order; empty for non-containers.
    pub children: Vec<Item>,
}

impl Item {
    /// Workspace rectangle, if the item is on a page.
    #[must_use]
    pub fn rect(&self) -> Option<CellRect> {
        match self.placement {
            Placement::Workspace { rect, .. } => Some(rect),
            _ => None,
        }
    }

    /// Page id, if the item is on a page.
    #[must_use]
    pub fn page(&self) -> Option<PageId> {
        match self.placement {
            Placement::Workspace { page, .. } => Some(page),
            _ => None,
        }
    }

    /// Hotseat slot, if the item is in the hotseat.
    #[must_use]
    pub fn slot(&self) -> Option<u32> {
        match self.placement {
            Placement::Hotseat { slot } => Some(slot),
            _ => None,
        }
    }

    /// Occupied footprint; items off the workspace count as a single cell.
    #[must_use]
    pub fn area(&self) -> u32 {
        self.rect().map_or(1, |r| r.area())
    }

    /// Ids of the item and all its children, parent first.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        iter::once(self.id).chain(self.children.iter().map(|c| c.id))
    }
}

/// Reading order on a page: row, then column, then id.
pub(crate) fn reading_order(a: &Item, b: &Item) -> Ordering {
    let key = |i: &Item| i.rect().map(|r| (r.y, r.x));
    key(a).cmp(&key(b)).then(a.id.cmp(&b.id))
}


#[cfg(test)]
mod tests {
    use super::{test_support::*, *};

    #[test]
    fn reading_order_is_row_major() {
        let mut items = vec![app(3, 0, 0, 1), app(2, 0, 2, 0), app(1, 0, 1, 0)];
        items.sort_by(reading_order);
        let ids: Vec<u64> = items.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn hotseat_items_count_as_one_cell() {
        let d = docked(ItemKind::Folder, 9, 2);
        assert_eq!(d.area(), 1);
        assert_eq!(d.slot(), Some(2));
        assert!(d.rect().is_none());
    }
}
