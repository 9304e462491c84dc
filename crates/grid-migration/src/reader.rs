//! Loading persisted placement records into a [`Layout`].
//!
//! The reader resolves every record's backing target and silently drops the
//! ones that no longer resolve; such items are treated as orphaned and are
//! never placed. Folder children are attached to their parent, and folders
//! left without valid children are dropped as well. Every drop is reported in
//! the returned [`ReadOutcome`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    geom::CellRect,
    item::{Item, ItemId, ItemKind, PageId, Placement, reading_order},
    layout::Layout,
};

/// Container column of a persisted record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordContainer {
    /// On a workspace page.
    Workspace(PageId),
    /// In a hotseat slot.
    Hotseat(u32),
    /// Inside the folder with this id.
    Folder(ItemId),
}

/// One persisted placement row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Item id.
    pub id: ItemId,
    /// Item category.
    pub kind: ItemKind,
    /// Owning container.
    pub container: RecordContainer,
    /// Cell rectangle; only meaningful for workspace records.
    #[serde(default = "unit_cell")]
    pub cell: CellRect,
    /// Backing package (app, shortcut target or widget provider).
    #[serde(default)]
    pub package: Option<String>,
}

/// Default record cell: a single cell at the origin.
fn unit_cell() -> CellRect {
    CellRect::cell(0, 0)
}

/// Answers whether an item's backing target still exists.
pub trait TargetResolver {
    /// True when `package` is installed or being installed.
    fn resolves(&self, package: &str) -> bool;
}

impl<F> TargetResolver for F
where
    F: Fn(&str) -> bool,
{
    fn resolves(&self, package: &str) -> bool {
        self(package)
    }
}

/// Resolver backed by a set of known package names.
#[derive(Clone, Debug, Default)]
pub struct PackageSet(HashSet<String>);

impl PackageSet {
    /// Build from package names.
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(packages.into_iter().map(Into::into).collect())
    }
}

impl TargetResolver for PackageSet {
    fn resolves(&self, package: &str) -> bool {
        self.0.contains(package)
    }
}

/// Why a record was left out of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Backing package no longer resolves.
    OrphanedTarget,
    /// Folder with no valid children.
    EmptyFolder,
    /// App pair without exactly two valid children.
    InvalidAppPair {
        /// Valid children found.
        children: usize,
    },
    /// Child whose folder is missing or was dropped.
    MissingParent,
    /// Kind cannot live in this container.
    UnsupportedContainer,
    /// Hotseat record beyond the source hotseat.
    BeyondHotseat {
        /// Recorded slot.
        slot: u32,
    },
}

/// Result of reading records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadOutcome {
    /// Surviving items.
    pub layout: Layout,
    /// Dropped record ids with the reason, in id order.
    pub dropped: Vec<(ItemId, DropReason)>,
}

/// Loads records against a resolver and a source hotseat size.
pub struct ItemReader<'a, R: ?Sized> {
    /// Target existence oracle.
    resolver: &'a R,
    /// Hotseat size the records were written for.
    hotseat_size: u32,
}

impl<'a, R> ItemReader<'a, R>
where
    R: TargetResolver + ?Sized,
{
    /// Create a reader for records written against a hotseat of `hotseat_size`.
    pub fn new(resolver: &'a R, hotseat_size: u32) -> Self {
        Self {
            resolver,
            hotseat_size,
        }
    }

    /// Whether a record with `package` has a live target.
    fn target_ok(&self, kind: ItemKind, package: Option<&str>) -> bool {
        match package {
            Some(p) => self.resolver.resolves(p),
            // Widgets always name a provider; icons without one have nothing to verify.
            None => kind != ItemKind::Widget,
        }
    }

    /// Read `records`, keeping `pages` as pages even when they end up empty.
    ///
    /// Fails only on malformed input: duplicate ids or two hotseat records
    /// claiming one slot.
    pub fn read(&self, records: &[Record], pages: &[PageId]) -> Result<ReadOutcome> {
        let mut ids = HashSet::new();
        for r in records {
            if !ids.insert(r.id) {
                return Err(Error::DuplicateId(r.id));
            }
        }

        let mut dropped = BTreeMap::new();
        let mut children: HashMap<ItemId, Vec<&Record>> = HashMap::new();
        for r in records {
            if let RecordContainer::Folder(parent) = r.container {
                if !r.kind.is_folder_child() {
                    dropped.insert(r.id, DropReason::UnsupportedContainer);
                } else if !self.target_ok(r.kind, r.package.as_deref()) {
                    dropped.insert(r.id, DropReason::OrphanedTarget);
                } else {
                    children.entry(parent).or_default().push(r);
                }
            }
        }

        let mut layout = Layout {
            pages: pages.iter().map(|p| (*p, Vec::new())).collect(),
            hotseat: vec![None; self.hotseat_size as usize],
        };
        for r in records {
            let placement = match r.container {
                RecordContainer::Folder(_) => continue,
                RecordContainer::Workspace(page) => {
                    layout.pages.entry(page).or_default();
                    Placement::Workspace {
                        page,
                        rect: r.cell,
                    }
                }
                RecordContainer::Hotseat(slot) => {
                    if slot >= self.hotseat_size {
                        dropped.insert(r.id, DropReason::BeyondHotseat { slot });
                        continue;
                    }
                    if r.kind == ItemKind::Widget {
                        dropped.insert(r.id, DropReason::UnsupportedContainer);
                        continue;
                    }
                    Placement::Hotseat { slot }
                }
            };

            let kids = if r.kind.is_container() {
                children.remove(&r.id).unwrap_or_default()
            } else if self.target_ok(r.kind, r.package.as_deref()) {
                Vec::new()
            } else {
                dropped.insert(r.id, DropReason::OrphanedTarget);
                continue;
            };
            match (r.kind, kids.len()) {
                (ItemKind::Folder, 0) => {
                    dropped.insert(r.id, DropReason::EmptyFolder);
                    continue;
                }
                (ItemKind::AppPair, n) if n != 2 => {
                    dropped.insert(r.id, DropReason::InvalidAppPair { children: n });
                    for k in kids {
                        dropped.insert(k.id, DropReason::MissingParent);
                    }
                    continue;
                }
                _ => {}
            }

            let item = Item {
                id: r.id,
                kind: r.kind,
                placement,
                package: r.package.clone(),
                children: kids
                    .into_iter()
                    .enumerate()
                    .map(|(rank, k)| Item {
                        id: k.id,
                        kind: k.kind,
                        placement: Placement::Folder {
                            parent: r.id,
                            rank: rank as u32,
                        },
                        package: k.package.clone(),
                        children: Vec::new(),
                    })
                    .collect(),
            };
            if let Some(slot) = item.slot() {
                let entry = &mut layout.hotseat[slot as usize];
                if entry.is_some() {
                    return Err(Error::HotseatSlotTaken { slot });
                }
                *entry = Some(item);
            } else if let Some(page) = item.page() {
                layout.pages.entry(page).or_default().push(item);
            }
        }

        let orphans: BTreeSet<ItemId> = children.values().flatten().map(|k| k.id).collect();
        for id in orphans {
            dropped.insert(id, DropReason::MissingParent);
        }
        for items in layout.pages.values_mut() {
            items.sort_by(reading_order);
        }

        for (id, reason) in &dropped {
            warn!(id = %id, ?reason, "dropping record");
        }
        debug!(
            pages = layout.pages.len(),
            items = layout.len(),
            dropped = dropped.len(),
            "records read"
        );
        Ok(ReadOutcome {
            layout,
            dropped: dropped.into_iter().collect(),
        })
    }
}

/// Flatten a layout back into records, folder children after their parent.
#[must_use]
pub fn records_from_layout(layout: &Layout) -> Vec<Record> {
    let mut out = Vec::new();
    for item in layout.items() {
        let (container, cell) = match item.placement {
            Placement::Workspace { page, rect } => (RecordContainer::Workspace(page), rect),
            Placement::Hotseat { slot } => (RecordContainer::Hotseat(slot), CellRect::cell(slot, 0)),
            Placement::Folder { parent, rank } => {
                (RecordContainer::Folder(parent), CellRect::cell(rank, 0))
            }
        };
        out.push(Record {
            id: item.id,
            kind: item.kind,
            container,
            cell,
            package: item.package.clone(),
        });
        for (rank, child) in item.children.iter().enumerate() {
            out.push(Record {
                id: child.id,
                kind: child.kind,
                container: RecordContainer::Folder(item.id),
                cell: CellRect::cell(rank as u32, 0),
                package: child.package.clone(),
            });
        }
    }
    out
}
