use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use crate::{
    engine::{MigrationOptions, MigrationRequest, migrate},
    geom::{CellRect, GridSize},
    item::{Item, ItemId, ItemKind, PageId, Placement},
    layout::Layout,
    occupancy::OccupancyMap,
};

/// Candidate item: page, origin and span.
type Candidate = (u32, u32, u32, u32, u32);

/// Build a valid source layout by greedily accepting candidates that fit.
fn build_layout(
    source: GridSize,
    target: GridSize,
    candidates: &[Candidate],
    docked: &[bool],
    hotseat_size: u32,
) -> Layout {
    let mut maps: BTreeMap<u32, OccupancyMap> = BTreeMap::new();
    let mut pages: BTreeMap<PageId, Vec<Item>> = BTreeMap::new();
    let mut next_id = 1u64;
    for &(page, x, y, w, h) in candidates {
        if !target.admits(w, h) {
            continue;
        }
        let map = maps.entry(page).or_insert_with(|| OccupancyMap::new(source));
        if !map.is_region_vacant(x, y, w, h) {
            continue;
        }
        let rect = CellRect::new(x, y, w, h);
        map.fill(rect);
        let kind = if rect.area() > 1 {
            ItemKind::Widget
        } else {
            ItemKind::Application
        };
        pages.entry(PageId::new(page)).or_default().push(Item {
            id: ItemId::new(next_id),
            kind,
            placement: Placement::Workspace {
                page: PageId::new(page),
                rect,
            },
            package: None,
            children: Vec::new(),
        });
        next_id += 1;
    }

    let mut hotseat: Vec<Option<Item>> = vec![None; hotseat_size as usize];
    for (slot, is_app) in docked.iter().enumerate().take(hotseat_size as usize) {
        hotseat[slot] = Some(Item {
            id: ItemId::new(next_id),
            kind: if *is_app {
                ItemKind::Application
            } else {
                ItemKind::Shortcut
            },
            placement: Placement::Hotseat { slot: slot as u32 },
            package: None,
            children: Vec::new(),
        });
        next_id += 1;
    }
    Layout { pages, hotseat }
}

fn grid_strategy() -> impl Strategy<Value = GridSize> {
    (1u32..7, 1u32..7).prop_map(|(c, r)| GridSize::new(c, r).expect("non-zero grid"))
}

fn scenario() -> impl Strategy<Value = (MigrationRequest, Layout)> {
    (grid_strategy(), grid_strategy(), 0u32..8, 0u32..8, any::<bool>(), any::<bool>())
        .prop_flat_map(|(source, target, hs_src, hs_dst, blocked, multi)| {
            let (cols, rows) = (source.columns(), source.rows());
            // Clamp origins so every candidate lies inside the source grid.
            let cand = (0u32..3, 0..cols, 0..rows, 1..=cols.min(3), 1..=rows.min(3))
                .prop_map(move |(page, x, y, w, h)| {
                    (page, x.min(cols - w), y.min(rows - h), w, h)
                });
            (
                Just((source, target, hs_src, hs_dst, blocked, multi)),
                prop::collection::vec(cand, 0..24),
                prop::collection::vec(any::<bool>(), 0..8),
            )
        })
        .prop_map(|((source, target, hs_src, hs_dst, blocked, multi), cands, docked)| {
            let request = MigrationRequest {
                source_grid: source,
                target_grid: target,
                hotseat_source_size: hs_src,
                hotseat_target_size: hs_dst,
                options: MigrationOptions {
                    first_row_blocked: blocked,
                    multi_step: multi,
                    ..MigrationOptions::default()
                },
            };
            (request, build_layout(source, target, &cands, &docked, hs_src))
        })
}

proptest! {
    #[test]
    fn output_satisfies_layout_invariants((request, layout) in scenario()) {
        let out = migrate(&request, layout).expect("well-formed input migrates");
        prop_assert!(out.layout.verify(request.target_grid, request.hotseat_target_size).is_ok());
        for item in out.layout.pages.values().flatten() {
            let rect = item.rect().expect("workspace item");
            prop_assert!(request.target_grid.contains(rect));
        }
    }

    #[test]
    fn hotseat_is_contiguous_and_bounded((request, layout) in scenario()) {
        let out = migrate(&request, layout).expect("migrate");
        let slots: Vec<u32> = out.layout.hotseat_items().filter_map(Item::slot).collect();
        prop_assert!(slots.len() <= request.hotseat_target_size as usize);
        prop_assert_eq!(slots, (0..out.layout.hotseat_items().count() as u32).collect::<Vec<_>>());
        let first_gap = out.layout.hotseat.iter().position(Option::is_none);
        if let Some(gap) = first_gap {
            prop_assert!(out.layout.hotseat[gap..].iter().all(Option::is_none));
        }
    }

    #[test]
    fn items_are_conserved_except_evictions((request, layout) in scenario()) {
        let before: BTreeSet<ItemId> = layout.ids().collect();
        let out = migrate(&request, layout).expect("migrate");
        let after: BTreeSet<ItemId> = out.layout.ids().collect();
        let evicted: BTreeSet<ItemId> = out.summary.evicted.iter().copied().collect();
        prop_assert!(after.is_subset(&before));
        prop_assert!(after.is_disjoint(&evicted));
        let expected: BTreeSet<ItemId> = before.difference(&evicted).copied().collect();
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn migration_is_deterministic((request, layout) in scenario()) {
        let a = migrate(&request, layout.clone()).expect("migrate");
        let b = migrate(&request, layout).expect("migrate");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn blocked_first_row_stays_empty((request, layout) in scenario()) {
        let first = layout.pages.keys().next().copied();
        let out = migrate(&request, layout).expect("migrate");
        let resized = request.source_grid != request.target_grid;
        if let (true, true, Some(first)) = (request.options.first_row_blocked, resized, first) {
            let row0 = CellRect::new(0, 0, request.target_grid.columns(), 1);
            for item in &out.layout.pages[&first] {
                prop_assert!(!item.rect().expect("rect").intersects(&row0));
            }
        }
    }
}
