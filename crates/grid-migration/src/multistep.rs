//! Migrating across large grid changes one unit at a time.
//!
//! A path from the source to the target size changes a single dimension by
//! one cell per step. Growth comes before shrinkage, columns before rows, so
//! items gain room before any is taken away. Each step runs the workspace
//! migrator on the previous step's output.

use std::collections::BTreeMap;

use tracing::info;

use crate::{
    error::{Error, Result},
    geom::GridSize,
    item::{Item, PageId},
    workspace::migrate_workspace,
};

/// One completed grid transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Grid before the step.
    pub from: GridSize,
    /// Grid after the step.
    pub to: GridSize,
    /// Items re-placed on their own page.
    pub relocated: usize,
    /// Items moved to another page.
    pub moved: usize,
    /// Pages allocated during the step.
    pub pages_created: usize,
}

/// Result of a stepped workspace migration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SteppedOutcome {
    /// Final items by page.
    pub pages: BTreeMap<PageId, Vec<Item>>,
    /// Transitions in the order they ran.
    pub steps: Vec<StepRecord>,
    /// Every page allocated across all steps.
    pub created: Vec<PageId>,
}

/// The size one step closer to `target`.
fn next_step(current: GridSize, target: GridSize) -> GridSize {
    let (c, r) = (current.columns(), current.rows());
    if c < target.columns() {
        current.with_columns(c + 1)
    } else if r < target.rows() {
        current.with_rows(r + 1)
    } else if c > target.columns() {
        current.with_columns(c - 1)
    } else if r > target.rows() {
        current.with_rows(r - 1)
    } else {
        current
    }
}

/// Intermediate sizes from `source` to `target`, excluding `source` and ending
/// at `target`. Empty when the sizes are equal.
///
/// Every step moves one dimension one cell closer to `target`, so the walk
/// always terminates; [`Error::StalledPath`] guards the loop should that ever
/// stop holding.
pub fn plan(source: GridSize, target: GridSize) -> Result<Vec<GridSize>> {
    let mut path = Vec::new();
    let mut current = source;
    while current != target {
        let next = next_step(current, target);
        if next == current {
            return Err(Error::StalledPath { size: current });
        }
        path.push(next);
        current = next;
    }
    Ok(path)
}

/// Run the workspace migrator once per step of [`plan`]`(source, target)`.
pub fn migrate_in_steps(
    pages: BTreeMap<PageId, Vec<Item>>,
    source: GridSize,
    target: GridSize,
    first_row_blocked: bool,
) -> Result<SteppedOutcome> {
    let mut outcome = SteppedOutcome {
        pages,
        ..SteppedOutcome::default()
    };
    let mut current = source;
    for next in plan(source, target)? {
        outcome = run_step(outcome, current, next, first_row_blocked)?;
        current = next;
    }
    Ok(outcome)
}

/// Migrate directly from `source` to `target` in a single step.
pub fn migrate_direct(
    pages: BTreeMap<PageId, Vec<Item>>,
    source: GridSize,
    target: GridSize,
    first_row_blocked: bool,
) -> Result<SteppedOutcome> {
    let outcome = SteppedOutcome {
        pages,
        ..SteppedOutcome::default()
    };
    if source == target {
        return Ok(outcome);
    }
    run_step(outcome, source, target, first_row_blocked)
}

/// Apply one `from` → `to` transition and record it.
fn run_step(
    mut outcome: SteppedOutcome,
    from: GridSize,
    to: GridSize,
    first_row_blocked: bool,
) -> Result<SteppedOutcome> {
    let step = migrate_workspace(outcome.pages, to, first_row_blocked)?;
    info!(
        from = %from,
        to = %to,
        relocated = step.relocated,
        moved = step.moved,
        pages_created = step.created.len(),
        "grid step"
    );
    outcome.steps.push(StepRecord {
        from,
        to,
        relocated: step.relocated,
        moved: step.moved,
        pages_created: step.created.len(),
    });
    outcome.created.extend(step.created);
    outcome.pages = step.pages;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::test_support::app;

    fn grid(c: u32, r: u32) -> GridSize {
        GridSize::new(c, r).expect("grid")
    }

    fn dims(path: &[GridSize]) -> Vec<(u32, u32)> {
        path.iter().map(|g| (g.columns(), g.rows())).collect()
    }

    #[test]
    fn equal_sizes_need_no_steps() {
        assert!(plan(grid(4, 4), grid(4, 4)).expect("plan").is_empty());
    }

    #[test]
    fn growth_precedes_shrinkage() {
        let path = plan(grid(5, 3), grid(3, 5)).expect("plan");
        assert_eq!(dims(&path), vec![(5, 4), (5, 5), (4, 5), (3, 5)]);
    }

    #[test]
    fn shrinks_columns_then_rows() {
        let path = plan(grid(6, 6), grid(4, 5)).expect("plan");
        assert_eq!(dims(&path), vec![(5, 6), (4, 6), (4, 5)]);
    }

    #[test]
    fn each_step_feeds_the_next() {
        // A 4x4 icon walks back one cell per shrink step.
        let pages = BTreeMap::from([(PageId::new(0), vec![app(1, 0, 0, 0), app(2, 0, 3, 3)])]);
        let out = migrate_in_steps(pages, grid(4, 4), grid(2, 2), false).expect("migrate");
        assert_eq!(out.steps.len(), 4);
        assert_eq!(out.steps[0].from, grid(4, 4));
        assert_eq!(out.steps[3].to, grid(2, 2));
        assert!(out.created.is_empty());
        let ids: Vec<u64> = out.pages[&PageId::new(0)].iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn stepped_run_follows_the_plan() {
        let pages = BTreeMap::from([(PageId::new(0), vec![app(1, 0, 4, 2)])]);
        let out = migrate_in_steps(pages, grid(5, 3), grid(3, 5), false).expect("migrate");
        let path = plan(grid(5, 3), grid(3, 5)).expect("plan");
        let visited: Vec<GridSize> = out.steps.iter().map(|s| s.to).collect();
        assert_eq!(visited, path);
        assert_eq!(out.steps[0].from, grid(5, 3));
        for pair in out.steps.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn equal_sizes_run_no_steps() {
        let pages = BTreeMap::from([(PageId::new(0), vec![app(1, 0, 1, 1)])]);
        let out = migrate_in_steps(pages.clone(), grid(3, 3), grid(3, 3), false).expect("migrate");
        assert!(out.steps.is_empty());
        assert_eq!(out.pages, pages);
    }

    #[test]
    fn direct_migration_is_one_step() {
        let pages = BTreeMap::from([(PageId::new(0), vec![app(1, 0, 3, 3)])]);
        let out = migrate_direct(pages, grid(4, 4), grid(2, 2), false).expect("migrate");
        assert_eq!(out.steps.len(), 1);
        assert_eq!(out.steps[0].relocated, 1);
    }
}
