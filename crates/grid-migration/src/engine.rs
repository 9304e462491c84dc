//! The migration call contract: one grid-size change, applied to a layout.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    geom::GridSize,
    hotseat::migrate_hotseat,
    item::{ItemId, PageId, Placement},
    layout::Layout,
    multistep::{StepRecord, migrate_direct, migrate_in_steps},
    rank::RankingPolicy,
    reader::{DropReason, ItemReader, Record, TargetResolver},
};

/// Switches controlling a migration run.
#[derive(Clone, Copy, Debug)]
pub struct MigrationOptions {
    /// Reserve row 0 of the first page.
    pub first_row_blocked: bool,
    /// Change one dimension by one cell per step instead of jumping directly.
    pub multi_step: bool,
    /// Weighting used for hotseat eviction.
    pub ranking: RankingPolicy,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            first_row_blocked: false,
            multi_step: true,
            ranking: RankingPolicy::default(),
        }
    }
}

/// Source and target dimensions for one migration.
#[derive(Clone, Copy, Debug)]
pub struct MigrationRequest {
    /// Grid the layout was built for.
    pub source_grid: GridSize,
    /// Grid to migrate onto.
    pub target_grid: GridSize,
    /// Hotseat size the layout was built for.
    pub hotseat_source_size: u32,
    /// Hotseat size to migrate onto.
    pub hotseat_target_size: u32,
    /// Run switches.
    pub options: MigrationOptions,
}

/// What happened during a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MigrationSummary {
    /// Workspace items whose page and position are unchanged.
    pub unchanged: usize,
    /// Workspace items moved within their own page.
    pub relocated: usize,
    /// Workspace items moved to another page.
    pub moved: usize,
    /// Pages allocated for overflow.
    pub pages_created: Vec<PageId>,
    /// Hotseat items evicted, in eviction order.
    pub evicted: Vec<ItemId>,
    /// Records dropped at read time.
    pub dropped: Vec<(ItemId, DropReason)>,
    /// Grid transitions performed.
    pub steps: Vec<StepRecord>,
}

/// Migrated layout plus its summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MigrationOutcome {
    /// Items with their final placement.
    pub layout: Layout,
    /// Run statistics.
    pub summary: MigrationSummary,
}

/// Migrate `layout` according to `request`.
///
/// The input must satisfy every layout invariant for the source grid and
/// hotseat, and no item may be larger than the target grid; anything else is
/// rejected before a single item moves.
pub fn migrate(request: &MigrationRequest, layout: Layout) -> Result<MigrationOutcome> {
    let MigrationRequest {
        source_grid,
        target_grid,
        hotseat_source_size,
        hotseat_target_size,
        options,
    } = *request;

    layout.verify(source_grid, hotseat_source_size)?;
    for item in layout.pages.values().flatten() {
        let Some(rect) = item.rect() else { continue };
        if !target_grid.admits(rect.w, rect.h) {
            return Err(Error::FootprintExceedsGrid {
                id: item.id,
                span_x: rect.w,
                span_y: rect.h,
                grid: target_grid,
            });
        }
    }
    debug!(
        from = %source_grid,
        to = %target_grid,
        hotseat_from = hotseat_source_size,
        hotseat_to = hotseat_target_size,
        items = layout.len(),
        "starting migration"
    );

    let before: HashMap<ItemId, Placement> = layout
        .pages
        .values()
        .flatten()
        .map(|i| (i.id, i.placement))
        .collect();

    let Layout { pages, hotseat } = layout;
    let hotseat = migrate_hotseat(hotseat, hotseat_target_size, &options.ranking);
    let stepped = if options.multi_step {
        migrate_in_steps(pages, source_grid, target_grid, options.first_row_blocked)?
    } else {
        migrate_direct(pages, source_grid, target_grid, options.first_row_blocked)?
    };

    let mut summary = MigrationSummary {
        pages_created: stepped.created,
        evicted: hotseat.evicted,
        steps: stepped.steps,
        ..MigrationSummary::default()
    };
    for item in stepped.pages.values().flatten() {
        match before.get(&item.id) {
            Some(p) if *p == item.placement => summary.unchanged += 1,
            Some(p) if workspace_page(p) == item.page() => summary.relocated += 1,
            _ => summary.moved += 1,
        }
    }

    let layout = Layout {
        pages: stepped.pages,
        hotseat: hotseat.slots,
    };
    layout.verify(target_grid, hotseat_target_size)?;
    info!(
        unchanged = summary.unchanged,
        relocated = summary.relocated,
        moved = summary.moved,
        pages_created = summary.pages_created.len(),
        evicted = summary.evicted.len(),
        steps = summary.steps.len(),
        "migration complete"
    );
    Ok(MigrationOutcome { layout, summary })
}

/// Page of a workspace placement.
fn workspace_page(p: &Placement) -> Option<PageId> {
    match p {
        Placement::Workspace { page, .. } => Some(*page),
        _ => None,
    }
}

/// Read `records` and migrate the result in one call.
///
/// Records dropped by the reader are listed in the summary.
pub fn migrate_records<R>(
    request: &MigrationRequest,
    records: &[Record],
    pages: &[PageId],
    resolver: &R,
) -> Result<MigrationOutcome>
where
    R: TargetResolver + ?Sized,
{
    let read = ItemReader::new(resolver, request.hotseat_source_size).read(records, pages)?;
    let mut outcome = migrate(request, read.layout)?;
    outcome.summary.dropped = read.dropped;
    Ok(outcome)
}
