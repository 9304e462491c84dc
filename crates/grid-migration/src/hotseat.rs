//! Resizing the hotseat.
//!
//! Surviving items keep their left-to-right order and are packed from slot 0.
//! When the new hotseat is too small, the lowest-weight item is evicted one at
//! a time; among equal weights the rightmost goes first.

use tracing::debug;

use crate::{
    item::{Item, ItemId, Placement},
    rank::{RankingPolicy, Weight},
};

/// Result of a hotseat resize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HotseatOutcome {
    /// New hotseat; exactly `new_size` slots, survivors packed from slot 0.
    pub slots: Vec<Option<Item>>,
    /// Evicted item ids in eviction order.
    pub evicted: Vec<ItemId>,
}

/// Fit the items of `slots` into a hotseat of `new_size` slots.
///
/// Never fails: eviction always brings the item count down to `new_size`.
pub fn migrate_hotseat(
    slots: Vec<Option<Item>>,
    new_size: u32,
    ranking: &RankingPolicy,
) -> HotseatOutcome {
    let mut items: Vec<(Item, Weight)> = slots
        .into_iter()
        .flatten()
        .map(|item| {
            let w = ranking.weight(&item);
            (item, w)
        })
        .collect();

    let mut evicted = Vec::new();
    while items.len() > new_size as usize {
        let victim = items
            .iter()
            .enumerate()
            .min_by(|(ia, (_, wa)), (ib, (_, wb))| wa.total_cmp(wb).then(ib.cmp(ia)))
            .map(|(i, _)| i);
        let Some(victim) = victim else { break };
        let (item, weight) = items.remove(victim);
        debug!(id = %item.id, weight = weight.0, "evicting from hotseat");
        evicted.push(item.id);
    }

    let mut out: Vec<Option<Item>> = items
        .into_iter()
        .enumerate()
        .map(|(slot, (mut item, _))| {
            item.placement = Placement::Hotseat { slot: slot as u32 };
            Some(item)
        })
        .collect();
    out.resize(new_size as usize, None);
    HotseatOutcome {
        slots: out,
        evicted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, test_support::docked};

    fn ids(slots: &[Option<Item>]) -> Vec<Option<u64>> {
        slots.iter().map(|s| s.as_ref().map(|i| i.id.get())).collect()
    }

    fn slot_numbers(slots: &[Option<Item>]) -> Vec<u32> {
        slots.iter().flatten().filter_map(Item::slot).collect()
    }

    #[test]
    fn growing_compacts_left() {
        let slots = vec![
            None,
            Some(docked(ItemKind::Application, 1, 1)),
            None,
            Some(docked(ItemKind::Shortcut, 2, 3)),
        ];
        let out = migrate_hotseat(slots, 5, &RankingPolicy::default());
        assert_eq!(ids(&out.slots), vec![Some(1), Some(2), None, None, None]);
        assert_eq!(slot_numbers(&out.slots), vec![0, 1]);
        assert!(out.evicted.is_empty());
    }

    #[test]
    fn shrinking_evicts_lowest_weight() {
        let kinds = [
            ItemKind::Application,
            ItemKind::Shortcut,
            ItemKind::Application,
            ItemKind::Shortcut,
            ItemKind::Application,
        ];
        let slots = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| Some(docked(*k, i as u64 + 1, i as u32)))
            .collect();
        let out = migrate_hotseat(slots, 3, &RankingPolicy::default());
        assert_eq!(ids(&out.slots), vec![Some(1), Some(3), Some(5)]);
        assert_eq!(slot_numbers(&out.slots), vec![0, 1, 2]);
        // Rightmost of the tied shortcuts goes first.
        assert_eq!(out.evicted, vec![ItemId::new(4), ItemId::new(2)]);
    }

    #[test]
    fn uniform_ranking_evicts_from_the_right() {
        let slots = (0..4)
            .map(|i| Some(docked(ItemKind::Application, i + 1, i as u32)))
            .collect();
        let out = migrate_hotseat(slots, 2, &RankingPolicy::Uniform);
        assert_eq!(ids(&out.slots), vec![Some(1), Some(2)]);
        assert_eq!(out.evicted, vec![ItemId::new(4), ItemId::new(3)]);
    }

    #[test]
    fn survivors_keep_relative_order() {
        let slots = vec![
            Some(docked(ItemKind::DeepShortcut, 1, 0)),
            Some(docked(ItemKind::Application, 2, 1)),
            Some(docked(ItemKind::Shortcut, 3, 2)),
        ];
        let out = migrate_hotseat(slots, 2, &RankingPolicy::default());
        assert_eq!(ids(&out.slots), vec![Some(2), Some(3)]);
    }

    #[test]
    fn zero_size_evicts_everything() {
        let slots = vec![Some(docked(ItemKind::Application, 1, 0))];
        let out = migrate_hotseat(slots, 0, &RankingPolicy::default());
        assert!(out.slots.is_empty());
        assert_eq!(out.evicted, vec![ItemId::new(1)]);
    }
}
