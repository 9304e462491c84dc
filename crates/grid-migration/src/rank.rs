//! Survival ranking used when the hotseat shrinks.

use std::cmp::Ordering;

use crate::item::{Item, ItemKind};

/// Application icon weight.
const WT_APPLICATION: f32 = 2.0;
/// Legacy shortcut weight.
const WT_SHORTCUT: f32 = 1.0;
/// App-published shortcut weight.
const WT_DEEP_SHORTCUT: f32 = 0.8;
/// Per-child bonus for folders and app pairs on top of an application's weight.
const WT_FOLDER_FACTOR: f32 = 0.5;
/// Widget weight floor.
const WT_WIDGET_MIN: f32 = 2.0;
/// Widget weight per occupied cell.
const WT_WIDGET_FACTOR: f32 = 0.6;

/// Survival priority of an item; higher survives longer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weight(pub f32);

impl Weight {
    /// Total order over weights (NaN sorts above everything).
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// How items are weighted for eviction.
#[derive(Clone, Copy, Debug, Default)]
pub enum RankingPolicy {
    /// Applications and folders outrank shortcuts, which outrank deep shortcuts.
    #[default]
    KindPriority,
    /// Every item weighs the same; eviction becomes purely positional.
    Uniform,
    /// Caller-supplied weighting.
    Custom(fn(&Item) -> Weight),
}

impl RankingPolicy {
    /// Weight of `item` under this policy.
    #[must_use]
    pub fn weight(&self, item: &Item) -> Weight {
        match self {
            Self::KindPriority => kind_priority(item),
            Self::Uniform => Weight(1.0),
            Self::Custom(f) => f(item),
        }
    }
}

/// Default weighting: by kind, with containers and widgets scaled by size.
fn kind_priority(item: &Item) -> Weight {
    let w = match item.kind {
        ItemKind::Application => WT_APPLICATION,
        ItemKind::Shortcut => WT_SHORTCUT,
        ItemKind::DeepShortcut => WT_DEEP_SHORTCUT,
        ItemKind::Folder | ItemKind::AppPair => {
            WT_APPLICATION + WT_FOLDER_FACTOR * item.children.len() as f32
        }
        ItemKind::Widget => WT_WIDGET_MIN.max(WT_WIDGET_FACTOR * item.area() as f32),
    };
    Weight(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::test_support::docked;

    #[test]
    fn apps_outrank_shortcuts() {
        let p = RankingPolicy::default();
        let app = p.weight(&docked(ItemKind::Application, 1, 0));
        let sc = p.weight(&docked(ItemKind::Shortcut, 2, 1));
        let deep = p.weight(&docked(ItemKind::DeepShortcut, 3, 2));
        assert_eq!(app.total_cmp(&sc), Ordering::Greater);
        assert_eq!(sc.total_cmp(&deep), Ordering::Greater);
    }

    #[test]
    fn folders_gain_weight_per_child() {
        let p = RankingPolicy::KindPriority;
        let mut folder = docked(ItemKind::Folder, 1, 0);
        folder.children = vec![
            docked(ItemKind::Application, 2, 0),
            docked(ItemKind::Application, 3, 0),
        ];
        assert_eq!(p.weight(&folder), Weight(3.0));
    }

    #[test]
    fn custom_policy_is_used() {
        fn by_id(item: &Item) -> Weight {
            Weight(item.id.get() as f32)
        }
        let p = RankingPolicy::Custom(by_id);
        assert_eq!(p.weight(&docked(ItemKind::Shortcut, 7, 0)), Weight(7.0));
        assert_eq!(
            RankingPolicy::Uniform.weight(&docked(ItemKind::Folder, 7, 0)),
            Weight(1.0)
        );
    }
}
