//! Target mapping builder.
//!
//! Turns one [`Snapshot`] plus a total order over occupied entries into the
//! slot every item should end up in. Pure: no I/O, no randomness.

use std::cmp::Ordering;

use banksort_model::{Entry, ItemId, SlotIndex, Snapshot, SortOrder};

/// Added to the occupied count to rank a vacant slot in the by-id order.
const ID_VACANT_PAD: usize = 1000;
/// Rank of a vacant slot in the by-value order.
///
/// Chosen independently of [`ID_VACANT_PAD`]; the two are not meant to agree.
const VALUE_VACANT_RANK: u64 = 9_009_009;

/// Desired final slot of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: ItemId,
    pub target: SlotIndex,
}

/// Identifier to desired slot assignment, computed once per sort request.
///
/// Placements are kept in ascending target order, which is also the order the
/// scheduler walks them in. Targets are exactly `0..len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetMapping {
    placements: Vec<Placement>,
}

impl TargetMapping {
    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placement handled by scheduler step `step`.
    #[inline]
    pub fn get(&self, step: usize) -> Option<Placement> {
        self.placements.get(step).copied()
    }

    pub fn target_of(&self, id: ItemId) -> Option<SlotIndex> {
        self.placements
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }
}

/// Sort key for one slot. Every occupied rank sorts before every vacant one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Occupied(u64),
    Vacant(u64),
}

/// Build the mapping for one of the two standard orders.
pub fn build(snapshot: &Snapshot, order: SortOrder) -> TargetMapping {
    match order {
        SortOrder::ById => {
            let vacant = (snapshot.occupied() + ID_VACANT_PAD) as u64;
            build_ranked(snapshot, |slot| match slot {
                Some(e) => Rank::Occupied(u64::from(e.id.get())),
                None => Rank::Vacant(vacant),
            })
        }
        SortOrder::ByValue => build_ranked(snapshot, |slot| match slot {
            Some(e) => Rank::Occupied(e.value),
            None => Rank::Vacant(VALUE_VACANT_RANK),
        }),
    }
}

/// Build the mapping for a caller-supplied total order over occupied entries.
///
/// Vacant slots still sort last. Ties keep their snapshot order.
pub fn build_with<F>(snapshot: &Snapshot, mut compare: F) -> TargetMapping
where
    F: FnMut(&Entry, &Entry) -> Ordering,
{
    let mut slots: Vec<Option<&Entry>> = snapshot.iter().collect();
    slots.sort_by(|a, b| match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    from_sorted(slots)
}

fn build_ranked(snapshot: &Snapshot, rank: impl Fn(Option<&Entry>) -> Rank) -> TargetMapping {
    let mut slots: Vec<Option<&Entry>> = snapshot.iter().collect();
    // `sort_by_key` is stable.
    slots.sort_by_key(|slot| rank(*slot));
    from_sorted(slots)
}

fn from_sorted(slots: Vec<Option<&Entry>>) -> TargetMapping {
    let placements = slots
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(target, e)| Placement { id: e.id, target })
        .collect();
    TargetMapping { placements }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn snap(slots: &[Option<(u32, u64)>]) -> Snapshot {
        Snapshot::new(
            slots
                .iter()
                .map(|s| s.map(|(id, value)| Entry::new(id, value)))
                .collect(),
        )
    }

    fn pairs(mapping: &TargetMapping) -> Vec<(u32, usize)> {
        mapping.iter().map(|p| (p.id.get(), p.target)).collect()
    }

    #[test]
    fn by_id_places_ascending_identifiers() {
        let snapshot = snap(&[Some((5, 0)), None, Some((2, 0)), Some((9, 0))]);
        let mapping = build(&snapshot, SortOrder::ById);

        assert_eq!(pairs(&mapping), vec![(2, 0), (5, 1), (9, 2)]);
        assert_eq!(mapping.target_of(ItemId(5)), Some(1));
        assert_eq!(mapping.target_of(ItemId(7)), None);
    }

    #[test]
    fn by_value_places_ascending_values() {
        let snapshot = snap(&[Some((1, 300)), Some((2, 5)), None, Some((3, 42))]);
        let mapping = build(&snapshot, SortOrder::ByValue);

        assert_eq!(pairs(&mapping), vec![(2, 0), (3, 1), (1, 2)]);
    }

    #[test]
    fn keys_and_targets_cover_occupied_slots_exactly() {
        let snapshot = snap(&[
            None,
            Some((40, 3)),
            None,
            Some((11, 8)),
            Some((7, 3)),
            None,
            Some((23, 1)),
        ]);

        for order in [SortOrder::ById, SortOrder::ByValue] {
            let mapping = build(&snapshot, order);
            let ids: BTreeSet<u32> = mapping.iter().map(|p| p.id.get()).collect();
            let targets: Vec<usize> = mapping.iter().map(|p| p.target).collect();

            assert_eq!(ids, BTreeSet::from([7, 11, 23, 40]));
            assert_eq!(targets, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn vacant_slots_rank_last_even_past_the_sentinels() {
        // Keys larger than either vacant rank must still come first.
        let snapshot = snap(&[None, Some((50_000, 10_000_000)), None, Some((3, 1))]);

        let by_id = build(&snapshot, SortOrder::ById);
        assert_eq!(pairs(&by_id), vec![(3, 0), (50_000, 1)]);

        let by_value = build(&snapshot, SortOrder::ByValue);
        assert_eq!(pairs(&by_value), vec![(3, 0), (50_000, 1)]);
    }

    #[test]
    fn equal_values_keep_snapshot_order() {
        let snapshot = snap(&[Some((8, 5)), Some((1, 5)), Some((4, 2)), None, Some((6, 5))]);

        let first = build(&snapshot, SortOrder::ByValue);
        let second = build(&snapshot, SortOrder::ByValue);

        assert_eq!(first, second);
        assert_eq!(pairs(&first), vec![(4, 0), (8, 1), (1, 2), (6, 3)]);
    }

    #[test]
    fn custom_order_descending_value() {
        let snapshot = snap(&[Some((1, 10)), None, Some((2, 30)), Some((3, 20))]);
        let mapping = build_with(&snapshot, |a, b| b.value.cmp(&a.value));

        assert_eq!(pairs(&mapping), vec![(2, 0), (3, 1), (1, 2)]);
    }

    #[test]
    fn empty_bank_yields_empty_mapping() {
        let mapping = build(&snap(&[None, None, None]), SortOrder::ById);
        assert!(mapping.is_empty());
        assert_eq!(mapping.get(0), None);
    }
}
