use serde::{Deserialize, Serialize};

use crate::{Entry, ItemId, SlotIndex};

/// Point-in-time copy of every slot in the bank.
///
/// The length always equals the bank capacity at the moment of capture.
/// A snapshot is never updated; take a new one instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    slots: Vec<Option<Entry>>,
}

impl Snapshot {
    pub fn new(slots: Vec<Option<Entry>>) -> Self {
        Self { slots }
    }

    /// Number of slots, occupied or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn get(&self, index: SlotIndex) -> Option<&Entry> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Slot index of `id` at capture time.
    pub fn position(&self, id: ItemId) -> Option<SlotIndex> {
        self.slots
            .iter()
            .position(|s| matches!(s, Some(e) if e.id == id))
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Entry>> {
        self.slots.iter().map(Option::as_ref)
    }
}

impl From<Vec<Option<Entry>>> for Snapshot {
    fn from(slots: Vec<Option<Entry>>) -> Self {
        Self::new(slots)
    }
}
