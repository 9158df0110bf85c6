use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use banksort_model::{Entry, ExchangeMode, ItemId, SlotIndex, Snapshot};
use tracing::trace;

use crate::{bank::ContainerAdapter, error::BankError};

/// In-memory bank.
///
/// Clones share the same slots, so a test (or a simulated host) can keep a
/// handle and mutate the bank while a sort is running against it.
#[derive(Clone)]
pub struct MemoryBank {
    inner: Arc<RwLock<MemoryBankInner>>,
}

struct MemoryBankInner {
    slots: Vec<Option<Entry>>,
    /// Successful `exchange` calls so far.
    exchanges: usize,
}

impl MemoryBank {
    /// Create a bank with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self::from_slots(vec![None; capacity])
    }

    pub fn from_slots(slots: Vec<Option<Entry>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryBankInner {
                slots,
                exchanges: 0,
            })),
        }
    }

    pub fn capacity(&self) -> usize {
        self.read().slots.len()
    }

    /// Copy of the current slots.
    pub fn slots(&self) -> Vec<Option<Entry>> {
        self.read().slots.clone()
    }

    /// Identifiers in slot order, `None` for empty slots.
    pub fn ids(&self) -> Vec<Option<u32>> {
        self.read()
            .slots
            .iter()
            .map(|s| s.map(|e| e.id.get()))
            .collect()
    }

    /// Number of exchanges applied so far.
    pub fn exchanges(&self) -> usize {
        self.read().exchanges
    }

    /// Store `entry` at `index`, returning what was there before.
    pub fn put(&self, index: SlotIndex, entry: Entry) -> Result<Option<Entry>, BankError> {
        let mut inner = self.write();
        let capacity = inner.slots.len();
        let slot = inner
            .slots
            .get_mut(index)
            .ok_or(BankError::IndexOutOfRange { index, capacity })?;
        Ok(slot.replace(entry))
    }

    /// Take `id` out of the bank, returning the slot it occupied.
    pub fn remove(&self, id: ItemId) -> Option<SlotIndex> {
        let mut inner = self.write();
        let index = position(&inner.slots, id)?;
        inner.slots[index] = None;
        Some(index)
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryBankInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryBankInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ContainerAdapter for MemoryBank {
    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.slots())
    }

    fn find_live_index(&self, id: ItemId) -> Option<SlotIndex> {
        position(&self.read().slots, id)
    }

    fn exchange(
        &self,
        from: SlotIndex,
        to: SlotIndex,
        mode: ExchangeMode,
        _immediate: bool,
    ) -> Result<(), BankError> {
        let mut inner = self.write();
        let capacity = inner.slots.len();
        for index in [from, to] {
            if index >= capacity {
                return Err(BankError::IndexOutOfRange { index, capacity });
            }
        }

        match mode {
            ExchangeMode::Swap => inner.slots.swap(from, to),
            ExchangeMode::Insert => {
                let entry = inner.slots.remove(from);
                inner.slots.insert(to, entry);
            }
        }
        inner.exchanges += 1;
        trace!(from, to, mode = mode.code(), "memory bank exchange applied");
        Ok(())
    }
}

fn position(slots: &[Option<Entry>], id: ItemId) -> Option<SlotIndex> {
    slots
        .iter()
        .position(|s| matches!(s, Some(e) if e.id == id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> MemoryBank {
        MemoryBank::from_slots(vec![
            Some(Entry::new(5, 1)),
            None,
            Some(Entry::new(2, 1)),
            Some(Entry::new(9, 1)),
        ])
    }

    #[test]
    fn find_live_index_tracks_exchanges() {
        let bank = bank();
        assert_eq!(bank.find_live_index(ItemId(2)), Some(2));

        bank.exchange(2, 0, ExchangeMode::Swap, true).unwrap();
        assert_eq!(bank.find_live_index(ItemId(2)), Some(0));
        assert_eq!(bank.find_live_index(ItemId(5)), Some(2));
        assert_eq!(bank.exchanges(), 1);
    }

    #[test]
    fn new_bank_is_empty() {
        let bank = MemoryBank::new(3);
        assert_eq!(bank.capacity(), 3);
        assert_eq!(bank.ids(), vec![None, None, None]);
        assert_eq!(bank.snapshot().occupied(), 0);
    }

    #[test]
    fn swap_with_empty_slot_moves_entry() {
        let bank = bank();
        bank.exchange(3, 1, ExchangeMode::Swap, true).unwrap();
        assert_eq!(bank.ids(), vec![Some(5), Some(9), Some(2), None]);
    }

    #[test]
    fn insert_mode_shifts_between() {
        let bank = bank();
        bank.exchange(3, 0, ExchangeMode::Insert, true).unwrap();
        assert_eq!(bank.ids(), vec![Some(9), Some(5), None, Some(2)]);
    }

    #[test]
    fn out_of_range_is_rejected_without_change() {
        let bank = bank();
        let err = bank.exchange(0, 4, ExchangeMode::Swap, true).unwrap_err();

        assert_eq!(
            err,
            BankError::IndexOutOfRange {
                index: 4,
                capacity: 4
            }
        );
        assert_eq!(bank.exchanges(), 0);
        assert_eq!(bank.ids(), vec![Some(5), None, Some(2), Some(9)]);
    }

    #[test]
    fn clones_share_slots() {
        let bank = bank();
        let host = bank.clone();

        assert_eq!(host.remove(ItemId(9)), Some(3));
        assert_eq!(bank.find_live_index(ItemId(9)), None);

        host.put(1, Entry::new(77, 3)).unwrap();
        assert_eq!(bank.snapshot().get(1).map(|e| e.id), Some(ItemId(77)));
    }

    #[test]
    fn snapshot_is_a_copy() {
        let bank = bank();
        let snapshot = bank.snapshot();
        bank.exchange(0, 1, ExchangeMode::Swap, true).unwrap();

        assert_eq!(snapshot.position(ItemId(5)), Some(0));
        assert_eq!(snapshot.capacity(), bank.capacity());
    }
}
