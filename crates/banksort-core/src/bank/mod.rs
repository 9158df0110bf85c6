//! Narrow view of the host bank used by the scheduler.

mod memory;
pub use memory::MemoryBank;

use banksort_model::{ExchangeMode, ItemId, SlotIndex, Snapshot};

use crate::error::BankError;

/// Live bank interface.
///
/// The scheduler never caches what these calls return across steps: the host
/// may mutate the bank at any time.
pub trait ContainerAdapter: Send + Sync {
    /// Point-in-time copy of every slot.
    fn snapshot(&self) -> Snapshot;

    /// Current slot of `id`, or `None` if the item is no longer stored.
    fn find_live_index(&self, id: ItemId) -> Option<SlotIndex>;

    /// Move contents between two slots.
    ///
    /// `immediate` marks the call as user initiated; the host decides what that means.
    fn exchange(
        &self,
        from: SlotIndex,
        to: SlotIndex,
        mode: ExchangeMode,
        immediate: bool,
    ) -> Result<(), BankError>;
}
