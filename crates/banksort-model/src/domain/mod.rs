mod item_id;
pub use item_id::ItemId;

mod entry;
pub use entry::Entry;

mod snapshot;
pub use snapshot::Snapshot;

mod sort_order;
pub use sort_order::SortOrder;

mod exchange_mode;
pub use exchange_mode::ExchangeMode;

mod run_id;
pub use run_id::RunId;

/// Position of a slot inside the bank.
///
/// Slots are 0-indexed and the slot count is fixed for the lifetime of one sort.
pub type SlotIndex = usize;
