use banksort_model::SlotIndex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("slot {index} is out of range (capacity {capacity})")]
    IndexOutOfRange { index: SlotIndex, capacity: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("bank sorting is disabled")]
    Disabled,
    #[error("bank is closed")]
    BankClosed,
}
