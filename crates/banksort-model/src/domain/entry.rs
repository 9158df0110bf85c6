use serde::{Deserialize, Serialize};

use crate::ItemId;

/// One stored unit occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Item definition identifier.
    pub id: ItemId,
    /// Per-unit worth, used only by the by-value ordering.
    pub value: u64,
}

impl Entry {
    pub fn new(id: u32, value: u64) -> Self {
        Self {
            id: ItemId(id),
            value,
        }
    }
}
