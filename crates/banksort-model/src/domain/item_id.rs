use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a stored item definition.
///
/// Unique among the occupied slots at any instant, but not stable over time:
/// the host may remove an item and later add it back somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        ItemId(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ItemId(995)).unwrap();
        assert_eq!(json, "995");

        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ItemId(995));
    }

    #[test]
    fn orders_numerically() {
        assert!(ItemId(2) < ItemId(10));
        assert_eq!(ItemId::from(7u32).get(), 7);
    }
}
