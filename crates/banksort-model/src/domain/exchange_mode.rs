use serde::{Deserialize, Serialize};

/// How the host applies a slot exchange.
///
/// The numeric values match the mode argument the host's reorganize call expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ExchangeMode {
    /// Swap the contents of the two slots.
    Swap = 0,
    /// Take the source entry out and insert it at the target, shifting the rest.
    Insert = 1,
}

impl ExchangeMode {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}
