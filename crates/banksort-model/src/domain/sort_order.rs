use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The two standard orderings offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Ascending item identifier.
    ById,
    /// Ascending per-unit value.
    ByValue,
}

impl SortOrder {
    /// Short label used in logs and events.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::ById => "id",
            SortOrder::ByValue => "value",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "by-id" => Ok(SortOrder::ById),
            "value" | "by-value" => Ok(SortOrder::ByValue),
            other => Err(format!("unknown sort order: {other} (expected: id|value)")),
        }
    }
}
