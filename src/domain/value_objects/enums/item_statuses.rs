use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle status carried by every countable resource item. An unknown or
/// absent status is treated as Active so it still counts toward the limit;
/// resource types carry their own extra statuses (planned trips, completed
/// gifts) and none of those hide an item from the count.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ItemStatus {
    #[default]
    Active,
    Archived,
    Cancelled,
}

impl From<String> for ItemStatus {
    fn from(value: String) -> Self {
        Self::from_str(&value)
    }
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Archived => "archived",
            ItemStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "archived" => ItemStatus::Archived,
            "cancelled" | "canceled" => ItemStatus::Cancelled,
            _ => ItemStatus::Active,
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
