use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifier for a gated resource class subject to per-plan usage limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKey {
    Diary,
    Ideas,
    Travel,
    Watch,
    Gifting,
    Subscriptions,
    Vault,
    Documents,
}

pub const ALL_FEATURE_KEYS: [FeatureKey; 8] = [
    FeatureKey::Diary,
    FeatureKey::Ideas,
    FeatureKey::Travel,
    FeatureKey::Watch,
    FeatureKey::Gifting,
    FeatureKey::Subscriptions,
    FeatureKey::Vault,
    FeatureKey::Documents,
];

impl FeatureKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Diary => "diary",
            FeatureKey::Ideas => "ideas",
            FeatureKey::Travel => "travel",
            FeatureKey::Watch => "watch",
            FeatureKey::Gifting => "gifting",
            FeatureKey::Subscriptions => "subscriptions",
            FeatureKey::Vault => "vault",
            FeatureKey::Documents => "documents",
        }
    }

    /// Path of the backing REST collection, relative to the API base URL.
    pub fn resource_path(&self) -> &'static str {
        match self {
            FeatureKey::Diary => "diary/entries",
            FeatureKey::Ideas => "ideas",
            FeatureKey::Travel => "trips",
            FeatureKey::Watch => "watch-items",
            FeatureKey::Gifting => "gifts",
            FeatureKey::Subscriptions => "subscriptions",
            FeatureKey::Vault => "vault/items",
            FeatureKey::Documents => "vault/documents",
        }
    }
}

impl Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
