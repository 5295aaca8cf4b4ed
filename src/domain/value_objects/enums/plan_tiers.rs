use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Subscription level attached to a user account. Mutated only by a verified
/// payment or an explicit cancellation, never inferred from usage.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Couple,
    Lifetime,
}

pub const ALL_PLAN_TIERS: [PlanTier; 4] = [
    PlanTier::Free,
    PlanTier::Pro,
    PlanTier::Couple,
    PlanTier::Lifetime,
];

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
            PlanTier::Couple => "couple",
            PlanTier::Lifetime => "lifetime",
        }
    }

    /// Unknown or missing tier names fall back to Free so evaluation never
    /// treats an unrecognised plan as paid.
    pub fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "free" => PlanTier::Free,
            "pro" => PlanTier::Pro,
            "couple" => PlanTier::Couple,
            "lifetime" => PlanTier::Lifetime,
            _ => PlanTier::Free,
        }
    }
}

impl From<String> for PlanTier {
    fn from(value: String) -> Self {
        Self::from_str(&value)
    }
}

impl Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
