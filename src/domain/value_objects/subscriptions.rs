use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::enums::{
    billing_cycles::BillingCycle, plan_tiers::PlanTier,
};

/// Subscription state as reported by `GET subscription`. The backend is the
/// sole authority for the plan tier; the client only caches what it returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionModel {
    pub plan: PlanTier,
    #[serde(default, deserialize_with = "lenient_billing_cycle")]
    pub billing_cycle: Option<BillingCycle>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
}

/// An unrecognised billing cycle reads as None instead of failing the whole
/// subscription parse; the plan tier is what the gate decisions run on.
fn lenient_billing_cycle<'de, D>(deserializer: D) -> Result<Option<BillingCycle>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(BillingCycle::from_str))
}

impl SubscriptionModel {
    pub fn free() -> Self {
        Self {
            plan: PlanTier::Free,
            billing_cycle: None,
            status: None,
            current_period_end: None,
        }
    }
}
