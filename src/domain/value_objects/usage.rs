use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::{feature_keys::FeatureKey, plan_tiers::PlanTier},
    plan_limits::{Limit, limit_for},
};

/// Sentinel reported for `limit`/`remaining` when the plan grants unlimited use.
pub const UNLIMITED_SENTINEL: i64 = -1;

/// Point-in-time count of live items for one feature. Ephemeral: stale the
/// moment the caller creates or deletes an item, and must be refetched then.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UsageSnapshot {
    pub feature: FeatureKey,
    pub count: u32,
    pub fetched_at: DateTime<Utc>,
}

impl UsageSnapshot {
    pub fn now(feature: FeatureKey, count: u32) -> Self {
        Self {
            feature,
            count,
            fetched_at: Utc::now(),
        }
    }
}

/// Computed permission/remaining-capacity result for one feature check.
/// Derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitDecision {
    pub limit: i64,
    pub current_count: u32,
    pub remaining: i64,
    pub can_create: bool,
    pub is_unlimited: bool,
}

/// Pure limit evaluation. `plan = None` means subscription data has not
/// loaded; it is treated as Free so the check never fails before then.
///
/// While `is_loading` is set the decision is optimistically permissive: the
/// client-side gate is a UX optimization only, and the server's own limit
/// check remains the enforcement backstop for any create that slips through.
pub fn evaluate(
    plan: Option<PlanTier>,
    feature: FeatureKey,
    usage: UsageSnapshot,
    is_loading: bool,
) -> LimitDecision {
    let limit = limit_for(plan.unwrap_or_default(), feature);
    let is_unlimited = limit.is_unlimited();

    let (limit_value, remaining) = match limit {
        Limit::Unlimited => (UNLIMITED_SENTINEL, UNLIMITED_SENTINEL),
        Limit::Limited(n) => (
            i64::from(n),
            (i64::from(n) - i64::from(usage.count)).max(0),
        ),
    };

    let can_create = if is_loading {
        true
    } else {
        match limit {
            Limit::Limited(0) => false,
            Limit::Unlimited => true,
            Limit::Limited(_) => remaining > 0,
        }
    };

    LimitDecision {
        limit: limit_value,
        current_count: usage.count,
        remaining,
        can_create,
        is_unlimited,
    }
}
