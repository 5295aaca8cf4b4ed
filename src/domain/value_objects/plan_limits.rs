use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::{
    feature_keys::FeatureKey,
    plan_tiers::{ALL_PLAN_TIERS, PlanTier},
};

/// Maximum live-item count allowed for a (plan, feature) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Limit {
    Limited(u32),
    Unlimited,
}

impl Limit {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }
}

/// Extra headroom added to the largest finite limit when sizing a count fetch.
const PAGE_SAFETY_MARGIN: u32 = 20;

/// Static limit table. Configuration fixed at build time, never mutated at
/// runtime; total over every (plan, feature) pair.
pub fn limit_for(plan: PlanTier, feature: FeatureKey) -> Limit {
    use FeatureKey::*;
    use Limit::*;

    match plan {
        PlanTier::Free => match feature {
            Diary => Limited(10),
            Ideas => Limited(20),
            Travel => Limited(2),
            Watch => Limited(20),
            Gifting => Limited(10),
            Subscriptions => Limited(5),
            Vault => Limited(5),
            // Vault documents are a paid feature.
            Documents => Limited(0),
        },
        PlanTier::Pro | PlanTier::Couple => match feature {
            Travel => Limited(25),
            Vault => Limited(100),
            Documents => Limited(50),
            Diary | Ideas | Watch | Gifting | Subscriptions => Unlimited,
        },
        PlanTier::Lifetime => Unlimited,
    }
}

/// Page size for the feature's count fetch: the largest finite limit any tier
/// grants, plus a safety margin. Counting past that is irrelevant to any
/// limit decision, so the fetch stays bounded however large the collection is.
pub fn count_fetch_page_size(feature: FeatureKey) -> u32 {
    let max_finite = ALL_PLAN_TIERS
        .iter()
        .filter_map(|tier| match limit_for(*tier, feature) {
            Limit::Limited(n) => Some(n),
            Limit::Unlimited => None,
        })
        .max()
        .unwrap_or(0);

    max_finite + PAGE_SAFETY_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::feature_keys::ALL_FEATURE_KEYS;

    #[test]
    fn limit_table_is_total_and_deterministic() {
        for tier in ALL_PLAN_TIERS {
            for feature in ALL_FEATURE_KEYS {
                assert_eq!(limit_for(tier, feature), limit_for(tier, feature));
            }
        }
    }

    #[test]
    fn free_ideas_limit_is_twenty() {
        assert_eq!(limit_for(PlanTier::Free, FeatureKey::Ideas), Limit::Limited(20));
    }

    #[test]
    fn lifetime_is_unlimited_everywhere() {
        for feature in ALL_FEATURE_KEYS {
            assert_eq!(limit_for(PlanTier::Lifetime, feature), Limit::Unlimited);
        }
    }

    #[test]
    fn free_documents_are_fully_gated() {
        assert_eq!(
            limit_for(PlanTier::Free, FeatureKey::Documents),
            Limit::Limited(0)
        );
    }

    #[test]
    fn page_size_exceeds_every_finite_limit() {
        for feature in ALL_FEATURE_KEYS {
            let page = count_fetch_page_size(feature);
            for tier in ALL_PLAN_TIERS {
                if let Limit::Limited(n) = limit_for(tier, feature) {
                    assert!(page > n, "page {page} must exceed limit {n} for {feature}");
                }
            }
        }
    }

    #[test]
    fn vault_page_size_uses_largest_tier_limit() {
        // Pro/Couple grant 100, so the fetch must look past the Free limit.
        assert_eq!(count_fetch_page_size(FeatureKey::Vault), 120);
    }
}
