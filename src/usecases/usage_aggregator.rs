use tracing::{debug, warn};

use crate::domain::{
    repositories::counts::CountProviderRegistry,
    value_objects::{
        enums::{feature_keys::FeatureKey, item_statuses::ItemStatus},
        iam::SessionContext,
        plan_limits::count_fetch_page_size,
        usage::UsageSnapshot,
    },
};

/// Counts a user's live items for one gated feature.
///
/// Failures never propagate: a count that cannot be fetched degrades to 0 and
/// is logged. Combined with the evaluator's optimistic loading default, that
/// keeps a transient counting failure from locking a user out; the server's
/// own limit check is the backstop for the opposite direction.
pub struct UsageAggregator {
    registry: CountProviderRegistry,
}

/// Whether an item in this status still counts toward the feature's usage.
fn is_live(feature: FeatureKey, status: ItemStatus) -> bool {
    match feature {
        FeatureKey::Subscriptions => {
            status != ItemStatus::Cancelled && status != ItemStatus::Archived
        }
        _ => status != ItemStatus::Archived,
    }
}

impl UsageAggregator {
    pub fn new(registry: CountProviderRegistry) -> Self {
        Self { registry }
    }

    pub async fn current_usage(
        &self,
        session: &SessionContext,
        feature: FeatureKey,
    ) -> UsageSnapshot {
        let Some(provider) = self.registry.provider_for(feature) else {
            warn!(%feature, "usage: no count provider registered, counting 0");
            return UsageSnapshot::now(feature, 0);
        };

        let page_size = count_fetch_page_size(feature);

        let items = match provider
            .fetch_live_candidates(session, feature, page_size)
            .await
        {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    %feature,
                    error = ?err,
                    "usage: count fetch failed, counting 0"
                );
                return UsageSnapshot::now(feature, 0);
            }
        };

        let count = items
            .iter()
            .filter(|item| is_live(feature, item.status))
            .count() as u32;

        debug!(
            %feature,
            fetched = items.len(),
            live = count,
            page_size,
            "usage: counted live items"
        );

        UsageSnapshot::now(feature, count)
    }
}
