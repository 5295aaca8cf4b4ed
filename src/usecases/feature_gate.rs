use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    repositories::subscriptions::SubscriptionProvider,
    value_objects::{
        enums::{feature_keys::FeatureKey, plan_tiers::PlanTier},
        iam::SessionContext,
        usage::{LimitDecision, evaluate},
    },
};
use crate::usecases::usage_aggregator::UsageAggregator;

/// Answers "may this user create another item of this feature right now".
///
/// Combines the user's effective plan with a fresh usage snapshot and the
/// static limit table. Purely advisory: the server re-checks every create.
pub struct FeatureGate<S>
where
    S: SubscriptionProvider + Send + Sync + 'static,
{
    subscription_provider: Arc<S>,
    aggregator: Arc<UsageAggregator>,
}

impl<S> FeatureGate<S>
where
    S: SubscriptionProvider + Send + Sync + 'static,
{
    pub fn new(subscription_provider: Arc<S>, aggregator: Arc<UsageAggregator>) -> Self {
        Self {
            subscription_provider,
            aggregator,
        }
    }

    /// Current plan tier, or None while it cannot be determined. A fetch
    /// failure is absorbed the same way a counting failure is: the evaluator
    /// then falls back to Free, the most conservative tier.
    pub async fn effective_plan(&self, session: &SessionContext) -> Option<PlanTier> {
        match self.subscription_provider.current_subscription(session).await {
            Ok(subscription) => {
                debug!(plan = %subscription.plan, "feature_gate: resolved plan");
                Some(subscription.plan)
            }
            Err(err) => {
                warn!(
                    error = ?err,
                    "feature_gate: subscription fetch failed, assuming free plan"
                );
                None
            }
        }
    }

    /// Full gate check: fetches plan and usage, then evaluates. The snapshot
    /// is taken here and now; callers must re-check after any create/delete.
    pub async fn check(&self, session: &SessionContext, feature: FeatureKey) -> LimitDecision {
        let plan = self.effective_plan(session).await;
        let usage = self.aggregator.current_usage(session, feature).await;
        let decision = evaluate(plan, feature, usage, false);

        debug!(
            %feature,
            limit = decision.limit,
            current = decision.current_count,
            remaining = decision.remaining,
            can_create = decision.can_create,
            "feature_gate: evaluated limit"
        );

        decision
    }
}
