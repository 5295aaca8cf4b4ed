use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::{
    enums::{billing_cycles::BillingCycle, plan_tiers::PlanTier},
    iam::SessionContext,
    payments::{PaymentOrder, PaymentVerification},
    subscriptions::SubscriptionModel,
};

/// Backend payment endpoints: order creation and post-checkout verification.
/// Verification is the only path that changes the persisted plan tier.
#[async_trait]
#[automock]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        session: &SessionContext,
        plan: PlanTier,
        billing_cycle: BillingCycle,
    ) -> Result<PaymentOrder>;

    async fn verify_payment(
        &self,
        session: &SessionContext,
        verification: &PaymentVerification,
    ) -> Result<SubscriptionModel>;
}
