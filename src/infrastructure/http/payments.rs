use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    repositories::payments::PaymentGateway,
    value_objects::{
        enums::{billing_cycles::BillingCycle, plan_tiers::PlanTier},
        iam::SessionContext,
        payments::{PaymentOrder, PaymentVerification},
        subscriptions::SubscriptionModel,
    },
};
use crate::infrastructure::http::api_client::ApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody {
    plan: PlanTier,
    billing_cycle: BillingCycle,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderEnvelope {
    Wrapped { order: PaymentOrder },
    Bare(PaymentOrder),
}

/// `POST payment/verify` response; the updated subscription is the only part
/// the client acts on.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    subscription: SubscriptionModel,
}

pub struct HttpPaymentGateway {
    client: Arc<ApiClient>,
}

impl HttpPaymentGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(
        &self,
        session: &SessionContext,
        plan: PlanTier,
        billing_cycle: BillingCycle,
    ) -> Result<PaymentOrder> {
        let body = CreateOrderBody {
            plan,
            billing_cycle,
        };
        let envelope: OrderEnvelope = self
            .client
            .post_json(session, "payment/order", &body)
            .await?;

        Ok(match envelope {
            OrderEnvelope::Wrapped { order } => order,
            OrderEnvelope::Bare(order) => order,
        })
    }

    async fn verify_payment(
        &self,
        session: &SessionContext,
        verification: &PaymentVerification,
    ) -> Result<SubscriptionModel> {
        let response: VerifyResponse = self
            .client
            .post_json(session, "payment/verify", verification)
            .await?;

        Ok(response.subscription)
    }
}
