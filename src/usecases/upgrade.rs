use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::api_errors::ApiError;
use crate::config::config_model::Checkout;
use crate::domain::{
    repositories::{checkout::CheckoutWidget, payments::PaymentGateway},
    value_objects::{
        enums::{billing_cycles::BillingCycle, plan_tiers::PlanTier},
        iam::SessionContext,
        payments::{CheckoutOutcome, CheckoutRequest, PaymentVerification},
        subscriptions::SubscriptionModel,
    },
};

/// Where the current (or last) upgrade attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeStage {
    Idle,
    OrderRequested,
    CheckoutOpen,
    Verifying,
    Cancelled,
    Applied,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Verification succeeded; the backend returned the updated subscription.
    Applied(SubscriptionModel),
    /// The user closed the checkout widget. No backend call was made.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("another upgrade attempt is already in progress")]
    AttemptInProgress,
    #[error("could not start payment: {0}")]
    OrderCreation(String),
    #[error("checkout failed: {0}")]
    Checkout(String),
    #[error("payment verification failed: {0}")]
    Verification(String),
}

/// Prefer the backend envelope's message when the failure carries one.
fn backend_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => api_err.message(),
        None => err.to_string(),
    }
}

/// Drives one upgrade attempt: order creation, the external checkout widget,
/// and server-side verification of the widget's success payload.
///
/// A PaymentOrder is single-use. Verification is never retried with the same
/// order; after any failure the caller starts over from Idle with a fresh
/// order. At most one attempt is in flight per session at a time — a second
/// start is rejected before any order is created, since two live orders risk
/// double-charging.
pub struct UpgradeUseCase<G, W>
where
    G: PaymentGateway + Send + Sync + 'static,
    W: CheckoutWidget + Send + Sync + 'static,
{
    gateway: Arc<G>,
    widget: Arc<W>,
    merchant: Checkout,
    in_flight: AsyncMutex<()>,
    stage: Mutex<UpgradeStage>,
}

impl<G, W> UpgradeUseCase<G, W>
where
    G: PaymentGateway + Send + Sync + 'static,
    W: CheckoutWidget + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, widget: Arc<W>, merchant: Checkout) -> Self {
        Self {
            gateway,
            widget,
            merchant,
            in_flight: AsyncMutex::new(()),
            stage: Mutex::new(UpgradeStage::Idle),
        }
    }

    pub fn stage(&self) -> UpgradeStage {
        *self.stage.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_stage(&self, stage: UpgradeStage) {
        debug!(?stage, "upgrade: stage transition");
        *self
            .stage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = stage;
    }

    pub async fn upgrade(
        &self,
        session: &SessionContext,
        plan: PlanTier,
        billing_cycle: BillingCycle,
    ) -> Result<UpgradeOutcome, UpgradeError> {
        let Ok(_attempt) = self.in_flight.try_lock() else {
            warn!(
                %plan,
                %billing_cycle,
                "upgrade: attempt rejected, another is in flight"
            );
            return Err(UpgradeError::AttemptInProgress);
        };

        let attempt_id = Uuid::new_v4();
        info!(
            %attempt_id,
            %plan,
            %billing_cycle,
            "upgrade: requesting payment order"
        );
        self.set_stage(UpgradeStage::OrderRequested);

        let order = match self.gateway.create_order(session, plan, billing_cycle).await {
            Ok(order) => order,
            Err(err) => {
                error!(%attempt_id, %plan, error = ?err, "upgrade: order creation failed");
                self.set_stage(UpgradeStage::Idle);
                return Err(UpgradeError::OrderCreation(backend_message(&err)));
            }
        };

        let request = CheckoutRequest {
            provider_key: order.provider_key.clone(),
            order_id: order.order_id.clone(),
            amount_minor: order.amount_minor,
            currency: order.currency.clone(),
            merchant_name: self.merchant.merchant_name.clone(),
            merchant_description: self.merchant.merchant_description.clone(),
            prefill: (&session.user).into(),
        };

        info!(%attempt_id, order_id = %order.order_id, "upgrade: opening checkout");
        self.set_stage(UpgradeStage::CheckoutOpen);

        let outcome = match self.widget.open(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%attempt_id, order_id = %order.order_id, error = ?err, "upgrade: checkout failed");
                self.set_stage(UpgradeStage::Failed);
                return Err(UpgradeError::Checkout(err.to_string()));
            }
        };

        let (payment_id, signature) = match outcome {
            CheckoutOutcome::Dismissed => {
                info!(%attempt_id, order_id = %order.order_id, "upgrade: checkout dismissed by user");
                self.set_stage(UpgradeStage::Cancelled);
                return Ok(UpgradeOutcome::Cancelled);
            }
            CheckoutOutcome::Completed {
                payment_id,
                signature,
            } => (payment_id, signature),
        };

        info!(
            %attempt_id,
            order_id = %order.order_id,
            payment_id = %payment_id,
            "upgrade: verifying payment"
        );
        self.set_stage(UpgradeStage::Verifying);

        let verification = PaymentVerification {
            order_id: order.order_id.clone(),
            payment_id,
            signature,
            plan,
            billing_cycle,
        };

        match self.gateway.verify_payment(session, &verification).await {
            Ok(subscription) => {
                info!(
                    %attempt_id,
                    order_id = %order.order_id,
                    new_plan = %subscription.plan,
                    "upgrade: verification confirmed, plan applied"
                );
                self.set_stage(UpgradeStage::Applied);
                Ok(UpgradeOutcome::Applied(subscription))
            }
            Err(err) => {
                // The order is spent either way; a retry needs a fresh one.
                error!(
                    %attempt_id,
                    order_id = %order.order_id,
                    error = ?err,
                    "upgrade: verification rejected"
                );
                self.set_stage(UpgradeStage::Failed);
                Err(UpgradeError::Verification(backend_message(&err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        checkout::MockCheckoutWidget, payments::MockPaymentGateway,
    };
    use crate::domain::value_objects::{iam::UserIdentity, payments::PaymentOrder};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use mockall::predicate::{always, eq};
    use serde_json::json;
    use tokio::sync::Notify;

    fn merchant() -> Checkout {
        Checkout {
            merchant_name: "Lifeboard".to_string(),
            merchant_description: "Lifeboard plan upgrade".to_string(),
        }
    }

    fn order() -> PaymentOrder {
        PaymentOrder {
            order_id: "order_123".to_string(),
            amount_minor: 49_900,
            currency: "INR".to_string(),
            provider_key: "key_live".to_string(),
        }
    }

    fn upgraded_subscription() -> SubscriptionModel {
        SubscriptionModel {
            plan: PlanTier::Pro,
            billing_cycle: Some(BillingCycle::Yearly),
            status: Some("active".to_string()),
            current_period_end: None,
        }
    }

    #[tokio::test]
    async fn successful_flow_applies_the_new_plan() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .with(always(), eq(PlanTier::Pro), eq(BillingCycle::Yearly))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(order()) }));
        gateway
            .expect_verify_payment()
            .withf(|_, verification| {
                verification.order_id == "order_123"
                    && verification.payment_id == "pay_9"
                    && verification.signature == "sig_9"
                    && verification.plan == PlanTier::Pro
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(upgraded_subscription()) }));

        let mut widget = MockCheckoutWidget::new();
        widget
            .expect_open()
            .withf(|request| {
                request.order_id == "order_123"
                    && request.merchant_name == "Lifeboard"
                    && request.prefill.email.as_deref() == Some("ada@example.com")
                    && request.prefill.name.as_deref() == Some("Ada")
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(CheckoutOutcome::Completed {
                        payment_id: "pay_9".to_string(),
                        signature: "sig_9".to_string(),
                    })
                })
            });

        let usecase = UpgradeUseCase::new(Arc::new(gateway), Arc::new(widget), merchant());
        let session = SessionContext::new("token").with_user(UserIdentity {
            email: Some("ada@example.com".to_string()),
            phone: None,
            display_name: Some("Ada".to_string()),
        });

        let outcome = usecase
            .upgrade(&session, PlanTier::Pro, BillingCycle::Yearly)
            .await
            .unwrap();

        assert_eq!(outcome, UpgradeOutcome::Applied(upgraded_subscription()));
        assert_eq!(usecase.stage(), UpgradeStage::Applied);
    }

    #[tokio::test]
    async fn dismissal_makes_no_verification_call() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(order()) }));
        // No expect_verify_payment: any call would fail the test.

        let mut widget = MockCheckoutWidget::new();
        widget
            .expect_open()
            .times(1)
            .returning(|_| Box::pin(async { Ok(CheckoutOutcome::Dismissed) }));

        let usecase = UpgradeUseCase::new(Arc::new(gateway), Arc::new(widget), merchant());
        let session = SessionContext::new("token");

        let outcome = usecase
            .upgrade(&session, PlanTier::Pro, BillingCycle::Monthly)
            .await
            .unwrap();

        assert_eq!(outcome, UpgradeOutcome::Cancelled);
        assert_eq!(usecase.stage(), UpgradeStage::Cancelled);
    }

    #[tokio::test]
    async fn order_creation_failure_returns_to_idle() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .times(1)
            .returning(|_, _, _| Box::pin(async { Err(anyhow!("gateway unreachable")) }));

        let widget = MockCheckoutWidget::new();

        let usecase = UpgradeUseCase::new(Arc::new(gateway), Arc::new(widget), merchant());
        let session = SessionContext::new("token");

        let err = usecase
            .upgrade(&session, PlanTier::Couple, BillingCycle::Monthly)
            .await
            .unwrap_err();

        assert!(matches!(err, UpgradeError::OrderCreation(_)));
        assert_eq!(usecase.stage(), UpgradeStage::Idle);
    }

    #[tokio::test]
    async fn verification_rejection_surfaces_the_backend_reason() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(order()) }));
        gateway
            .expect_verify_payment()
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Err(anyhow::Error::new(ApiError {
                        status: 400,
                        body: json!({ "message": "Invalid payment signature" }),
                    }))
                })
            });

        let mut widget = MockCheckoutWidget::new();
        widget.expect_open().times(1).returning(|_| {
            Box::pin(async {
                Ok(CheckoutOutcome::Completed {
                    payment_id: "pay_1".to_string(),
                    signature: "bad_sig".to_string(),
                })
            })
        });

        let usecase = UpgradeUseCase::new(Arc::new(gateway), Arc::new(widget), merchant());
        let session = SessionContext::new("token");

        let err = usecase
            .upgrade(&session, PlanTier::Pro, BillingCycle::Yearly)
            .await
            .unwrap_err();

        match err {
            UpgradeError::Verification(message) => {
                assert_eq!(message, "Invalid payment signature");
            }
            other => panic!("expected verification error, got {other:?}"),
        }
        assert_eq!(usecase.stage(), UpgradeStage::Failed);
    }

    /// Widget that parks until released, keeping the first attempt in
    /// CheckoutOpen while a second attempt is started.
    struct ParkedWidget {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl CheckoutWidget for ParkedWidget {
        async fn open(&self, _request: CheckoutRequest) -> anyhow::Result<CheckoutOutcome> {
            self.release.notified().await;
            Ok(CheckoutOutcome::Dismissed)
        }
    }

    #[tokio::test]
    async fn second_attempt_is_rejected_without_a_second_order() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(order()) }));

        let release = Arc::new(Notify::new());
        let widget = Arc::new(ParkedWidget {
            release: release.clone(),
        });

        let usecase = Arc::new(UpgradeUseCase::new(Arc::new(gateway), widget, merchant()));
        let session = SessionContext::new("token");

        let first = tokio::spawn({
            let usecase = usecase.clone();
            let session = session.clone();
            async move {
                usecase
                    .upgrade(&session, PlanTier::Pro, BillingCycle::Yearly)
                    .await
            }
        });

        // Let the first attempt reach the parked checkout.
        while usecase.stage() != UpgradeStage::CheckoutOpen {
            tokio::task::yield_now().await;
        }

        let second = usecase
            .upgrade(&session, PlanTier::Pro, BillingCycle::Yearly)
            .await;
        assert!(matches!(second, Err(UpgradeError::AttemptInProgress)));

        release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first, UpgradeOutcome::Cancelled);
    }
}
