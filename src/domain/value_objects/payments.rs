use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::{billing_cycles::BillingCycle, plan_tiers::PlanTier},
    iam::UserIdentity,
};

/// Server-issued token correlating exactly one checkout attempt. Consumed by
/// the widget once and never replayed; a new attempt starts a new order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub order_id: String,
    #[serde(rename = "amount")]
    pub amount_minor: i64,
    pub currency: String,
    pub provider_key: String,
}

/// Result of a successful checkout, submitted for server-side verification.
/// The success callback alone is never treated as proof of upgrade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub plan: PlanTier,
    pub billing_cycle: BillingCycle,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutPrefill {
    pub email: Option<String>,
    pub contact: Option<String>,
    pub name: Option<String>,
}

impl From<&UserIdentity> for CheckoutPrefill {
    fn from(user: &UserIdentity) -> Self {
        Self {
            email: user.email.clone(),
            contact: user.phone.clone(),
            name: user.display_name.clone(),
        }
    }
}

/// Everything the external checkout widget is constructed with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub provider_key: String,
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub merchant_name: String,
    pub merchant_description: String,
    pub prefill: CheckoutPrefill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed {
        payment_id: String,
        signature: String,
    },
    /// The user closed the widget. Not an error; no backend call follows.
    Dismissed,
}
