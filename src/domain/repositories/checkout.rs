use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::payments::{CheckoutOutcome, CheckoutRequest};

/// The externally hosted checkout widget. Opened exactly once per order; it
/// resolves with the widget's success callback payload or with Dismissed when
/// the user closes it.
#[async_trait]
#[automock]
pub trait CheckoutWidget: Send + Sync {
    async fn open(&self, request: CheckoutRequest) -> Result<CheckoutOutcome>;
}
