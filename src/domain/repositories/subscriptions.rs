use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::{
    iam::SessionContext, subscriptions::SubscriptionModel,
};

#[async_trait]
#[automock]
pub trait SubscriptionProvider: Send + Sync {
    async fn current_subscription(&self, session: &SessionContext) -> Result<SubscriptionModel>;
}
