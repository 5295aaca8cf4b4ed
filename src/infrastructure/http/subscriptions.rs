use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    repositories::subscriptions::SubscriptionProvider,
    value_objects::{iam::SessionContext, subscriptions::SubscriptionModel},
};
use crate::infrastructure::http::api_client::ApiClient;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubscriptionEnvelope {
    Wrapped { subscription: SubscriptionModel },
    Bare(SubscriptionModel),
}

pub struct HttpSubscriptionProvider {
    client: Arc<ApiClient>,
}

impl HttpSubscriptionProvider {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionProvider for HttpSubscriptionProvider {
    async fn current_subscription(&self, session: &SessionContext) -> Result<SubscriptionModel> {
        let envelope: SubscriptionEnvelope =
            self.client.get_json(session, "subscription", &[]).await?;

        Ok(match envelope {
            SubscriptionEnvelope::Wrapped { subscription } => subscription,
            SubscriptionEnvelope::Bare(subscription) => subscription,
        })
    }
}
