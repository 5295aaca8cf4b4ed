use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    repositories::counts::{CountProvider, CountProviderRegistry, ItemRecord},
    value_objects::{
        enums::feature_keys::{ALL_FEATURE_KEYS, FeatureKey},
        iam::SessionContext,
    },
};
use crate::infrastructure::http::api_client::ApiClient;

/// Resource lists arrive either wrapped (`{ data: [...] }`) or as a bare
/// array, depending on the endpoint's vintage.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Wrapped { data: Vec<ItemRecord> },
    Bare(Vec<ItemRecord>),
}

impl ListEnvelope {
    fn into_items(self) -> Vec<ItemRecord> {
        match self {
            ListEnvelope::Wrapped { data } => data,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// Fetches one page of a feature's backing collection over the REST API.
pub struct HttpCountProvider {
    client: Arc<ApiClient>,
}

impl HttpCountProvider {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CountProvider for HttpCountProvider {
    async fn fetch_live_candidates(
        &self,
        session: &SessionContext,
        feature: FeatureKey,
        page_size: u32,
    ) -> Result<Vec<ItemRecord>> {
        let envelope: ListEnvelope = self
            .client
            .get_json(
                session,
                feature.resource_path(),
                &[("limit", page_size.to_string())],
            )
            .await?;

        Ok(envelope.into_items())
    }
}

/// Registers one shared HTTP provider for every gated feature.
pub fn default_registry(client: Arc<ApiClient>) -> CountProviderRegistry {
    let provider: Arc<dyn CountProvider> = Arc::new(HttpCountProvider::new(client));
    let mut registry = CountProviderRegistry::new();
    for feature in ALL_FEATURE_KEYS {
        registry = registry.register(feature, provider.clone());
    }
    registry
}
