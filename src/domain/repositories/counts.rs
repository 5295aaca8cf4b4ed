use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::{feature_keys::FeatureKey, item_statuses::ItemStatus},
    iam::SessionContext,
};

/// The slice of a resource item the aggregator cares about. Everything else
/// in the backend's list payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    #[serde(default)]
    pub status: ItemStatus,
}

/// Fetches one bounded page of a feature's backing collection. One provider
/// is registered per FeatureKey; the page size caps the fetch at what a limit
/// decision can ever need.
#[async_trait]
#[automock]
pub trait CountProvider: Send + Sync {
    async fn fetch_live_candidates(
        &self,
        session: &SessionContext,
        feature: FeatureKey,
        page_size: u32,
    ) -> Result<Vec<ItemRecord>>;
}

/// FeatureKey → provider table, built once at startup. Adding a feature is a
/// registration, not a new branch in the aggregator.
#[derive(Default, Clone)]
pub struct CountProviderRegistry {
    providers: HashMap<FeatureKey, Arc<dyn CountProvider>>,
}

impl CountProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, feature: FeatureKey, provider: Arc<dyn CountProvider>) -> Self {
        self.providers.insert(feature, provider);
        self
    }

    pub fn provider_for(&self, feature: FeatureKey) -> Option<&Arc<dyn CountProvider>> {
        self.providers.get(&feature)
    }
}
