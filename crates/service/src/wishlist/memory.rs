use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::domain::ListId;
use super::store::ListStore;
use crate::errors::ServiceError;

/// Process-lifetime wishlist map. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct InMemoryListStore {
    inner: Arc<RwLock<HashMap<ListId, Vec<Value>>>>,
}

impl InMemoryListStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ListStore for InMemoryListStore {
    async fn put(&self, list_id: &ListId, items: Vec<Value>) -> Result<usize, ServiceError> {
        let count = items.len();
        let mut map = self.inner.write().await;
        map.insert(list_id.clone(), items);
        Ok(count)
    }

    async fn fetch(&self, list_id: &ListId) -> Result<Option<Vec<Value>>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(list_id).cloned())
    }

    async fn remove(&self, list_id: &ListId) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(list_id).is_some())
    }

    async fn list_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
