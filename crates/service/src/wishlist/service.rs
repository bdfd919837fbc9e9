use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::domain::{normalize_items, ItemMode, ListId};
use super::store::ListStore;
use crate::errors::ServiceError;

/// Result of a save or clear: the trimmed id and the entry's length afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListCount {
    pub list_id: ListId,
    pub count: usize,
}

/// Result of a get.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItems {
    pub list_id: ListId,
    pub items: Vec<Value>,
}

/// Wishlist business service independent of web framework
#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn ListStore>,
    mode: ItemMode,
}

impl WishlistService {
    pub fn new(store: Arc<dyn ListStore>, mode: ItemMode) -> Self { Self { store, mode } }

    /// Overwrite the list named `list_id` with `items`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::wishlist::{InMemoryListStore, ItemMode, WishlistService};
    /// let svc = WishlistService::new(Arc::new(InMemoryListStore::new()), ItemMode::UniqueIds);
    /// let saved = tokio_test::block_on(svc.save(" L1 ", vec!["a".into(), "b".into(), "a".into()])).unwrap();
    /// assert_eq!(saved.list_id.as_str(), "L1");
    /// assert_eq!(saved.count, 2);
    /// ```
    #[instrument(skip(self, items), fields(mode = %self.mode))]
    pub async fn save(&self, list_id: &str, items: Vec<Value>) -> Result<ListCount, ServiceError> {
        let list_id = ListId::parse(list_id)?;
        let received = items.len();
        let items = normalize_items(self.mode, items);
        let count = self.store.put(&list_id, items).await?;
        let lists = self.store.list_count().await;
        info!(%list_id, received, count, lists, "wishlist_saved");
        Ok(ListCount { list_id, count })
    }

    /// Items stored for `list_id`; an unknown id yields an empty list.
    #[instrument(skip(self))]
    pub async fn get(&self, list_id: &str) -> Result<ListItems, ServiceError> {
        let list_id = ListId::parse(list_id)?;
        let items = self.store.fetch(&list_id).await?.unwrap_or_default();
        debug!(%list_id, count = items.len(), "wishlist_fetched");
        Ok(ListItems { list_id, items })
    }

    /// Remove the list named `list_id`. Succeeds whether or not it existed.
    #[instrument(skip(self))]
    pub async fn clear(&self, list_id: &str) -> Result<ListCount, ServiceError> {
        let list_id = ListId::parse(list_id)?;
        let existed = self.store.remove(&list_id).await?;
        let lists = self.store.list_count().await;
        info!(%list_id, existed, lists, "wishlist_cleared");
        Ok(ListCount { list_id, count: 0 })
    }
}
