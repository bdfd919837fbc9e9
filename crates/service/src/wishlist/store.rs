use async_trait::async_trait;
use serde_json::Value;

use super::domain::ListId;
use crate::errors::ServiceError;

/// Storage abstraction for wishlists.
/// Every call is atomic on its own; there are no multi-call transactions.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Replace (or create) the entry for `list_id`; returns the stored length.
    async fn put(&self, list_id: &ListId, items: Vec<Value>) -> Result<usize, ServiceError>;
    async fn fetch(&self, list_id: &ListId) -> Result<Option<Vec<Value>>, ServiceError>;
    /// Drop the entry for `list_id`; returns whether one existed.
    async fn remove(&self, list_id: &ListId) -> Result<bool, ServiceError>;
    /// Number of lists currently held.
    async fn list_count(&self) -> usize;
}

/// Test doubles shared with the `server` crate's tests.
pub mod mock {
    use super::*;

    /// Store whose every operation fails, for exercising 500 paths.
    #[derive(Default)]
    pub struct FailingListStore;

    #[async_trait]
    impl ListStore for FailingListStore {
        async fn put(&self, _list_id: &ListId, _items: Vec<Value>) -> Result<usize, ServiceError> {
            Err(ServiceError::Storage("put unavailable".into()))
        }

        async fn fetch(&self, _list_id: &ListId) -> Result<Option<Vec<Value>>, ServiceError> {
            Err(ServiceError::Storage("fetch unavailable".into()))
        }

        async fn remove(&self, _list_id: &ListId) -> Result<bool, ServiceError> {
            Err(ServiceError::Storage("remove unavailable".into()))
        }

        async fn list_count(&self) -> usize { 0 }
    }
}
