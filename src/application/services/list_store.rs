use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::Category;
use crate::domain::traits::ListBackend;

/// Default bound on a single backend call
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a backend call, failing with a retryable error once `limit` expires
pub(crate) async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| StorageError::Timeout(limit))?
}

/// Per-category restaurant lists on top of a [`ListBackend`]
pub struct ListStore {
    backend: Arc<dyn ListBackend>,
    locks: [Mutex<()>; Category::COUNT],
    timeout: Duration,
}

impl ListStore {
    pub fn new(backend: Arc<dyn ListBackend>) -> Self {
        Self {
            backend,
            locks: std::array::from_fn(|_| Mutex::new(())),
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create empty backing lists for categories that have none
    pub async fn init(&self) -> Result<(), StorageError> {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.storage_key()).collect();
        bounded(self.timeout, self.backend.ensure(&keys)).await
    }

    /// Exclusive access to one category for a read-modify-write
    pub async fn lock(&self, category: Category) -> MutexGuard<'_, ()> {
        self.locks[category as usize].lock().await
    }

    /// Load every category. Categories without backing storage come back empty.
    pub async fn load(&self) -> Result<BTreeMap<Category, Vec<String>>, StorageError> {
        let mut lists = BTreeMap::new();
        let mut empty = Vec::new();

        for category in Category::ALL {
            let entries = self.load_category(category).await?;
            if entries.is_empty() {
                empty.push(category.label());
            }
            lists.insert(category, entries);
        }

        if !empty.is_empty() {
            tracing::warn!("Categories without entries: {}", empty.join(", "));
        }
        Ok(lists)
    }

    pub async fn load_category(&self, category: Category) -> Result<Vec<String>, StorageError> {
        let key = category.storage_key();
        match bounded(self.timeout, self.backend.read(key)).await? {
            Some(entries) => Ok(entries),
            None => {
                tracing::warn!("No stored list for {} ({}), treating as empty", category, key);
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole stored list of `category`
    pub async fn save(&self, category: Category, entries: &[String]) -> Result<(), StorageError> {
        bounded(self.timeout, self.backend.write(category.storage_key(), entries)).await?;
        tracing::debug!("Saved {} entries to {}", entries.len(), category.storage_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStore;
    use async_trait::async_trait;

    /// Backend that never answers
    struct StalledBackend;

    #[async_trait]
    impl ListBackend for StalledBackend {
        async fn read(&self, _key: &str) -> Result<Option<Vec<String>>, StorageError> {
            std::future::pending().await
        }

        async fn write(&self, _key: &str, _lines: &[String]) -> Result<(), StorageError> {
            std::future::pending().await
        }

        async fn ensure(&self, _keys: &[&str]) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_category_loads_empty() {
        let store = ListStore::new(Arc::new(MemoryStore::new()));
        let lists = store.load().await.unwrap();

        assert_eq!(lists.len(), 4);
        assert!(lists.values().all(|entries| entries.is_empty()));
    }

    #[tokio::test]
    async fn test_save_then_load_category() {
        let backend = Arc::new(MemoryStore::new());
        let store = ListStore::new(backend.clone());

        let entries = vec!["麥當勞".to_string(), "肯德基".to_string()];
        store.save(Category::EatOut, &entries).await.unwrap();

        assert_eq!(store.load_category(Category::EatOut).await.unwrap(), entries);
        assert_eq!(backend.read("easy").await.unwrap(), Some(entries));
        assert!(store.load_category(Category::Delivery).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_creates_every_category() {
        let backend = Arc::new(MemoryStore::new());
        let store = ListStore::new(backend.clone());
        store.init().await.unwrap();

        for key in ["easy", "delivery", "great", "drink"] {
            assert_eq!(backend.read(key).await.unwrap(), Some(vec![]));
        }
    }

    #[tokio::test]
    async fn test_stalled_backend_times_out() {
        let store = ListStore::new(Arc::new(StalledBackend)).with_timeout(Duration::from_millis(50));

        let err = store.load_category(Category::Drinks).await.unwrap_err();
        assert!(matches!(err, StorageError::Timeout(_)));
        assert!(err.is_retryable());

        let err = store.save(Category::Drinks, &[]).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_locks_are_per_category() {
        let store = ListStore::new(Arc::new(MemoryStore::new()));

        let _easy = store.lock(Category::EatOut).await;
        // a different category is not blocked
        let delivery = tokio::time::timeout(Duration::from_millis(100), store.lock(Category::Delivery)).await;
        assert!(delivery.is_ok());

        // the same category is
        let easy_again = tokio::time::timeout(Duration::from_millis(50), store.lock(Category::EatOut)).await;
        assert!(easy_again.is_err());
    }
}
