use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

use super::list_store::{bounded, DEFAULT_STORAGE_TIMEOUT};
use crate::application::errors::StorageError;
use crate::domain::entities::BLACKLIST_KEY;
use crate::domain::traits::ListBackend;

/// Global list of banned substrings
pub struct Blacklist {
    backend: Arc<dyn ListBackend>,
    lock: Mutex<()>,
    timeout: Duration,
}

impl Blacklist {
    pub fn new(backend: Arc<dyn ListBackend>) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        bounded(self.timeout, self.backend.ensure(&[BLACKLIST_KEY])).await
    }

    /// Exclusive access for a read-modify-write
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    pub async fn load(&self) -> Result<Vec<String>, StorageError> {
        match bounded(self.timeout, self.backend.read(BLACKLIST_KEY)).await? {
            Some(patterns) => Ok(patterns),
            None => {
                tracing::warn!("No stored blacklist, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    pub async fn save(&self, patterns: &[String]) -> Result<(), StorageError> {
        bounded(self.timeout, self.backend.write(BLACKLIST_KEY, patterns)).await
    }
}

/// First pattern contained in `name` (case-sensitive substring match)
pub fn matching_pattern<'a>(patterns: &'a [String], name: &str) -> Option<&'a str> {
    patterns
        .iter()
        .map(String::as_str)
        .find(|pattern| name.contains(pattern))
}
