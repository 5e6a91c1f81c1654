use async_trait::async_trait;
use crate::application::errors::StorageError;

/// Store trait - abstraction for list persistence
///
/// Each key holds an ordered list of lines. Writes replace the whole list.
#[async_trait]
pub trait ListBackend: Send + Sync {
    /// Read the list under `key`; `None` when nothing is stored there yet
    async fn read(&self, key: &str) -> Result<Option<Vec<String>>, StorageError>;

    /// Overwrite the list under `key`
    async fn write(&self, key: &str, lines: &[String]) -> Result<(), StorageError>;

    /// Create empty storage for every key that doesn't exist yet
    async fn ensure(&self, keys: &[&str]) -> Result<(), StorageError>;
}
