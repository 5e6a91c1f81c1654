//! List storage backends: flat text files and an in-memory map

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::traits::ListBackend;

/// One `<key>.txt` file per list, one entry per line
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.txt", key))
    }
}

/// Trimmed, non-empty lines
fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn render_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[async_trait]
impl ListBackend for FileStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(parse_lines(&content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, lines: &[String]) -> Result<(), StorageError> {
        tokio::fs::write(self.path_for(key), render_lines(lines)).await?;
        Ok(())
    }

    async fn ensure(&self, keys: &[&str]) -> Result<(), StorageError> {
        if !tokio::fs::try_exists(&self.base_path).await? {
            tokio::fs::create_dir_all(&self.base_path).await?;
            tracing::info!("Created list directory {}", self.base_path.display());
        }

        for key in keys {
            let path = self.path_for(key);
            if !tokio::fs::try_exists(&path).await? {
                tokio::fs::write(&path, "").await?;
                tracing::info!("Created list file {}", path.display());
            }
        }
        Ok(())
    }
}

/// In-memory store, used by the console adapter's `--ephemeral` mode and tests
#[derive(Default, Clone)]
pub struct MemoryStore {
    lists: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListBackend for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        let lists = self.lists.read().await;
        Ok(lists.get(key).cloned())
    }

    async fn write(&self, key: &str, lines: &[String]) -> Result<(), StorageError> {
        let mut lists = self.lists.write().await;
        lists.insert(key.to_string(), lines.to_vec());
        Ok(())
    }

    async fn ensure(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut lists = self.lists.write().await;
        for key in keys {
            lists.entry(key.to_string()).or_insert_with(Vec::new);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_trims_and_skips_blank() {
        let lines = parse_lines("  麥當勞 \n\n摩斯漢堡\r\n   \n");
        assert_eq!(lines, vec!["麥當勞", "摩斯漢堡"]);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read("easy").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_rewrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("easy", &["a".to_string(), "b".to_string()]).await.unwrap();
        store.write("easy", &["c".to_string()]).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("easy.txt")).unwrap();
        assert_eq!(raw, "c\n");
        assert_eq!(store.read("easy").await.unwrap(), Some(vec!["c".to_string()]));
    }

    #[tokio::test]
    async fn test_file_store_ensure_creates_dir_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("list");
        let store = FileStore::new(&base);

        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("drink.txt"), "五十嵐\n").unwrap();

        store.ensure(&["easy", "drink"]).await.unwrap();

        assert_eq!(std::fs::read_to_string(base.join("easy.txt")).unwrap(), "");
        // existing content is left alone
        assert_eq!(std::fs::read_to_string(base.join("drink.txt")).unwrap(), "五十嵐\n");
    }

    #[tokio::test]
    async fn test_file_store_ensure_from_scratch() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested").join("list");
        let store = FileStore::new(&base);

        store.ensure(&["blacklist"]).await.unwrap();
        assert_eq!(store.read("blacklist").await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.read("great").await.unwrap().is_none());

        store.ensure(&["great"]).await.unwrap();
        assert_eq!(store.read("great").await.unwrap(), Some(vec![]));

        store.write("great", &["鼎泰豐".to_string()]).await.unwrap();
        store.ensure(&["great"]).await.unwrap();
        assert_eq!(store.read("great").await.unwrap(), Some(vec!["鼎泰豐".to_string()]));
    }
}
