//! Persisted credential storage
//!
//! The bearer credential survives across sessions in a small key-value store.
//! Two backends are provided: an in-memory map for tests and short-lived
//! processes, and a JSON preferences file in the data directory.

use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Key under which the company credential is stored
pub const DEFAULT_CREDENTIAL_KEY: &str = "company_auth_token";

/// Key-value persistence for credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Credential store backed by a process-local map
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `value` under `key`
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Credential store persisted as a JSON object on disk
///
/// Every mutation rewrites the whole file. Writers are serialized through an
/// internal lock; readers go straight to the file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "preferences.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store `preferences.json` inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(values)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut values = self.load().await?;
        Ok(values.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await?;
        debug!(path = %self.path.display(), key, "Stored credential");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.save(&values).await?;
        debug!(path = %self.path.display(), key, "Removed credential");
        Ok(())
    }
}

// Mock implementation for testing
#[cfg(any(test, feature = "mocks"))]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub CredentialStore {}

        #[async_trait]
        impl CredentialStore for CredentialStore {
            async fn get(&self, key: &str) -> Result<Option<String>>;
            async fn set(&self, key: &str, value: &str) -> Result<()>;
            async fn remove(&self, key: &str) -> Result<()>;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_set_get_remove() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get(DEFAULT_CREDENTIAL_KEY).await.unwrap(), None);

        store.set(DEFAULT_CREDENTIAL_KEY, "abc").await.unwrap();
        assert_eq!(
            store.get(DEFAULT_CREDENTIAL_KEY).await.unwrap().as_deref(),
            Some("abc")
        );

        store.remove(DEFAULT_CREDENTIAL_KEY).await.unwrap();
        assert_eq!(store.get(DEFAULT_CREDENTIAL_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_remove_missing_key_is_ok() {
        let store = MemoryCredentialStore::with_value("other", "x");
        store.remove(DEFAULT_CREDENTIAL_KEY).await.unwrap();
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::in_dir(dir.path());
        assert_eq!(store.get(DEFAULT_CREDENTIAL_KEY).await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("glow");

        let store = FileCredentialStore::in_dir(&nested);
        store.set(DEFAULT_CREDENTIAL_KEY, "token-1").await.unwrap();
        store.set("theme", "dark").await.unwrap();

        let reopened = FileCredentialStore::in_dir(&nested);
        assert_eq!(
            reopened.get(DEFAULT_CREDENTIAL_KEY).await.unwrap().as_deref(),
            Some("token-1")
        );

        reopened.remove(DEFAULT_CREDENTIAL_KEY).await.unwrap();
        assert_eq!(store.get(DEFAULT_CREDENTIAL_KEY).await.unwrap(), None);
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::in_dir(dir.path());
        std::fs::write(store.path(), b"not json").unwrap();

        let result = store.get(DEFAULT_CREDENTIAL_KEY).await;
        assert!(matches!(result, Err(crate::Error::SerializationError(_))));
    }
}
