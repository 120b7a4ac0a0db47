use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Whole-record key-value persistence, the same contract the original
/// browser-local store exposed: opaque string in, opaque string out.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// One JSON file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles from concurrent requests.
    write_lock: RwLock<()>,
}

impl FileStore {
    pub async fn new(dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create data dir {}", dir.display()))?;
        Ok(Self {
            dir,
            write_lock: RwLock::new(()),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let _guard = self.write_lock.read().await;
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read record {key}")),
        }
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.write().await;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        tokio::fs::write(&tmp, value)
            .await
            .with_context(|| format!("write record {key}"))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("commit record {key}"))?;
        Ok(())
    }
}

/// In-memory store for tests and `AppState::fake()`.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod storage_tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::default();
        assert_eq!(store.get("calorieTracker_goals").await.unwrap(), None);

        store.set("calorieTracker_goals", r#"{"calories":2000}"#).await.unwrap();
        assert_eq!(
            store.get("calorieTracker_goals").await.unwrap().as_deref(),
            Some(r#"{"calories":2000}"#)
        );

        store.set("calorieTracker_goals", r#"{"calories":1800}"#).await.unwrap();
        assert_eq!(
            store.get("calorieTracker_goals").await.unwrap().as_deref(),
            Some(r#"{"calories":1800}"#)
        );
    }

    #[tokio::test]
    async fn file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("caloria-store-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(dir.clone()).await.unwrap();

        assert_eq!(store.get("calorieTracker_foods").await.unwrap(), None);
        store.set("calorieTracker_foods", "[]").await.unwrap();
        assert_eq!(
            store.get("calorieTracker_foods").await.unwrap().as_deref(),
            Some("[]")
        );

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
