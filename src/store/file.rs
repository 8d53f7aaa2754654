use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{next_counter, KeyValueStore, StoreError};
use crate::json;
use crate::Result;

/// A store persisted as a single JSON object file.
///
/// The whole object is kept in memory and written back after every change, through a temporary
/// file that is renamed over the old one. One lock guards both the map and the file, which makes
/// every operation, [`increment`] included, atomic within this process. Two processes sharing a
/// file are not coordinated.
///
/// [`increment`]: KeyValueStore::increment
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file can't be read, or [`StoreError::CorruptFile`] if it
    /// doesn't hold a JSON object of strings.
    ///
    /// [`Error::Io`]: crate::Error::Io
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match fs::read(&path).await {
            Ok(bytes) => json::from_slice(&bytes).map_err(|why| StoreError::CorruptFile {
                path: path.display().to_string(),
                reason: why.to_string(),
            })?,
            Err(why) if why.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "store file does not exist yet, starting empty");
                BTreeMap::new()
            },
            Err(why) => return Err(why.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        fs::write(&tmp, json::to_vec_pretty(entries)?).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = entries.len(), "store file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let previous = entries.insert(key.to_owned(), value);

        if let Err(why) = self.persist(&entries).await {
            restore(&mut entries, key, previous);
            return Err(why);
        }
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64> {
        let mut entries = self.entries.lock().await;
        let next = next_counter(key, entries.get(key).map(String::as_str))?;
        let previous = entries.insert(key.to_owned(), next.to_string());

        if let Err(why) = self.persist(&entries).await {
            restore(&mut entries, key, previous);
            return Err(why);
        }
        Ok(next)
    }
}

// Keeps memory in line with the file when a write fails.
fn restore(entries: &mut BTreeMap<String, String>, key: &str, previous: Option<String>) {
    match previous {
        Some(value) => entries.insert(key.to_owned(), value),
        None => entries.remove(key),
    };
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::Error;

    fn scratch_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("thanks-bot-{}-{n}.json", std::process::id()))
    }

    #[tokio::test]
    async fn counters_survive_reopening() {
        let path = scratch_path();

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.get("U2").await.unwrap(), None);
        assert_eq!(store.increment("U2").await.unwrap(), 1);
        assert_eq!(store.increment("U2").await.unwrap(), 2);
        store.put("U3", "7".into()).await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("U2").await.unwrap().as_deref(), Some("2"));
        assert_eq!(reopened.increment("U3").await.unwrap(), 8);

        fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn refuses_a_corrupt_file() {
        let path = scratch_path();
        fs::write(&path, b"[1, 2, 3]").await.unwrap();

        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::CorruptFile { .. })));

        fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn failed_writes_leave_memory_untouched() {
        let dir = scratch_path();
        fs::create_dir(&dir).await.unwrap();
        let store = FileStore::open(dir.join("missing").join("store.json")).await.unwrap();

        assert!(store.increment("U2").await.is_err());
        assert_eq!(store.get("U2").await.unwrap(), None);

        fs::remove_dir(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn saturated_counters_are_left_alone() {
        let path = scratch_path();
        let store = FileStore::open(&path).await.unwrap();
        store.put("U2", u64::MAX.to_string()).await.unwrap();

        let err = store.increment("U2").await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::CounterOverflow { .. })));
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("U2").await.unwrap(), Some(u64::MAX.to_string()));

        fs::remove_file(&path).await.unwrap();
    }
}
