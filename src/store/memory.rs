use async_trait::async_trait;
use dashmap::DashMap;

use super::{next_counter, KeyValueStore};
use crate::Result;

/// An in-process store, lost when the process exits.
///
/// Increments hold the map's shard lock for the whole read-modify-write, so concurrent thanks to
/// the same user are never lost.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|value| value.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64> {
        let mut entry = self.entries.entry(key.to_owned()).or_insert_with(|| "0".to_owned());
        let next = next_counter(key, Some(entry.value()))?;
        *entry.value_mut() = next.to_string();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::StoreError;
    use crate::Error;

    #[tokio::test]
    async fn get_and_put() {
        let store = MemoryStore::new();
        assert_eq!(store.get("U1").await.unwrap(), None);

        store.put("U1", "5".into()).await.unwrap();
        assert_eq!(store.get("U1").await.unwrap().as_deref(), Some("5"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryStore::new());

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.increment("U2").await.unwrap() })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.get("U2").await.unwrap().as_deref(), Some("64"));
    }

    #[tokio::test]
    async fn saturated_counters_are_left_alone() {
        let store = MemoryStore::new();
        store.put("U2", u64::MAX.to_string()).await.unwrap();

        let err = store.increment("U2").await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::CounterOverflow { .. })));
        assert_eq!(store.get("U2").await.unwrap(), Some(u64::MAX.to_string()));
    }
}
