//! The key-value store the thanks counters live in.
//!
//! The store is handed to the dispatcher explicitly, so tests and the binary can pick the
//! backend. [`MemoryStore`] keeps everything in process, [`FileStore`] persists a JSON object on
//! disk.

mod file;
mod memory;

use std::fmt;

use async_trait::async_trait;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
use crate::Result;

/// A string-to-string key-value store.
///
/// Counter values are written as decimal integer strings.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> Result<()>;

    /// Adds one to the counter stored under `key`, treating an absent key as zero, and returns
    /// the new count.
    ///
    /// The default implementation is a plain read followed by a write and loses updates when two
    /// increments of the same key interleave. Stores that can do it atomically override it.
    async fn increment(&self, key: &str) -> Result<u64> {
        let next = next_counter(key, self.get(key).await?.as_deref())?;
        self.put(key, next.to_string()).await?;
        Ok(next)
    }
}

/// Parses a stored counter value, an absent value counts as zero.
pub(crate) fn parse_counter(key: &str, value: Option<&str>) -> Result<u64, StoreError> {
    match value {
        None => Ok(0),
        Some(value) => value.trim().parse().map_err(|_| StoreError::CorruptCounter {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

/// The value a counter holds after one more increment.
pub(crate) fn next_counter(key: &str, value: Option<&str>) -> Result<u64, StoreError> {
    parse_counter(key, value)?.checked_add(1).ok_or_else(|| StoreError::CounterOverflow {
        key: key.to_owned(),
    })
}

/// An error that occurred while reading or writing the store.
#[derive(Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// The value stored under `key` is not a decimal non-negative integer.
    CorruptCounter { key: String, value: String },
    /// The counter stored under `key` is already at the largest representable count.
    CounterOverflow { key: String },
    /// The backing file doesn't hold a JSON object of strings.
    CorruptFile { path: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptCounter {
                key,
                value,
            } => write!(f, "counter for {key} holds a non-numeric value: {value:?}"),
            Self::CounterOverflow {
                key,
            } => write!(f, "counter for {key} cannot be incremented any further"),
            Self::CorruptFile {
                path,
                reason,
            } => write!(f, "store file {path} is corrupt: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tokio::sync::Mutex;

    use super::*;
    use crate::Error;

    /// A store relying on the default read-modify-write increment.
    #[derive(Default)]
    struct PlainStore(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl KeyValueStore for PlainStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().await.get(key).cloned())
        }

        async fn put(&self, key: &str, value: String) -> Result<()> {
            self.0.lock().await.insert(key.to_owned(), value);
            Ok(())
        }
    }

    #[tokio::test]
    async fn default_increment_starts_at_zero() {
        let store = PlainStore::default();

        assert_eq!(store.increment("U2").await.unwrap(), 1);
        assert_eq!(store.increment("U2").await.unwrap(), 2);
        assert_eq!(store.get("U2").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("U3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn default_increment_refuses_corrupt_values() {
        let store = PlainStore::default();
        store.put("U2", "NaN".into()).await.unwrap();

        let err = store.increment("U2").await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::CorruptCounter { .. })));
        assert_eq!(store.get("U2").await.unwrap().as_deref(), Some("NaN"));
    }

    #[tokio::test]
    async fn default_increment_refuses_to_overflow() {
        let store = PlainStore::default();
        store.put("U2", u64::MAX.to_string()).await.unwrap();

        let err = store.increment("U2").await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::CounterOverflow { .. })));
        assert_eq!(store.get("U2").await.unwrap(), Some(u64::MAX.to_string()));
    }

    #[test]
    fn next_counter_checks_bounds() {
        assert_eq!(next_counter("k", None).unwrap(), 1);
        assert_eq!(next_counter("k", Some("41")).unwrap(), 42);
        assert!(matches!(
            next_counter("k", Some(u64::MAX.to_string().as_str())),
            Err(StoreError::CounterOverflow { .. })
        ));
    }

    #[test]
    fn counters_parse_as_decimal() {
        assert_eq!(parse_counter("k", None).unwrap(), 0);
        assert_eq!(parse_counter("k", Some("41")).unwrap(), 41);
        assert!(parse_counter("k", Some("-1")).is_err());
        assert!(parse_counter("k", Some("")).is_err());
    }
}
