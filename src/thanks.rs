//! Per-user thanks counters on top of a [`KeyValueStore`].

use std::sync::Arc;

use tracing::debug;

use crate::model::id::UserId;
use crate::store::{parse_counter, KeyValueStore};
use crate::Result;

/// Reads and bumps the thanks counters, keyed by user id.
///
/// Counters only ever grow, one thank at a time.
#[derive(Clone)]
pub struct ThanksLedger {
    store: Arc<dyn KeyValueStore>,
}

impl ThanksLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
        }
    }

    /// How many thanks `user` has received. Users that were never thanked have zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds a value that isn't a count.
    pub async fn thanks_for(&self, user: &UserId) -> Result<u64> {
        let value = self.store.get(user.as_str()).await?;
        Ok(parse_counter(user.as_str(), value.as_deref())?)
    }

    /// Records one thank for `user` and returns their new count.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds a value that isn't a count.
    pub async fn thank(&self, user: &UserId) -> Result<u64> {
        let count = self.store.increment(user.as_str()).await?;
        debug!(user = %user, count, "thanks counter incremented");
        Ok(count)
    }
}

impl std::fmt::Debug for ThanksLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThanksLedger").finish_non_exhaustive()
    }
}
