//! Time-expiring result cache.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, instrument};

use radius_core::record::Record;
use radius_core::{QuerySpec, RecordSource, Result};

/// Default lifetime of a cached fetch.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

type Slot<V> = Arc<tokio::sync::Mutex<Option<Entry<V>>>>;

/// A per-process key→value store whose entries expire after a fixed TTL.
///
/// [`get_or_try_insert_with`](Self::get_or_try_insert_with) is atomic per
/// key: concurrent callers for the same key wait for a single computation
/// and then share its result. Different keys never block each other.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the slot for `key`, creating it if needed.
    ///
    /// Expired or empty slots that no caller is holding are dropped on the
    /// way, so keys that stop being requested do not pin their values.
    fn slot(&self, key: &K) -> Slot<V> {
        let ttl = self.ttl;
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(entry) => entry.as_ref().is_some_and(|e| e.stored_at.elapsed() < ttl),
                Err(_) => true,
            }
        });
        slots.entry(key.clone()).or_default().clone()
    }

    /// Number of keys currently tracked, fresh or not yet pruned.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached value for `key` if it has not expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let slot = self.slot(key);
        let entry = slot.lock().await;
        entry
            .as_ref()
            .filter(|e| e.stored_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
    }

    /// Return the fresh cached value for `key`, or compute and store it.
    ///
    /// Errors from `compute` are returned as-is and nothing is stored.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: K,
        compute: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        let slot = self.slot(&key);
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref()
            && cached.stored_at.elapsed() < self.ttl
        {
            return Ok(cached.value.clone());
        }

        let value = compute().await?;
        *entry = Some(Entry {
            value: value.clone(),
            stored_at: Instant::now(),
        });
        Ok(value)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// A [`RecordSource`] decorator that caches successful fetches by limit.
///
/// The limit is the only part of a query that varies within one deployment,
/// so it is the cache key. Failed fetches are not cached.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    cache: TtlCache<u32, Arc<Vec<Record>>>,
}

impl<S: RecordSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &TtlCache<u32, Arc<Vec<Record>>> {
        &self.cache
    }
}

#[async_trait]
impl<S: RecordSource> RecordSource for CachedSource<S> {
    #[instrument(skip(self, query), fields(limit = query.limit))]
    async fn try_fetch(&self, query: &QuerySpec) -> Result<Vec<Record>> {
        let records = self
            .cache
            .get_or_try_insert_with(query.limit, || async {
                debug!("cache miss");
                self.inner.try_fetch(query).await.map(Arc::new)
            })
            .await?;

        Ok(records.as_ref().clone())
    }
}
