// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A fetch-through cache with a staleness window.
//!
//! # Policy
//!
//! * A value is served from memory only while `now < fetched_at + ttl`.
//! * A miss or a stale entry triggers one synchronous fetch on the caller's
//!   task. There is no background refresh and no retry.
//! * A failed fetch surfaces as [`CacheError::DataSourceUnavailable`]. The
//!   stale value is never returned in its place.
//!
//! # Concurrency
//!
//! Each key has its own slot guarded by an async mutex, and the
//! check-stale/fetch/store sequence runs under that slot's lock. Two callers
//! racing on the same stale key therefore produce one fetch; callers on
//! different keys never wait for each other's fetches. The outer map lock is
//! held only long enough to find or create a slot.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::errors::CacheError;
use crate::observability::messages::cache::{CacheFetchFailed, CacheRefreshed};
use crate::observability::messages::StructuredLog;
use crate::traits::Fetcher;

/// One cached value and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        match self.fetched_at.checked_add(ttl) {
            Some(expires) => now < expires,
            None => true,
        }
    }
}

type Slot<V> = Arc<Mutex<Option<CacheEntry<V>>>>;

pub struct TtlCache<K, V> {
    name: String,
    ttl: Duration,
    fetcher: Arc<dyn Fetcher<K, V>>,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &str, ttl: Duration, fetcher: Arc<dyn Fetcher<K, V>>) -> Self {
        Self {
            name: name.to_string(),
            ttl,
            fetcher,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the value for `key`, fetching it if missing or stale.
    pub async fn get(&self, key: K) -> Result<V, CacheError> {
        let slot = self.slot(&key).await;
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(self.ttl, Instant::now()) {
                return Ok(cached.value.clone());
            }
        }

        let started = Instant::now();
        match self.fetcher.fetch(key.clone()).await {
            Ok(value) => {
                *entry = Some(CacheEntry {
                    value: value.clone(),
                    fetched_at: Instant::now(),
                });
                CacheRefreshed {
                    cache: &self.name,
                    key: &key.to_string(),
                    duration: started.elapsed(),
                }
                .log();
                Ok(value)
            }
            Err(source) => {
                CacheFetchFailed {
                    cache: &self.name,
                    key: &key.to_string(),
                    error: &source,
                }
                .log();
                Err(CacheError::DataSourceUnavailable {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    /// Drop the entry for `key` so the next `get` fetches.
    pub async fn invalidate(&self, key: &K) {
        self.slots.lock().await.remove(key);
    }

    async fn slot(&self, key: &K) -> Slot<V> {
        let mut slots = self.slots.lock().await;
        slots.entry(key.clone()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns "value-<key>-<n>" where n counts fetches; fails for key 0.
    struct CountingFetcher {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CountingFetcher {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher<u16, String> for CountingFetcher {
        async fn fetch(&self, key: u16) -> Result<String, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if key == 0 {
                return Err(FetchError::Unavailable("no such season".to_string()));
            }
            Ok(format!("value-{}-{}", key, n))
        }
    }

    const TTL: Duration = Duration::from_secs(30 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_is_served_from_memory() {
        let fetcher = CountingFetcher::new(Duration::ZERO);
        let cache = TtlCache::new("seasons", TTL, fetcher.clone());

        assert_eq!(cache.get(2017).await.unwrap(), "value-2017-1");
        tokio::time::advance(Duration::from_secs(29 * 60)).await;
        assert_eq!(cache.get(2017).await.unwrap(), "value-2017-1");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_is_refetched() {
        let fetcher = CountingFetcher::new(Duration::ZERO);
        let cache = TtlCache::new("seasons", TTL, fetcher.clone());

        cache.get(2017).await.unwrap();
        tokio::time::advance(Duration::from_secs(31 * 60)).await;

        assert_eq!(cache.get(2017).await.unwrap(), "value-2017-2");
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_ttl_never_expires() {
        let fetcher = CountingFetcher::new(Duration::ZERO);
        let cache = TtlCache::new("seasons", Duration::from_secs(u64::MAX), fetcher.clone());

        cache.get(2017).await.unwrap();
        tokio::time::advance(Duration::from_secs(365 * 24 * 60 * 60)).await;

        assert_eq!(cache.get(2017).await.unwrap(), "value-2017-1");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let fetcher = CountingFetcher::new(Duration::ZERO);
        let cache = TtlCache::new("seasons", TTL, fetcher.clone());

        cache.get(2016).await.unwrap();
        cache.get(2017).await.unwrap();
        cache.get(2016).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported_not_masked() {
        let fetcher = CountingFetcher::new(Duration::ZERO);
        let cache = TtlCache::new("seasons", TTL, fetcher.clone());

        let err = cache.get(0).await.unwrap_err();
        assert!(matches!(err, CacheError::DataSourceUnavailable { ref key, .. } if key == "0"));

        // one attempt per call, no hidden retry
        assert_eq!(fetcher.calls(), 1);
        cache.get(0).await.unwrap_err();
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_gets_on_same_key_fetch_once() {
        let fetcher = CountingFetcher::new(Duration::from_secs(2));
        let cache = TtlCache::new("seasons", TTL, fetcher.clone());

        let (a, b) = tokio::join!(cache.get(2017), cache.get(2017));

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_fetch() {
        let fetcher = CountingFetcher::new(Duration::ZERO);
        let cache = TtlCache::new("seasons", TTL, fetcher.clone());

        cache.get(2017).await.unwrap();
        cache.invalidate(&2017).await;
        cache.get(2017).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
    }
}
