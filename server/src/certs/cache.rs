//! Certificate Trust Cache
//!
//! Process-lifetime cache of accepted signing certificates keyed by source
//! URL. The key space is the handful of cert chain URLs the platform uses,
//! so there is no size bound.
//!
//! Finding any expired record clears the whole cache rather than just that
//! entry. Lookups that evict and stores both take the write lock, so an
//! eviction never races a concurrent store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::record::CertificateRecord;

/// Thread-safe cache of validated certificates.
#[derive(Debug, Default)]
pub struct CertificateCache {
    entries: RwLock<HashMap<String, Arc<CertificateRecord>>>,
}

impl CertificateCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached record for `url` if it is still valid at `now`.
    pub async fn lookup(&self, url: &str, now: DateTime<Utc>) -> Option<Arc<CertificateRecord>> {
        // Fast path: shared lock, no eviction needed
        {
            let entries = self.entries.read().await;
            match entries.get(url) {
                None => return None,
                Some(record) if !record.is_expired_at(now) => return Some(Arc::clone(record)),
                Some(_) => {}
            }
        }

        // Slow path: re-check under the write lock, a store may have replaced the entry
        let mut entries = self.entries.write().await;
        match entries.get(url) {
            Some(record) if !record.is_expired_at(now) => Some(Arc::clone(record)),
            Some(_) => {
                debug!(url = %url, evicted = entries.len(), "Cached certificate expired, clearing cache");
                entries.clear();
                None
            }
            None => None,
        }
    }

    /// Cache a record under its source URL.
    ///
    /// Records already expired at `now` are not retained. Returns whether the
    /// record was stored.
    pub async fn store(&self, record: Arc<CertificateRecord>, now: DateTime<Utc>) -> bool {
        if record.is_expired_at(now) {
            return false;
        }
        let mut entries = self.entries.write().await;
        entries.insert(record.source_url.clone(), record);
        true
    }

    /// Number of cached records.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every cached record.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{Duration, TimeZone};
    use skill_crypto::ParsedCertificate;

    const VALID: &[u8] = include_bytes!("../../../testdata/echo_api_valid.pem");

    fn record(url: &str) -> Arc<CertificateRecord> {
        Arc::new(CertificateRecord {
            source_url: url.to_string(),
            pem: Bytes::from_static(VALID),
            certificate: ParsedCertificate::from_pem(VALID).unwrap(),
        })
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn miss_on_empty_cache() {
        let cache = CertificateCache::new();
        assert!(cache.lookup("https://a", now()).await.is_none());
    }

    #[tokio::test]
    async fn hit_returns_identical_record() {
        let cache = CertificateCache::new();
        let rec = record("https://a");
        assert!(cache.store(Arc::clone(&rec), now()).await);

        let hit = cache.lookup("https://a", now()).await.unwrap();
        assert!(Arc::ptr_eq(&hit, &rec));
    }

    #[tokio::test]
    async fn expired_entry_clears_whole_cache() {
        let cache = CertificateCache::new();
        let a = record("https://a");
        cache.store(Arc::clone(&a), now()).await;
        cache.store(record("https://b"), now()).await;
        assert_eq!(cache.len().await, 2);

        let after_expiry = a.not_after() + Duration::seconds(1);
        assert!(cache.lookup("https://a", after_expiry).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn lookup_of_other_key_does_not_evict() {
        let cache = CertificateCache::new();
        let a = record("https://a");
        cache.store(Arc::clone(&a), now()).await;

        let after_expiry = a.not_after() + Duration::seconds(1);
        assert!(cache.lookup("https://missing", after_expiry).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn refuses_to_store_expired_record() {
        let cache = CertificateCache::new();
        let a = record("https://a");
        let after_expiry = a.not_after() + Duration::days(1);
        assert!(!cache.store(a, after_expiry).await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_lookups_and_stores_stay_consistent() {
        let cache = Arc::new(CertificateCache::new());
        let mut tasks = Vec::new();
        for i in 0..16 {
            let cache = Arc::clone(&cache);
            tasks.push(tokio::spawn(async move {
                let url = format!("https://cert/{}", i % 4);
                cache.store(record(&url), now()).await;
                cache.lookup(&url, now()).await.is_some()
            }));
        }
        for task in tasks {
            assert!(task.await.unwrap());
        }
        assert_eq!(cache.len().await, 4);
    }
}
