//! Root reference cache with weak keys.
//!
//! Entries are bucketed by the key's hash and hold only a weak handle to the
//! key, so a cached reference never keeps a host type alive. Dead entries are
//! dropped whenever their bucket is touched, or all at once by [`ReferenceCache::purge`].
//!
//! The mutex is held around map operations only, never around a build.
//! Concurrent misses on the same key may build twice; the first insert wins and
//! every caller gets that value.

use lighttag_model::AbstractReference;
use lighttag_reflect::TypeHandle;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

struct CacheEntry<K: TypeHandle> {
    key: K::Weak,
    value: Arc<AbstractReference>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct ReferenceCache<K: TypeHandle> {
    buckets: Mutex<FxHashMap<u64, Vec<CacheEntry<K>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: TypeHandle> Default for ReferenceCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TypeHandle> ReferenceCache<K> {
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(FxHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<u64, Vec<CacheEntry<K>>>> {
        // Handle poisoned locks gracefully
        match self.buckets.lock() {
            Ok(guard) => guard,
            Err(e) => e.into_inner(),
        }
    }

    fn bucket_of(key: &K) -> u64 {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        hasher.finish()
    }

    pub fn get(&self, key: &K) -> Option<Arc<AbstractReference>> {
        let hash = Self::bucket_of(key);
        let mut buckets = self.lock();
        let bucket = buckets.get_mut(&hash)?;
        bucket.retain(|entry| K::upgrade(&entry.key).is_some());
        let found = bucket.iter().find_map(|entry| match K::upgrade(&entry.key) {
            Some(live) if live == *key => Some(Arc::clone(&entry.value)),
            _ => None,
        });
        if bucket.is_empty() {
            buckets.remove(&hash);
        }
        found
    }

    /// Insert unless a live entry for `key` exists; returns whichever value
    /// ends up cached.
    pub fn insert(&self, key: &K, value: Arc<AbstractReference>) -> Arc<AbstractReference> {
        let hash = Self::bucket_of(key);
        let mut buckets = self.lock();
        let bucket = buckets.entry(hash).or_default();
        bucket.retain(|entry| K::upgrade(&entry.key).is_some());
        for entry in bucket.iter() {
            if K::upgrade(&entry.key).is_some_and(|live| live == *key) {
                return Arc::clone(&entry.value);
            }
        }
        bucket.push(CacheEntry {
            key: key.downgrade(),
            value: Arc::clone(&value),
        });
        value
    }

    /// Cached reference for `key`, building it on a miss. A failed build
    /// leaves the cache untouched.
    pub fn get_or_build<E>(
        &self,
        key: &K,
        build: impl FnOnce() -> Result<AbstractReference, E>,
    ) -> Result<Arc<AbstractReference>, E> {
        if let Some(hit) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(?key, "reference cache hit");
            return Ok(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(?key, "reference cache miss");
        let built = Arc::new(build()?);
        Ok(self.insert(key, built))
    }

    /// Drop every entry whose key is no longer reachable.
    pub fn purge(&self) {
        let mut buckets = self.lock();
        buckets.retain(|_, bucket| {
            bucket.retain(|entry| K::upgrade(&entry.key).is_some());
            !bucket.is_empty()
        });
    }

    /// Number of entries, including ones whose key died since the last purge.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
