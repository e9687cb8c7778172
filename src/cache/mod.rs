//! Authority-backed object cache.
//!
//! Keyed cache with per-key construction locks: at most one generator runs
//! per key at any time, while construction for different keys proceeds in
//! parallel. Every entry is tracked through a weak reference; a bounded LRU
//! tier additionally holds strong references, so pushing past capacity
//! demotes the least-recently-used entry to weak-only retention instead of
//! evicting it outright.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Weak};

use lru::LruCache;
use parking_lot::Mutex;

use crate::error::CacheError;

/// Retention policy for resolved entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// Strong retention up to `capacity`, weak-reference demotion beyond.
    Weak,
    /// Unbounded strong retention; entries are never demoted.
    All,
    /// No caching: every lookup invokes the generator.
    None,
}

/// Cache configuration.
#[derive(Clone, Copy, Debug)]
pub struct CacheConfig {
    pub policy: CachePolicy,
    /// Strong-tier capacity under the `Weak` policy. Ignored otherwise.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: CachePolicy::Weak,
            capacity: 50,
        }
    }
}

struct Inner<V> {
    /// Authoritative entry table. A cleared weak reference counts as a miss
    /// and is pruned on probe.
    entries: HashMap<String, Weak<V>>,
    /// Bounded strong tier; `None` under the `None` policy.
    strong: Option<LruCache<String, Arc<V>>>,
    /// Per-key construction locks, created on demand and dropped once the
    /// key resolves.
    key_locks: HashMap<String, Arc<Mutex<()>>>,
    disposed: bool,
}

impl<V> Inner<V> {
    /// Probe for a live entry, refreshing its recency on hit.
    fn probe(&mut self, key: &str) -> Option<Arc<V>> {
        match self.entries.get(key) {
            Some(weak) => match weak.upgrade() {
                Some(value) => {
                    if let Some(strong) = self.strong.as_mut() {
                        // Re-promotes a demoted entry and moves it to MRU;
                        // whatever falls off the tail is thereby demoted.
                        strong.push(key.to_owned(), Arc::clone(&value));
                    }
                    Some(value)
                }
                None => {
                    self.entries.remove(key);
                    None
                }
            },
            None => None,
        }
    }

    fn insert(&mut self, key: &str, value: &Arc<V>) {
        self.entries.insert(key.to_owned(), Arc::downgrade(value));
        if let Some(strong) = self.strong.as_mut() {
            if strong.push(key.to_owned(), Arc::clone(value)).is_some() {
                log::debug!("cache: strong tier full, demoted LRU entry");
            }
        }
    }
}

/// Thread-safe keyed cache with single-construction per key.
pub struct ObjectCache<V> {
    config: CacheConfig,
    inner: Mutex<Inner<V>>,
}

impl<V> ObjectCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        let strong = match config.policy {
            CachePolicy::Weak => {
                let cap = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
                Some(LruCache::new(cap))
            }
            CachePolicy::All => Some(LruCache::unbounded()),
            CachePolicy::None => None,
        };
        Self {
            config,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                strong,
                key_locks: HashMap::new(),
                disposed: false,
            }),
        }
    }

    /// Return the cached object for `key`, constructing it with `generator`
    /// on a miss.
    ///
    /// At most one generator runs per key at any time; a thread that loses
    /// the race re-checks and returns the winner's value. Generator failures
    /// propagate and are never cached, so the next lookup retries.
    pub fn get_or_create<E, F>(&self, key: &str, generator: F) -> Result<Arc<V>, CacheError<E>>
    where
        E: std::error::Error + 'static,
        F: FnOnce() -> Result<V, E>,
    {
        if self.config.policy == CachePolicy::None {
            if self.inner.lock().disposed {
                return Err(CacheError::Disposed);
            }
            return generator()
                .map(Arc::new)
                .map_err(|source| CacheError::Construction {
                    key: key.to_owned(),
                    source,
                });
        }

        // Fast path: resolved entries are returned without touching any
        // per-key lock.
        let key_lock = {
            let mut inner = self.inner.lock();
            if inner.disposed {
                return Err(CacheError::Disposed);
            }
            if let Some(value) = inner.probe(key) {
                return Ok(value);
            }
            Arc::clone(
                inner
                    .key_locks
                    .entry(key.to_owned())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };

        // Slow path: serialize construction for this key only.
        let _guard = key_lock.lock();

        // Double-check: another thread may have completed while we waited.
        {
            let mut inner = self.inner.lock();
            if inner.disposed {
                return Err(CacheError::Disposed);
            }
            if let Some(value) = inner.probe(key) {
                return Ok(value);
            }
        }

        // The generator runs without holding the map lock, so lookups for
        // other keys never wait on this construction.
        let value = match generator() {
            Ok(v) => Arc::new(v),
            Err(source) => {
                let mut inner = self.inner.lock();
                // A queued waiter still holds a clone of this lock. Removing
                // the entry now would let a later caller mint a fresh lock
                // and construct concurrently with the waiter, so the entry
                // is dropped only when nobody else references it. Waiter
                // clones are taken under the map lock, making the count
                // stable here: 2 = the map entry plus our own handle.
                if Arc::strong_count(&key_lock) == 2 {
                    inner.key_locks.remove(key);
                }
                return Err(CacheError::Construction {
                    key: key.to_owned(),
                    source,
                });
            }
        };
        log::debug!("cache: constructed entry for {key:?}");

        let mut inner = self.inner.lock();
        if inner.disposed {
            return Err(CacheError::Disposed);
        }
        inner.insert(key, &value);
        inner.key_locks.remove(key);
        Ok(value)
    }

    /// Look up a resolved entry without constructing or re-ordering.
    pub fn peek(&self, key: &str) -> Option<Arc<V>> {
        let inner = self.inner.lock();
        inner.entries.get(key).and_then(Weak::upgrade)
    }

    /// Number of live entries (strong or weak).
    pub fn len(&self) -> usize {
        let inner = self.inner.lock();
        inner
            .entries
            .values()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries currently held in the strong tier.
    pub fn strong_len(&self) -> usize {
        let inner = self.inner.lock();
        inner.strong.as_ref().map_or(0, |s| s.len())
    }

    /// Drop every entry and refuse further lookups.
    pub fn dispose(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        if let Some(strong) = inner.strong.as_mut() {
            strong.clear();
        }
        inner.key_locks.clear();
        inner.disposed = true;
        log::debug!("cache: disposed");
    }
}

impl<V> Default for ObjectCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
