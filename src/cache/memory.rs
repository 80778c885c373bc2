//! In-process memory tier
//!
//! A map from raw cache keys to typed values with an expiry instant, guarded
//! by a reader/writer lock. Expiry is passive: stale entries are ignored on
//! read and only replaced when the key is written again.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A value held by the memory cache together with its expiry instant
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When this entry stops being served
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Creates an entry that expires `ttl` from now
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Whether the entry has passed its expiry instant
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe, time-expiring cache of values of a single type
#[derive(Debug)]
pub struct MemoryCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryCache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores `value` under `key`, replacing any existing entry
    pub fn set(&self, key: impl Into<String>, value: T, ttl: Duration) {
        self.entries
            .write()
            .insert(key.into(), CacheEntry::new(value, ttl));
    }

    /// Number of entries held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Clone> MemoryCache<T> {
    /// Returns the value for `key` if present and not expired
    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            _ => None,
        }
    }
}
