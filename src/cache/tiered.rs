//! Memory-then-disk lookup chain for one entity kind
//!
//! A lookup tries the memory tier under the raw query, then the persistent
//! store under the normalized query, and only then calls the provider. A
//! successful provider result is written through to both tiers.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::key::memory_key;
use super::kind::EntityKind;
use super::memory::MemoryCache;
use super::store::RecordStore;

/// What the provider should be asked for on a cache miss
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Fetch results for the query as the caller gave it
    Query(String),
    /// The query was empty: fetch the provider's default selection
    Popular,
}

/// The two cache tiers for one entity kind
#[derive(Debug)]
pub struct TieredCache<K: EntityKind> {
    memory: MemoryCache<K::Payload>,
    store: RecordStore<K>,
    /// Lifetime of memory entries
    ttl: Duration,
}

impl<K: EntityKind> TieredCache<K> {
    /// Creates a tiered cache over `store` with memory entries living for `ttl`
    pub fn new(store: RecordStore<K>, ttl: Duration) -> Self {
        Self {
            memory: MemoryCache::new(),
            store,
            ttl,
        }
    }

    pub fn memory(&self) -> &MemoryCache<K::Payload> {
        &self.memory
    }

    pub fn store(&self) -> &RecordStore<K> {
        &self.store
    }

    /// Memory cache key for `query`
    pub fn memory_key(query: &str) -> String {
        memory_key(K::MEMORY_PREFIX, query)
    }

    /// Returns the cached value for `query`, calling `fetch` on a miss.
    ///
    /// Provider errors are returned unchanged and leave both tiers untouched.
    /// A failure to persist a fetched value is logged and otherwise ignored.
    pub async fn fetch<F, Fut, E>(&self, query: &str, fetch: F) -> Result<K::Payload, E>
    where
        F: FnOnce(Lookup) -> Fut,
        Fut: Future<Output = Result<K::Payload, E>>,
    {
        let raw_key = Self::memory_key(query);

        if let Some(value) = self.memory.get(&raw_key) {
            debug!(kind = K::LABEL, query, "memory cache hit");
            return Ok(value);
        }

        match self.store.load(query) {
            Ok(Some(value)) => {
                self.memory.set(raw_key, value.clone(), self.ttl);
                return Ok(value);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(kind = K::LABEL, query, error = %e, "persistent lookup failed, treating as miss");
            }
        }

        let lookup = if K::has_popular_bucket() && K::normalize(query).is_empty() {
            Lookup::Popular
        } else {
            Lookup::Query(query.to_string())
        };
        debug!(kind = K::LABEL, ?lookup, "cache miss, calling provider");

        let value = fetch(lookup).await?;

        if let Err(e) = self.store.save(query, &value) {
            warn!(kind = K::LABEL, query, error = %e, "could not persist fetched data");
        }
        self.memory.set(raw_key, value.clone(), self.ttl);

        Ok(value)
    }
}
