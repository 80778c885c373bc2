//! Two-tier cache for provider responses
//!
//! Every query goes through a time-expiring memory cache first and a
//! content-addressed JSON store on disk second; only a miss in both reaches
//! the external provider. Recipe sets, ingredient sets and recipe details
//! each get their own pair of tiers, all stored in one flat directory.

mod key;
mod kind;
mod maintenance;
mod memory;
mod store;
mod tiered;

pub use key::{hashed_filename, memory_key, normalize, short_hash};
pub use kind::{EntityKind, IngredientSet, RecipeDetail, RecipeSet};
pub use maintenance::{StorageStats, MAPPING_FILENAME};
pub use memory::{CacheEntry, MemoryCache};
pub use store::{
    Listing, MappingEntry, PurgeReport, RecordStore, StoreError, StoreStats, StoredRecord,
    FRESHNESS_DAYS,
};
pub use tiered::{Lookup, TieredCache};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// The cache tiers of every entity kind, sharing one storage directory
///
/// Built once at startup and handed to request handling by reference.
#[derive(Debug)]
pub struct CacheOrchestrator {
    data_dir: PathBuf,
    recipes: TieredCache<RecipeSet>,
    ingredients: TieredCache<IngredientSet>,
    details: TieredCache<RecipeDetail>,
}

impl CacheOrchestrator {
    /// Creates the tiers over `data_dir`, keeping memory entries for `ttl`
    ///
    /// The directory is created if missing; failure to do so is only logged,
    /// as later saves retry it.
    pub fn new(data_dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        let data_dir = data_dir.into();
        if let Err(e) = fs::create_dir_all(&data_dir) {
            warn!(dir = %data_dir.display(), error = %e, "could not create data directory");
        }

        Self {
            recipes: TieredCache::new(RecordStore::new(&data_dir), ttl),
            ingredients: TieredCache::new(RecordStore::new(&data_dir), ttl),
            details: TieredCache::new(RecordStore::new(&data_dir), ttl),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Recipe search results keyed by ingredient list
    pub fn recipes(&self) -> &TieredCache<RecipeSet> {
        &self.recipes
    }

    /// Ingredient autocomplete results keyed by query
    pub fn ingredients(&self) -> &TieredCache<IngredientSet> {
        &self.ingredients
    }

    /// Recipe details keyed by recipe id
    pub fn details(&self) -> &TieredCache<RecipeDetail> {
        &self.details
    }
}
