//! Recipe lookups backed by the cache
//!
//! `RecipeService` is the single entry point the front end talks to. Every
//! lookup goes through the matching cache tier and only reaches Spoonacular
//! on a miss.

use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

use crate::cache::{CacheOrchestrator, Lookup, PurgeReport, StorageStats, StoreError};
use crate::config::Config;
use crate::data::{match_count, Ingredient, ProviderError, Recipe, RecipeDetails, SpoonacularClient};

/// Most suggestions returned by recipe autocomplete
pub const MAX_RECIPE_SUGGESTIONS: usize = 8;

/// Errors surfaced to the front end
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Recipe ID is required")]
    MissingRecipeId,

    #[error("Invalid recipe ID '{0}': only letters and digits are allowed")]
    InvalidRecipeId(String),

    #[error("Failed to fetch from Spoonacular: {0}")]
    Provider(#[from] ProviderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Splits a comma separated ingredient list into trimmed, non-empty terms
pub fn parse_terms(ingredients: &str) -> Vec<String> {
    ingredients
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cached access to recipes and ingredients
#[derive(Debug)]
pub struct RecipeService {
    cache: CacheOrchestrator,
    client: SpoonacularClient,
}

impl RecipeService {
    pub fn new(cache: CacheOrchestrator, client: SpoonacularClient) -> Self {
        Self { cache, client }
    }

    /// Builds the cache and the provider client from `config`
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let client = SpoonacularClient::new(config.api_key.clone(), config.api_timeout)?
            .with_base_url(config.base_url.clone());
        let cache = CacheOrchestrator::new(config.data_dir.clone(), config.cache_ttl);
        Ok(Self::new(cache, client))
    }

    pub fn cache(&self) -> &CacheOrchestrator {
        &self.cache
    }

    /// Recipes using the comma separated `ingredients`, best matches first.
    ///
    /// An empty list returns the popular selection in provider order.
    pub async fn recipes_by_ingredients(&self, ingredients: &str) -> Result<Vec<Recipe>, ServiceError> {
        let terms = parse_terms(ingredients);
        let client = &self.client;

        let mut recipes = self
            .cache
            .recipes()
            .fetch(ingredients, |lookup| async move {
                match lookup {
                    Lookup::Popular => client.random_recipes().await,
                    Lookup::Query(query) => client.find_by_ingredients(&parse_terms(&query)).await,
                }
            })
            .await?;

        if !terms.is_empty() {
            for recipe in &mut recipes {
                recipe.match_count = match_count(&terms, &recipe.ingredients);
            }
            recipes.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        }

        Ok(recipes)
    }

    /// Full details for one recipe
    pub async fn recipe_details(&self, id: &str) -> Result<RecipeDetails, ServiceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::MissingRecipeId);
        }
        // the id becomes a URL path segment
        if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ServiceError::InvalidRecipeId(id.to_string()));
        }
        let client = &self.client;

        let details = self
            .cache
            .details()
            .fetch(id, |_| async move { client.recipe_information(id).await })
            .await?;

        Ok(details)
    }

    /// Ingredient autocomplete; a blank query returns nothing
    pub async fn search_ingredients(&self, query: &str) -> Result<Vec<Ingredient>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let client = &self.client;

        let ingredients = self
            .cache
            .ingredients()
            .fetch(query, |_| async move { client.search_ingredients(query).await })
            .await?;

        Ok(ingredients)
    }

    /// Recipe autocomplete: recipes for `query` whose title contains it
    pub async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let recipes = self.recipes_by_ingredients(query).await?;

        Ok(recipes
            .into_iter()
            .filter(|recipe| recipe.title.to_lowercase().contains(&needle))
            .take(MAX_RECIPE_SUGGESTIONS)
            .collect())
    }

    /// Every recipe in the recipe store, first occurrence of each id
    pub fn stored_recipes(&self) -> Result<Vec<Recipe>, ServiceError> {
        let listing = self.cache.recipes().store().list_all()?;
        if listing.skipped > 0 {
            info!(skipped = listing.skipped, "some stored recipe files were unreadable");
        }

        let mut seen = HashSet::new();
        Ok(listing
            .records
            .into_iter()
            .flat_map(|record| record.data)
            .filter(|recipe| seen.insert(recipe.id.clone()))
            .collect())
    }

    pub fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.cache.stats()?)
    }

    pub fn purge_older_than(&self, days: u32) -> Result<PurgeReport, ServiceError> {
        Ok(self.cache.purge_older_than(days)?)
    }

    /// Rewrites the debug filename mapping, returning its entry count
    pub fn rebuild_filename_mapping(&self) -> Result<usize, ServiceError> {
        Ok(self.cache.rebuild_filename_mapping()?)
    }
}
