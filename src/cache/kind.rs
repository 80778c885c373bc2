//! Entity kinds stored by the cache tiers
//!
//! Each kind fixes its payload type, its filename and memory-key prefixes and
//! the source tag written into stored records. All kinds share one flat
//! storage directory.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use super::key::{hashed_filename, normalize, short_hash};
use crate::data::{Ingredient, Recipe, RecipeDetails};

/// A family of cacheable values with its own naming scheme
pub trait EntityKind: Send + Sync + 'static {
    /// The value cached for one query
    type Payload: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// Short name used in logs and stats
    const LABEL: &'static str;
    /// Prefix of persistent filenames
    const FILE_PREFIX: &'static str;
    /// Prefix of raw memory cache keys
    const MEMORY_PREFIX: &'static str;
    /// Source tag written into stored records
    const SOURCE: &'static str;
    /// Fixed filename for the empty query, if the kind has a popular bucket
    const POPULAR_FILENAME: Option<&'static str> = None;

    /// Canonical form of a query for this kind
    fn normalize(query: &str) -> String {
        normalize(query)
    }

    /// Filename holding the record for an already normalized query
    fn filename(normalized: &str) -> String {
        match Self::POPULAR_FILENAME {
            Some(popular) if normalized.is_empty() => popular.to_string(),
            _ => hashed_filename(Self::FILE_PREFIX, normalized),
        }
    }

    /// Whether a file in the storage directory belongs to this kind
    fn owns_file(name: &str) -> bool {
        if Self::POPULAR_FILENAME == Some(name) {
            return true;
        }
        name.strip_suffix(".json")
            .and_then(|stem| stem.strip_prefix(Self::FILE_PREFIX))
            .is_some_and(|rest| rest.starts_with('_'))
    }

    /// Number of individual items in a payload, for stats
    fn item_count(payload: &Self::Payload) -> usize;

    /// Whether the empty query maps to the popular bucket
    fn has_popular_bucket() -> bool {
        Self::POPULAR_FILENAME.is_some()
    }
}

/// Recipe search results for one ingredient set
#[derive(Debug, Clone, Copy)]
pub struct RecipeSet;

impl EntityKind for RecipeSet {
    type Payload = Vec<Recipe>;

    const LABEL: &'static str = "recipes";
    const FILE_PREFIX: &'static str = "recipes";
    const MEMORY_PREFIX: &'static str = "search";
    const SOURCE: &'static str = "spoonacular";
    const POPULAR_FILENAME: Option<&'static str> = Some("popular_recipes.json");

    fn item_count(payload: &Self::Payload) -> usize {
        payload.len()
    }
}

/// Ingredient autocomplete results for one query
#[derive(Debug, Clone, Copy)]
pub struct IngredientSet;

impl EntityKind for IngredientSet {
    type Payload = Vec<Ingredient>;

    const LABEL: &'static str = "ingredients";
    const FILE_PREFIX: &'static str = "ingredients";
    const MEMORY_PREFIX: &'static str = "ingredients";
    const SOURCE: &'static str = "spoonacular";

    fn item_count(payload: &Self::Payload) -> usize {
        payload.len()
    }
}

/// Detail record for a single recipe id
#[derive(Debug, Clone, Copy)]
pub struct RecipeDetail;

impl RecipeDetail {
    /// Marks hashed names so they never meet a verbatim numeric id
    const HASHED_MARKER: char = 'h';

    fn is_numeric_id(id: &str) -> bool {
        !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
    }
}

impl EntityKind for RecipeDetail {
    type Payload = RecipeDetails;

    const LABEL: &'static str = "recipe_details";
    const FILE_PREFIX: &'static str = "recipe_details";
    const MEMORY_PREFIX: &'static str = "recipe_details";
    const SOURCE: &'static str = "spoonacular_details";

    /// Recipe ids are opaque: only surrounding whitespace is dropped
    fn normalize(query: &str) -> String {
        query.trim().to_string()
    }

    /// Numeric ids are used verbatim; anything else is hashed under its own marker
    fn filename(normalized: &str) -> String {
        if Self::is_numeric_id(normalized) {
            format!("{}_{}.json", Self::FILE_PREFIX, normalized)
        } else {
            format!(
                "{}_{}{}.json",
                Self::FILE_PREFIX,
                Self::HASHED_MARKER,
                short_hash(normalized)
            )
        }
    }

    fn item_count(_payload: &Self::Payload) -> usize {
        1
    }
}
