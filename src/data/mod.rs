//! Core data models for the recipe finder
//!
//! These are the internal shapes handed to the cache tiers and printed by the
//! command-line front end. The Spoonacular wire types live in
//! [`spoonacular`] and are converted into these before caching.

pub mod spoonacular;

pub use spoonacular::{ProviderError, SpoonacularClient};

use serde::{Deserialize, Serialize};

/// A recipe summary as returned by ingredient searches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ingredient names used by the recipe
    pub ingredients: Vec<String>,
    /// Human-readable preparation time, e.g. "15 min"
    pub prep_time: String,
    /// Human-readable cooking time, e.g. "30 min"
    pub cook_time: String,
    pub servings: u32,
    pub image_url: String,
    /// How many of the user's ingredients this recipe uses
    pub match_count: usize,
}

/// An ingredient suggestion from the autocomplete search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Absolute URL of the 100x100 ingredient image
    pub image: String,
}

/// Full recipe information for the detail view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: String,
    pub title: String,
    /// Summary cut down for list display
    pub description: String,
    /// Full summary with markup removed
    pub summary: String,
    pub ingredients: Vec<DetailedIngredient>,
    pub instructions: Vec<Instruction>,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: u32,
    pub image_url: String,
    pub source_url: String,
    pub spoonacular_url: String,
    pub health_score: f64,
    pub price_per_serving: f64,
    pub cuisines: Vec<String>,
    pub dish_types: Vec<String>,
    pub diets: Vec<String>,
    pub occasions: Vec<String>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_very_healthy: bool,
    pub is_cheap: bool,
    pub is_popular: bool,
    pub is_sustainable: bool,
}

/// An ingredient line of a recipe, with its measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedIngredient {
    pub id: i64,
    pub name: String,
    pub original_name: String,
    pub amount: f64,
    pub unit: String,
    pub unit_long: String,
    /// The ingredient line as written in the source recipe
    pub original: String,
    pub aisle: String,
    pub image: String,
    pub meta: Vec<String>,
}

/// A single numbered cooking step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub number: u32,
    pub step: String,
}

/// Counts how many user terms appear among the candidate terms.
///
/// Comparison is case-insensitive and ignores surrounding whitespace. Each
/// user term contributes at most one, however many candidates it matches.
///
/// # Examples
/// ```
/// use recipe_finder::data::match_count;
///
/// assert_eq!(match_count(&["Egg", "Milk "], &["egg", "flour"]), 1);
/// ```
pub fn match_count<U, C>(user_terms: &[U], candidate_terms: &[C]) -> usize
where
    U: AsRef<str>,
    C: AsRef<str>,
{
    let candidates: Vec<String> = candidate_terms
        .iter()
        .map(|candidate| candidate.as_ref().trim().to_lowercase())
        .collect();

    user_terms
        .iter()
        .map(|user| user.as_ref().trim().to_lowercase())
        .filter(|user| candidates.contains(user))
        .count()
}
