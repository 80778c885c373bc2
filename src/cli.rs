//! Command-line interface parsing for recipe-finder
//!
//! This module handles parsing of CLI arguments using clap and running the
//! selected command against a `RecipeService`. Results are rendered as
//! pretty-printed JSON.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::service::{parse_terms, RecipeService, ServiceError};

/// Default age in days for `purge`
pub const DEFAULT_PURGE_DAYS: u32 = 30;

/// Error types for running a CLI command
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The result could not be rendered as JSON
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Recipe Finder - find recipes by ingredients, with cached Spoonacular lookups
#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Find recipes by the ingredients you have, backed by a local cache")]
#[command(version)]
pub struct Cli {
    /// Directory holding cached JSON records (overrides RECIPE_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Recipes using a comma separated ingredient list; no list shows popular recipes
    ///
    /// Examples:
    ///   recipe-finder recipes "eggs, milk, flour"
    ///   recipe-finder recipes
    Recipes {
        #[arg(default_value = "")]
        ingredients: String,
    },

    /// Full details of one recipe
    Details { id: String },

    /// Ingredient name suggestions
    Ingredients { query: String },

    /// Recipe title suggestions
    Search { query: String },

    /// Every recipe currently stored on disk
    Stored,

    /// Storage statistics
    Stats,

    /// Delete stored records older than the given age
    Purge {
        #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_PURGE_DAYS)]
        older_than_days: u32,
    },

    /// Rewrite the debug filename mapping
    Mapping,
}

impl Cli {
    /// Reads configuration from the environment and applies CLI overrides
    pub fn config(&self) -> Result<Config, CliError> {
        let mut config = Config::from_env()?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

impl Command {
    /// Runs the command and returns its JSON output
    pub async fn execute(&self, service: &RecipeService) -> Result<String, CliError> {
        match self {
            Command::Recipes { ingredients } => {
                let recipes = service.recipes_by_ingredients(ingredients).await?;
                render(&json!({
                    "recipes": recipes,
                    "total": recipes.len(),
                    "ingredients": parse_terms(ingredients),
                }))
            }
            Command::Details { id } => render(&service.recipe_details(id).await?),
            Command::Ingredients { query } => {
                let ingredients = service.search_ingredients(query).await?;
                render(&json!({
                    "ingredients": ingredients,
                    "query": query,
                    "total": ingredients.len(),
                }))
            }
            Command::Search { query } => {
                let recipes = service.search_recipes(query).await?;
                render(&json!({
                    "recipes": recipes,
                    "query": query,
                    "total": recipes.len(),
                }))
            }
            Command::Stored => {
                let recipes = service.stored_recipes()?;
                render(&json!({ "recipes": recipes, "total": recipes.len() }))
            }
            Command::Stats => render(&service.stats()?),
            Command::Purge { older_than_days } => render(&service.purge_older_than(*older_than_days)?),
            Command::Mapping => {
                let entries = service.rebuild_filename_mapping()?;
                render(&json!({ "status": "success", "entries": entries }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_recipes_with_list() {
        let cli = Cli::parse_from(["recipe-finder", "recipes", "eggs, milk"]);
        assert_eq!(
            cli.command,
            Command::Recipes {
                ingredients: "eggs, milk".to_string()
            }
        );
        assert!(cli.data_dir.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_recipes_without_list() {
        let cli = Cli::parse_from(["recipe-finder", "recipes"]);
        assert_eq!(
            cli.command,
            Command::Recipes {
                ingredients: String::new()
            }
        );
    }

    #[test]
    fn test_cli_parse_purge_default() {
        let cli = Cli::parse_from(["recipe-finder", "purge"]);
        assert_eq!(cli.command, Command::Purge { older_than_days: 30 });
    }

    #[test]
    fn test_cli_parse_purge_with_days() {
        let cli = Cli::parse_from(["recipe-finder", "purge", "--older-than-days", "7"]);
        assert_eq!(cli.command, Command::Purge { older_than_days: 7 });
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["recipe-finder", "stats", "--data-dir", "/tmp/cache", "-v"]);
        assert_eq!(cli.command, Command::Stats);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cache")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_details_requires_id() {
        assert!(Cli::try_parse_from(["recipe-finder", "details"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["recipe-finder"]).is_err());
    }
}
