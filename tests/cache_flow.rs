//! Integration tests for the cache tiers through the public library API

use recipe_finder::cache::{CacheOrchestrator, EntityKind, Lookup, RecipeSet, StoredRecord};
use recipe_finder::data::{Ingredient, Recipe};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const TTL: Duration = Duration::from_secs(60 * 60);

fn omelette() -> Vec<Recipe> {
    vec![Recipe {
        id: "1".to_string(),
        title: "Omelette".to_string(),
        ingredients: vec!["eggs".to_string(), "milk".to_string()],
        ..Default::default()
    }]
}

#[tokio::test]
async fn test_records_survive_a_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    {
        let cache = CacheOrchestrator::new(temp_dir.path(), TTL);
        let result: Result<_, String> = cache
            .recipes()
            .fetch("eggs,milk", |_| async { Ok(omelette()) })
            .await;
        assert_eq!(result, Ok(omelette()));
    }

    // a new orchestrator has an empty memory tier but the same directory
    let cache = CacheOrchestrator::new(temp_dir.path(), TTL);
    let result = cache
        .recipes()
        .fetch("milk, eggs", |_| async {
            Err::<Vec<Recipe>, _>("provider should not be called".to_string())
        })
        .await;

    assert_eq!(result, Ok(omelette()));
}

#[tokio::test]
async fn test_each_kind_writes_its_own_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache = CacheOrchestrator::new(temp_dir.path(), TTL);

    let recipes: Result<_, String> = cache
        .recipes()
        .fetch("", |lookup| async move {
            assert_eq!(lookup, Lookup::Popular);
            Ok(omelette())
        })
        .await;
    assert!(recipes.is_ok());

    let ingredients: Result<_, String> = cache
        .ingredients()
        .fetch("tom", |_| async {
            Ok(vec![Ingredient {
                id: 11529,
                name: "tomato".to_string(),
                image: String::new(),
            }])
        })
        .await;
    assert!(ingredients.is_ok());

    let mut names: Vec<String> = fs::read_dir(temp_dir.path())
        .expect("Should list dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    assert_eq!(names.len(), 2);
    assert!(names.contains(&"popular_recipes.json".to_string()));
    assert!(names.iter().any(|name| name.starts_with("ingredients_")));

    let stats = cache.stats().expect("Stats should succeed");
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.search_queries, vec!["popular", "tom"]);
}

#[tokio::test]
async fn test_record_file_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache = CacheOrchestrator::new(temp_dir.path(), TTL);

    let _: Result<_, String> = cache
        .recipes()
        .fetch("Milk,Eggs", |_| async { Ok(omelette()) })
        .await;

    let path = temp_dir.path().join(RecipeSet::filename("eggs,milk"));
    let content = fs::read_to_string(&path).expect("Record file should exist");
    let json: serde_json::Value = serde_json::from_str(&content).expect("Record should be JSON");

    assert_eq!(json["searchQuery"], "Milk,Eggs");
    assert_eq!(json["normalizedQuery"], "eggs,milk");
    assert_eq!(json["source"], "spoonacular");
    assert_eq!(json["data"][0]["title"], "Omelette");

    let record: StoredRecord<Vec<Recipe>> =
        serde_json::from_str(&content).expect("Record should parse");
    assert_eq!(record.filename, RecipeSet::filename("eggs,milk"));
}

#[tokio::test]
async fn test_purge_then_refetch() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache = CacheOrchestrator::new(temp_dir.path(), TTL);

    let _: Result<_, String> = cache
        .recipes()
        .fetch("eggs", |_| async { Ok(omelette()) })
        .await;

    // nothing is older than a day yet
    let report = cache.purge_older_than(1).expect("Purge should succeed");
    assert_eq!(report.removed, 0);
    assert_eq!(cache.rebuild_filename_mapping().expect("Mapping should succeed"), 1);
}
