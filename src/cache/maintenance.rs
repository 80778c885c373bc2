//! Storage statistics and cleanup across all entity kinds

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use tracing::info;

use super::store::{MappingEntry, PurgeReport, StoreError, StoreStats};
use super::CacheOrchestrator;

/// Name of the debug file listing which query each record file holds
pub const MAPPING_FILENAME: &str = "filename_mapping.json";

/// Totals over every kind, plus the per-kind breakdown
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_files: usize,
    pub total_records: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
    pub search_queries: Vec<String>,
    /// Files that could not be read or parsed
    pub skipped_files: usize,
    pub recipes: StoreStats,
    pub ingredients: StoreStats,
    pub recipe_details: StoreStats,
}

impl StorageStats {
    fn from_kinds(recipes: StoreStats, ingredients: StoreStats, recipe_details: StoreStats) -> Self {
        let kinds = [&recipes, &ingredients, &recipe_details];

        let oldest_entry = kinds.iter().filter_map(|s| s.oldest_entry).min();
        let newest_entry = kinds.iter().filter_map(|s| s.newest_entry).max();
        let search_queries: BTreeSet<String> = kinds
            .iter()
            .flat_map(|s| s.search_queries.iter().cloned())
            .collect();

        Self {
            total_files: kinds.iter().map(|s| s.file_count).sum(),
            total_records: kinds.iter().map(|s| s.record_count).sum(),
            oldest_entry,
            newest_entry,
            search_queries: search_queries.into_iter().collect(),
            skipped_files: kinds.iter().map(|s| s.skipped_files).sum(),
            recipes,
            ingredients,
            recipe_details,
        }
    }
}

impl CacheOrchestrator {
    /// Scans the storage directory and summarizes every record file
    pub fn stats(&self) -> Result<StorageStats, StoreError> {
        Ok(StorageStats::from_kinds(
            self.recipes().store().stats()?,
            self.ingredients().store().stats()?,
            self.details().store().stats()?,
        ))
    }

    /// Deletes records of every kind last updated more than `days` days ago
    pub fn purge_older_than(&self, days: u32) -> Result<PurgeReport, StoreError> {
        let mut report = self.recipes().store().purge_older_than(days)?;
        report.merge(self.ingredients().store().purge_older_than(days)?);
        report.merge(self.details().store().purge_older_than(days)?);

        if report.removed > 0 {
            info!(removed = report.removed, days, "cleaned old data files");
        }
        Ok(report)
    }

    /// Rewrites the debug filename mapping and returns its number of entries
    pub fn rebuild_filename_mapping(&self) -> Result<usize, StoreError> {
        let mut mapping: BTreeMap<String, MappingEntry> = BTreeMap::new();
        mapping.extend(self.recipes().store().mapping_entries()?);
        mapping.extend(self.ingredients().store().mapping_entries()?);
        mapping.extend(self.details().store().mapping_entries()?);

        let json = serde_json::to_string_pretty(&mapping).map_err(|source| StoreError::Serialize {
            filename: MAPPING_FILENAME.to_string(),
            source,
        })?;

        fs::create_dir_all(self.data_dir()).map_err(|source| StoreError::Io {
            path: self.data_dir().to_path_buf(),
            source,
        })?;
        let path = self.data_dir().join(MAPPING_FILENAME);
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })?;

        info!(entries = mapping.len(), "created filename mapping");
        Ok(mapping.len())
    }
}
