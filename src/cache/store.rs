//! Persistent JSON record store
//!
//! Provides a `RecordStore` that keeps one JSON file per normalized query in a
//! flat directory, with the filename derived from the query. Records older
//! than the freshness window are reported as missing so that callers refetch.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::kind::EntityKind;

/// Number of days a stored record is served before it is refetched
pub const FRESHNESS_DAYS: i64 = 7;

/// Label used in stats for the query of the popular bucket
const POPULAR_QUERY_LABEL: &str = "popular";

/// Errors raised by the persistent store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or listing a path failed
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record or mapping could not be encoded as JSON
    #[error("Failed to serialize {filename}: {source}")]
    Serialize {
        filename: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// On-disk representation of all results for one normalized query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord<T> {
    /// When the record was written
    pub last_updated: DateTime<Utc>,
    /// The query as the caller gave it
    pub search_query: String,
    /// The canonical query the filename is derived from
    pub normalized_query: String,
    /// Where the data came from
    pub source: String,
    /// Name of the file holding this record
    pub filename: String,
    /// The cached payload
    pub data: T,
}

/// Records of one kind found by a directory scan
#[derive(Debug)]
pub struct Listing<T> {
    pub records: Vec<StoredRecord<T>>,
    /// Files that matched the naming convention but could not be read or parsed
    pub skipped: usize,
}

/// Outcome of an age-based purge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeReport {
    pub removed: usize,
    pub skipped: usize,
}

impl PurgeReport {
    /// Adds another report's counts to this one
    pub fn merge(&mut self, other: PurgeReport) {
        self.removed += other.removed;
        self.skipped += other.skipped;
    }
}

/// Summary of the records of one kind
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Files matching the kind's naming convention, unparseable ones included
    pub file_count: usize,
    /// Items across all parsed records
    pub record_count: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
    /// Distinct original queries, sorted
    pub search_queries: Vec<String>,
    /// Files that could not be read or parsed
    pub skipped_files: usize,
}

/// One line of the debug filename mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub search_query: String,
    pub normalized_query: String,
    pub record_count: usize,
    pub last_updated: DateTime<Utc>,
}

/// Parsed files of one scan, keyed by filename
struct Scan<T> {
    files: Vec<(PathBuf, String, StoredRecord<T>)>,
    matched: usize,
    skipped: usize,
}

/// Reads and writes records of one entity kind
///
/// All operations on one store are serialized by a single reader/writer lock:
/// loads and scans share it, saves and purges hold it exclusively. There is no
/// locking across processes.
#[derive(Debug)]
pub struct RecordStore<K: EntityKind> {
    /// Directory where record files are stored
    dir: PathBuf,
    /// Maximum age of a record that is still served
    freshness: Duration,
    lock: RwLock<()>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: EntityKind> RecordStore<K> {
    /// Creates a store over `dir` with the default seven day freshness window
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            freshness: Duration::days(FRESHNESS_DAYS),
            lock: RwLock::new(()),
            _kind: PhantomData,
        }
    }

    /// Overrides the freshness window
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Directory holding the record files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that holds the record for `query`
    pub fn path_for(&self, query: &str) -> PathBuf {
        self.dir.join(K::filename(&K::normalize(query)))
    }

    /// Ensures the storage directory exists
    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }

    /// Saves `data` as the record for `query`, replacing any earlier file
    pub fn save(&self, query: &str, data: &K::Payload) -> Result<(), StoreError> {
        let normalized = K::normalize(query);
        let filename = K::filename(&normalized);
        let record = StoredRecord {
            last_updated: Utc::now(),
            search_query: query.to_string(),
            normalized_query: normalized,
            source: K::SOURCE.to_string(),
            filename,
            data,
        };

        self.write_record(&record)?;
        info!(
            kind = K::LABEL,
            file = %record.filename,
            items = K::item_count(data),
            query,
            "saved record"
        );
        Ok(())
    }

    /// Writes a complete record to the file named in it
    pub(crate) fn write_record<T: Serialize>(&self, record: &StoredRecord<T>) -> Result<(), StoreError> {
        let _guard = self.lock.write();
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(record).map_err(|source| StoreError::Serialize {
            filename: record.filename.clone(),
            source,
        })?;

        let path = self.dir.join(&record.filename);
        fs::write(&path, json).map_err(|e| StoreError::io(&path, e))
    }

    /// Loads the payload stored for `query`
    ///
    /// Returns `Ok(None)` when the file is missing, cannot be parsed, holds a
    /// record for a different normalized query or one older than the freshness
    /// window. Other read failures are errors.
    pub fn load(&self, query: &str) -> Result<Option<K::Payload>, StoreError> {
        Ok(self.load_record(query)?.map(|record| record.data))
    }

    /// Loads the full record stored for `query`, under the same rules as `load`
    pub fn load_record(&self, query: &str) -> Result<Option<StoredRecord<K::Payload>>, StoreError> {
        let _guard = self.lock.read();
        let path = self.path_for(query);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(kind = K::LABEL, query, "no stored record");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let record: StoredRecord<K::Payload> = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!(kind = K::LABEL, path = %path.display(), error = %e, "ignoring corrupt record");
                return Ok(None);
            }
        };

        let normalized = K::normalize(query);
        if record.normalized_query != normalized {
            warn!(
                kind = K::LABEL,
                path = %path.display(),
                expected = %normalized,
                found = %record.normalized_query,
                "record belongs to another query, ignoring"
            );
            return Ok(None);
        }

        if !self.is_fresh(&record, Utc::now()) {
            info!(
                kind = K::LABEL,
                query,
                last_updated = %record.last_updated,
                "stored record is stale, will refresh"
            );
            return Ok(None);
        }

        debug!(kind = K::LABEL, file = %record.filename, query, "loaded record");
        Ok(Some(record))
    }

    /// Whether `record` is still within the freshness window at `now`
    pub fn is_fresh<T>(&self, record: &StoredRecord<T>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(record.last_updated) <= self.freshness
    }

    /// Reads every file of this kind; caller holds the lock
    fn scan(&self) -> Result<Scan<K::Payload>, StoreError> {
        let mut scan = Scan {
            files: Vec::new(),
            matched: 0,
            skipped: 0,
        };

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(scan),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !K::owns_file(&name) || !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            scan.matched += 1;

            let path = entry.path();
            let parsed = fs::read_to_string(&path)
                .ok()
                .and_then(|content| serde_json::from_str::<StoredRecord<K::Payload>>(&content).ok());

            match parsed {
                Some(record) => scan.files.push((path, name, record)),
                None => {
                    warn!(kind = K::LABEL, file = %name, "skipping unreadable record");
                    scan.skipped += 1;
                }
            }
        }

        Ok(scan)
    }

    /// Lists every readable record of this kind, stale ones included
    pub fn list_all(&self) -> Result<Listing<K::Payload>, StoreError> {
        let _guard = self.lock.read();
        let scan = self.scan()?;

        Ok(Listing {
            records: scan.files.into_iter().map(|(_, _, record)| record).collect(),
            skipped: scan.skipped,
        })
    }

    /// Deletes records last updated more than `days` days ago
    pub fn purge_older_than(&self, days: u32) -> Result<PurgeReport, StoreError> {
        let _guard = self.lock.write();
        // a cutoff before the earliest representable date cannot match any record
        let Some(cutoff) = Utc::now().checked_sub_signed(Duration::days(i64::from(days))) else {
            debug!(kind = K::LABEL, days, "purge age exceeds the calendar, nothing to remove");
            return Ok(PurgeReport::default());
        };
        let scan = self.scan()?;

        let mut report = PurgeReport {
            removed: 0,
            skipped: scan.skipped,
        };

        for (path, name, record) in scan.files {
            if record.last_updated >= cutoff {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!(kind = K::LABEL, file = %name, "removed old record");
                    report.removed += 1;
                }
                Err(e) => {
                    warn!(kind = K::LABEL, file = %name, error = %e, "could not remove old record");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Summarizes the records of this kind
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let _guard = self.lock.read();
        let scan = self.scan()?;

        let mut stats = StoreStats {
            file_count: scan.matched,
            skipped_files: scan.skipped,
            ..StoreStats::default()
        };
        let mut queries = BTreeSet::new();

        for (_, _, record) in &scan.files {
            stats.record_count += K::item_count(&record.data);
            stats.oldest_entry = Some(match stats.oldest_entry {
                Some(oldest) => oldest.min(record.last_updated),
                None => record.last_updated,
            });
            stats.newest_entry = Some(match stats.newest_entry {
                Some(newest) => newest.max(record.last_updated),
                None => record.last_updated,
            });
            queries.insert(query_label(&record.search_query));
        }

        stats.search_queries = queries.into_iter().collect();
        Ok(stats)
    }

    /// Filename to query associations for every readable record
    pub fn mapping_entries(&self) -> Result<BTreeMap<String, MappingEntry>, StoreError> {
        let _guard = self.lock.read();
        let scan = self.scan()?;

        Ok(scan
            .files
            .into_iter()
            .map(|(_, name, record)| {
                let entry = MappingEntry {
                    search_query: record.search_query,
                    normalized_query: record.normalized_query,
                    record_count: K::item_count(&record.data),
                    last_updated: record.last_updated,
                };
                (name, entry)
            })
            .collect())
    }
}

/// Query shown in stats; the empty query is the popular bucket
fn query_label(query: &str) -> String {
    if query.is_empty() {
        POPULAR_QUERY_LABEL.to_string()
    } else {
        query.to_string()
    }
}
