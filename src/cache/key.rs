//! Cache key derivation
//!
//! Two identity schemes coexist: the raw memory key, which keeps the query
//! string exactly as given, and the normalized key, which is order, case and
//! whitespace insensitive and addresses files on disk.

use sha2::{Digest, Sha256};

/// Delimiter between terms in a query
const TERM_DELIMITER: char = ',';

/// Number of hex characters of the hash kept in a filename
const HASH_PREFIX_LEN: usize = 12;

/// Normalizes a comma separated query into its canonical form.
///
/// Terms are trimmed and lower-cased, empty terms are dropped and the rest are
/// sorted and rejoined with commas. Duplicate terms are kept. An empty query
/// normalizes to the empty string.
///
/// # Examples
/// ```
/// use recipe_finder::cache::normalize;
///
/// assert_eq!(normalize(" Milk, egg "), "egg,milk");
/// assert_eq!(normalize("egg,egg"), "egg,egg");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(query: &str) -> String {
    let mut terms: Vec<String> = query
        .split(TERM_DELIMITER)
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();

    terms.sort();
    terms.join(&TERM_DELIMITER.to_string())
}

/// Builds the memory cache key for a query.
///
/// The query is used verbatim; the prefix keeps different entity kinds apart.
pub fn memory_key(prefix: &str, query: &str) -> String {
    format!("{}_{}", prefix, query)
}

/// Returns the first 12 hex characters of the SHA-256 digest of `normalized`
pub fn short_hash(normalized: &str) -> String {
    let digest = Sha256::digest(normalized.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_PREFIX_LEN);
    encoded
}

/// Builds a content-addressed filename: `<prefix>_<hash12>.json`
pub fn hashed_filename(prefix: &str, normalized: &str) -> String {
    format!("{}_{}.json", prefix, short_hash(normalized))
}
