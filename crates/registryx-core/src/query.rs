//! Substring queries over a cached index collection.
//!
//! Matching is a case-insensitive substring test against each record's
//! `text` and `name`. Results keep collection order; there is no relevance
//! scoring. Only the first [`MAX_RESULTS`] matches are returned, each with a
//! preview cut to [`PREVIEW_CHARS`] characters.

use serde::Serialize;

use crate::document::{DocumentRecord, IndexCollection};

/// Maximum number of hits returned by one search.
pub const MAX_RESULTS: usize = 200;

/// Maximum number of characters of `text` kept in a hit preview.
pub const PREVIEW_CHARS: usize = 800;

/// A matched record and its display preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// The matched record.
    pub record: DocumentRecord,
    /// The first [`PREVIEW_CHARS`] characters of the record text.
    pub preview: String,
}

impl SearchHit {
    fn from_record(record: &DocumentRecord, preview_chars: usize) -> Self {
        Self {
            record: record.clone(),
            preview: truncate_chars(&record.text, preview_chars),
        }
    }

    /// Card subtitle for this hit.
    #[must_use]
    pub fn meta_line(&self) -> String {
        self.record.meta_line()
    }
}

/// The outcome of one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    /// The query as given.
    pub query: String,
    /// Hits in collection order, at most the engine's result cap.
    pub hits: Vec<SearchHit>,
    /// Number of matching records before truncation.
    pub total_matches: usize,
}

impl SearchResults {
    /// Returns true when nothing matched (or the query was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of hits returned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true when matches were dropped by the result cap.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.total_matches > self.hits.len()
    }
}

/// Answers substring queries against an index collection.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    max_results: usize,
    preview_chars: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            preview_chars: PREVIEW_CHARS,
        }
    }
}

impl QueryEngine {
    /// Creates an engine with the standard caps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `collection` for `query`.
    ///
    /// An absent or empty query yields empty results without scanning.
    #[must_use]
    pub fn search(&self, collection: &IndexCollection, query: Option<&str>) -> SearchResults {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return SearchResults::default();
        };

        let needle = query.to_lowercase();
        let mut hits = Vec::new();
        let mut total_matches = 0;

        for record in collection.items.iter().filter(|r| matches(r, &needle)) {
            total_matches += 1;
            if hits.len() < self.max_results {
                hits.push(SearchHit::from_record(record, self.preview_chars));
            }
        }

        tracing::debug!(
            query,
            scanned = collection.len(),
            total_matches,
            returned = hits.len(),
            "index search"
        );

        SearchResults {
            query: query.to_string(),
            hits,
            total_matches,
        }
    }
}

fn matches(record: &DocumentRecord, needle: &str) -> bool {
    record.text.to_lowercase().contains(needle) || record.name.to_lowercase().contains(needle)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
