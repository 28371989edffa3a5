//! Property and scenario tests for index search.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use registryx_core::{
    DocumentRecord, IndexCache, IndexCollection, MAX_RESULTS, PREVIEW_CHARS, QueryEngine,
};
use registryx_test_utils::{collection, hello_world_collection, matching_records, record};

fn arb_record() -> impl Strategy<Value = DocumentRecord> {
    ("[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,40}").prop_map(|(name, text)| DocumentRecord::new(name, text))
}

fn arb_collection() -> impl Strategy<Value = Vec<DocumentRecord>> {
    prop::collection::vec(arb_record(), 0..300)
}

fn expected(records: &[DocumentRecord], query: &str) -> Vec<DocumentRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.text.to_lowercase().contains(&needle) || r.name.to_lowercase().contains(&needle))
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn search_returns_ordered_case_insensitive_subsequence(
        records in arb_collection(),
        query in "[a-zA-Z]{1,3}",
    ) {
        let c = IndexCollection::new(records.clone(), records.len() as u64);
        let engine = QueryEngine::new();

        let lower: Vec<_> = engine.search(&c, Some(&query.to_lowercase())).hits.into_iter().map(|h| h.record).collect();
        let upper: Vec<_> = engine.search(&c, Some(&query.to_uppercase())).hits.into_iter().map(|h| h.record).collect();

        prop_assert_eq!(&lower, &expected(&records, &query));
        prop_assert_eq!(&lower, &upper);
    }

    #[test]
    fn empty_query_never_matches(records in arb_collection()) {
        let c = IndexCollection::new(records, 0);
        let engine = QueryEngine::new();
        prop_assert!(engine.search(&c, Some("")).is_empty());
        prop_assert!(engine.search(&c, None).is_empty());
    }

    #[test]
    fn search_does_not_mutate_cache(records in arb_collection(), query in "[a-z]{0,3}") {
        let cache = IndexCache::new();
        cache.load(records.clone(), 17);
        let _ = QueryEngine::new().search(&cache.current(), Some(&query));
        prop_assert_eq!(&cache.current().items, &records);
        prop_assert_eq!(cache.current().count, 17);
        prop_assert_eq!(cache.generation(), 1);
    }
}

#[test]
fn scenario_world_matches_both_in_order() {
    let results = QueryEngine::new().search(&hello_world_collection(), Some("world"));
    let names: Vec<_> = results.hits.iter().map(|h| h.record.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn scenario_caps_at_first_200() {
    let records = matching_records(250, "x");
    let results = QueryEngine::new().search(&collection(records.clone()), Some("x"));

    assert_eq!(results.len(), 200);
    let returned: Vec<_> = results.hits.into_iter().map(|h| h.record).collect();
    assert_eq!(returned, records[..200].to_vec());
}

#[test]
fn scenario_preview_is_first_800_chars() {
    let text: String = "0123456789".repeat(100);
    let results = QueryEngine::new().search(&collection(vec![record("Long", &text)]), Some("789"));

    assert_eq!(results.hits[0].preview.len(), PREVIEW_CHARS);
    assert_eq!(results.hits[0].preview, text[..800]);
}

#[test]
fn scenario_empty_load_finds_nothing() {
    let cache = IndexCache::new();
    cache.load(Vec::new(), 0);
    assert!(QueryEngine::new().search(&cache.current(), Some("anything")).is_empty());
}
