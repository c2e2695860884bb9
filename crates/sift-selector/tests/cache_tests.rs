//! Integration tests for the parsed-selector cache.

use std::sync::Arc;
use std::thread;

use sift_selector::{ParserConfig, SelectorCache, SyntaxErrorKind};

#[test]
fn test_get_or_parse_reuses_entries() {
    let cache = SelectorCache::new();
    assert!(cache.is_empty());

    let first = cache.get_or_parse("div > p").unwrap();
    let second = cache.get_or_parse("div > p").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("div > p"));

    // Keys are source strings, not canonical forms.
    let _ = cache.get_or_parse("div>p").unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_errors_are_not_cached() {
    let cache = SelectorCache::new();
    let err = cache.get_or_parse("div:bogus").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnknownPseudoClass);
    assert!(cache.is_empty());
    assert!(!cache.contains("div:bogus"));

    assert!(cache.get_or_parse("div:bogus").is_err());
}

#[test]
fn test_clear_keeps_handed_out_groups() {
    let cache = SelectorCache::new();
    let group = cache.get_or_parse("a, b").unwrap();
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(group.len(), 2);

    let again = cache.get_or_parse("a, b").unwrap();
    assert!(!Arc::ptr_eq(&group, &again));
    assert_eq!(*group, *again);
}

#[test]
fn test_cache_uses_its_config() {
    let cache = SelectorCache::with_config(ParserConfig::new().with_max_nesting_depth(0));
    let err = cache.get_or_parse("a:not(b)").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::NestingTooDeep);
}

#[test]
fn test_concurrent_lookups_share_one_entry() {
    let cache = Arc::new(SelectorCache::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get_or_parse("ul li:nth-child(odd)").unwrap())
        })
        .collect();

    let groups: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(cache.len(), 1);
    for group in &groups[1..] {
        assert!(Arc::ptr_eq(&groups[0], group));
    }
}
