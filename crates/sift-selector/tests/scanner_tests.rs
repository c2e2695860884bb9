//! Integration tests for the selector scanner.

use sift_selector::scanner::{ScanState, Scanner};
use sift_selector::{Combinator, SyntaxErrorKind, parse_compound, scan, scan_group};

#[test]
fn test_chunks_carry_offsets_and_combinators() {
    let chunks = scan("div.a > b[title=\"x > y\"]  c:not(d e)").unwrap();
    let summary: Vec<_> = chunks
        .iter()
        .map(|chunk| (chunk.text.as_str(), chunk.offset, chunk.leading))
        .collect();
    assert_eq!(
        summary,
        [
            ("div.a", 0, None),
            ("b[title=\"x > y\"]", 8, Some(Combinator::Child)),
            ("c:not(d e)", 26, Some(Combinator::Descendant)),
        ]
    );
    assert_eq!(chunks[0].end(), 5);
}

#[test]
fn test_chunk_feeds_compound_parser() {
    let chunks = scan("ul > li.item:first-child").unwrap();
    let compound = parse_compound(&chunks[1]).unwrap();
    assert_eq!(compound.element, "li");
    assert_eq!(compound.simple_selectors.len(), 2);
}

#[test]
fn test_compound_errors_point_into_the_input() {
    let chunks = scan("ul > li ^").unwrap();
    let err = parse_compound(&chunks[2]).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter);
    assert_eq!(err.position, Some(8));
}

#[test]
fn test_group_members_restart_combinators() {
    let group = scan_group("a b, > c").unwrap_err();
    assert_eq!(group.kind, SyntaxErrorKind::DanglingCombinator);

    let group = scan_group("a b, c d").unwrap();
    assert_eq!(group[1][0].leading, None);
    assert_eq!(group[1][1].leading, Some(Combinator::Descendant));
}

#[test]
fn test_initial_state_is_normal() {
    assert_eq!(Scanner::new("a").state(), ScanState::Normal);
    assert_eq!(Scanner::for_group("a, b").run().unwrap().len(), 2);
}

#[test]
fn test_unicode_offsets_are_characters() {
    let chunks = scan("été > ü").unwrap();
    assert_eq!(chunks[1].offset, 6);
    assert_eq!(chunks[0].end(), 3);
}
