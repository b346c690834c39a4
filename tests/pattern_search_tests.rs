//! Integration tests for exact byte pattern search

use bulkbytes::string::{PatternSearcher, SearchAlgorithm};
use bulkbytes::{find_pattern, find_pattern_or_else, BufferView, Capabilities};
use proptest::prelude::*;

const ALGORITHMS: [SearchAlgorithm; 3] =
    [SearchAlgorithm::Naive, SearchAlgorithm::Bndm, SearchAlgorithm::BoyerMoore];

/// Straightforward reference: first window equal to the needle
fn reference_search(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if start > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(start);
    }
    haystack[start..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + start)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_find_pattern_basic() {
    init_logging();
    assert_eq!(find_pattern(b"hello world", b"world", 0), Some(6));
    assert_eq!(find_pattern(b"hello world", b"o", 5), Some(7));
    assert_eq!(find_pattern(b"hello world", b"xyz", 0), None);
    assert_eq!(find_pattern(b"hello", b"", 2), Some(2));
}

#[test]
fn test_boundary_examples() {
    assert_eq!(find_pattern(&[0x61, 0x62, 0x63, 0x62, 0x63], &[0x62, 0x63], 0), Some(1));
    assert_eq!(find_pattern(&[0x61, 0x62], &[0x61, 0x62, 0x63], 0), None);
}

#[test]
fn test_needle_longer_than_haystack() {
    let searcher = PatternSearcher::new();
    for algorithm in ALGORITHMS {
        assert_eq!(searcher.search_with(algorithm, b"ab", b"abc", 0), None);
        assert_eq!(searcher.search_with(algorithm, b"", b"a", 0), None);
    }
}

#[test]
fn test_binary_haystack() {
    let mut haystack = vec![0u8; 4096];
    haystack[4000..4004].copy_from_slice(&[0x00, 0xFF, 0x00, 0xFF]);
    assert_eq!(find_pattern(&haystack, &[0x00, 0xFF, 0x00, 0xFF], 0), Some(4000));
    assert_eq!(find_pattern(&haystack, &[0xFF, 0xFF], 0), None);
}

#[test]
fn test_repetitive_input_long_needle() {
    init_logging();
    let haystack = [b"ab".repeat(200), b"abb".to_vec(), b"ab".repeat(50)].concat();
    let needle = [b"ab".repeat(40), b"abb".to_vec()].concat();
    let expected = reference_search(&haystack, &needle, 0);
    assert_eq!(expected, Some(320));
    let searcher = PatternSearcher::new();
    for algorithm in ALGORITHMS {
        assert_eq!(searcher.search_with(algorithm, &haystack, &needle, 0), expected, "{}", algorithm);
    }
}

#[test]
fn test_portable_capabilities_use_naive() {
    let searcher = PatternSearcher::new().with_capabilities(Capabilities::portable());
    assert_eq!(searcher.select_algorithm(8), SearchAlgorithm::Naive);
    assert_eq!(searcher.search(b"the quick brown fox", b"brown", 0), Some(10));
}

#[test]
fn test_view_relative_offsets() {
    let data = b"0123456789";
    let view = BufferView::new(data, 3, 5).unwrap();
    let searcher = PatternSearcher::new();
    assert_eq!(searcher.search_view(view, b"56", 0), Some(2));
    assert_eq!(searcher.search_view(view, b"89", 0), None);
}

#[test]
fn test_custom_not_found_handler() {
    let primary = b"GATTACA";
    let result = find_pattern_or_else(primary, b"TTT", 0, || find_pattern(primary, b"TT", 0));
    assert_eq!(result, Some(2));
    assert_eq!(find_pattern_or_else(primary, b"XYZ", 0, || None), None);
}

proptest! {
    #[test]
    fn prop_algorithms_agree(
        haystack in proptest::collection::vec(0u8..4, 0..300),
        needle in proptest::collection::vec(0u8..4, 0..80),
        start in 0usize..320,
    ) {
        let expected = reference_search(&haystack, &needle, start);
        let searcher = PatternSearcher::new();
        for algorithm in ALGORITHMS {
            prop_assert_eq!(searcher.search_with(algorithm, &haystack, &needle, start), expected);
        }
        prop_assert_eq!(searcher.search(&haystack, &needle, start), expected);
    }

    #[test]
    fn prop_embedded_needle_is_found(
        prefix in proptest::collection::vec(any::<u8>(), 0..200),
        needle in proptest::collection::vec(any::<u8>(), 1..100),
        suffix in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let haystack = [prefix.clone(), needle.clone(), suffix].concat();
        let searcher = PatternSearcher::new();
        for algorithm in ALGORITHMS {
            let found = searcher.search_with(algorithm, &haystack, &needle, 0);
            prop_assert!(found.is_some());
            let pos = found.unwrap();
            prop_assert!(pos <= prefix.len());
            prop_assert_eq!(&haystack[pos..pos + needle.len()], needle.as_slice());
        }
    }

    #[test]
    fn prop_empty_needle_matches_at_start(
        haystack in proptest::collection::vec(any::<u8>(), 0..64),
        start in 0usize..64,
    ) {
        prop_assume!(start <= haystack.len());
        prop_assert_eq!(find_pattern(&haystack, &[], start), Some(start));
    }
}
