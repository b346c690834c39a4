//! Exact byte pattern search.
//!
//! Searches are read-only and keep no state between calls; see
//! [`pattern_search`] for the algorithms and their selection rules.

pub mod pattern_search;

pub use pattern_search::{
    contains_pattern, find_all_patterns, find_pattern, find_pattern_or_else, PatternSearcher,
    SearchAlgorithm,
};
