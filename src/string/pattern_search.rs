//! # Exact Byte Pattern Search
//!
//! Finds the first occurrence of a needle in a haystack at or after a start
//! offset. Three interchangeable algorithms are provided and must agree on
//! every input:
//!
//! - **Naive**: compare at every candidate position, stop at the first mismatch.
//! - **BNDM** (Backward Nondeterministic DAWG Matching): bit-parallel factor
//!   recognition for needles no longer than a machine word (32 or 64 bytes).
//! - **Boyer–Moore** with an exact bad-character table for longer needles.
//!
//! `Auto` selection is driven by needle length only. Targets without cheap
//! word-level bit manipulation always use the naive scan.
//!
//! Offsets returned are relative to the start of the haystack view. A needle
//! of length zero matches at the start offset.

use crate::config::{BulkOpsConfig, Config};
use crate::error::{BulkError, Result};
use crate::memory::view::BufferView;
use crate::system::{get_capabilities, Capabilities};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Substring search algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    /// Select by needle length and target capabilities
    #[default]
    Auto,
    /// Byte-by-byte comparison at every position
    Naive,
    /// Bit-parallel BNDM (needles up to the machine word width)
    Bndm,
    /// Boyer–Moore with the bad-character rule
    BoyerMoore,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Naive => "naive",
            Self::Bndm => "bndm",
            Self::BoyerMoore => "boyer_moore",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchAlgorithm {
    type Err = BulkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "naive" => Ok(Self::Naive),
            "bndm" => Ok(Self::Bndm),
            "boyer_moore" | "boyer-moore" | "bm" => Ok(Self::BoyerMoore),
            other => Err(BulkError::configuration(format!("Unknown search algorithm: {}", other))),
        }
    }
}

/// Substring search engine
#[derive(Debug, Clone, Copy)]
pub struct PatternSearcher {
    capabilities: Capabilities,
    algorithm: SearchAlgorithm,
}

impl PatternSearcher {
    /// Searcher with automatic algorithm selection
    pub fn new() -> Self {
        Self {
            capabilities: *get_capabilities(),
            algorithm: SearchAlgorithm::Auto,
        }
    }

    /// Searcher using the algorithm preference from `config`
    pub fn with_config(config: &BulkOpsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            capabilities: *get_capabilities(),
            algorithm: config.search_algorithm,
        })
    }

    /// Replace the capability descriptor
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Configured algorithm preference
    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    /// Algorithm that will run for a needle of `needle_len` bytes
    pub fn select_algorithm(&self, needle_len: usize) -> SearchAlgorithm {
        self.resolve(self.algorithm, needle_len)
    }

    fn resolve(&self, requested: SearchAlgorithm, needle_len: usize) -> SearchAlgorithm {
        let word_bits = self.capabilities.bndm_word_bits();
        match requested {
            SearchAlgorithm::Auto if !self.capabilities.has_bit_tricks => SearchAlgorithm::Naive,
            SearchAlgorithm::Auto if needle_len <= word_bits => SearchAlgorithm::Bndm,
            SearchAlgorithm::Auto => SearchAlgorithm::BoyerMoore,
            SearchAlgorithm::Bndm if needle_len > word_bits => {
                log::trace!(
                    "needle of {} bytes exceeds the {}-bit BNDM word, using Boyer-Moore",
                    needle_len,
                    word_bits
                );
                SearchAlgorithm::BoyerMoore
            }
            explicit => explicit,
        }
    }

    /// First occurrence of `needle` in `haystack` at or after `start`
    pub fn search(&self, haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
        self.search_with(self.algorithm, haystack, needle, start)
    }

    /// First occurrence of `needle` inside a view, relative to the view start
    pub fn search_view(&self, haystack: BufferView<'_>, needle: &[u8], start: usize) -> Option<usize> {
        self.search(haystack.as_slice(), needle, start)
    }

    /// Search with possibly absent inputs.
    ///
    /// An absent haystack or needle is an `InvalidArgument`; a missing match is `Ok(None)`.
    pub fn search_opt(&self, haystack: Option<&[u8]>, needle: Option<&[u8]>, start: usize) -> Result<Option<usize>> {
        let haystack = haystack.ok_or_else(|| BulkError::invalid_argument("haystack is absent"))?;
        let needle = needle.ok_or_else(|| BulkError::invalid_argument("needle is absent"))?;
        Ok(self.search(haystack, needle, start))
    }

    /// Search using a specific algorithm.
    ///
    /// `Bndm` falls back to Boyer–Moore for needles wider than the machine word.
    pub fn search_with(
        &self,
        algorithm: SearchAlgorithm,
        haystack: &[u8],
        needle: &[u8],
        start: usize,
    ) -> Option<usize> {
        if start > haystack.len() {
            return None;
        }
        if needle.is_empty() {
            return Some(start);
        }
        if haystack.len() - start < needle.len() {
            return None;
        }

        match self.resolve(algorithm, needle.len()) {
            SearchAlgorithm::Naive | SearchAlgorithm::Auto => naive_search(haystack, needle, start),
            SearchAlgorithm::Bndm => bndm_search(haystack, needle, start),
            SearchAlgorithm::BoyerMoore => boyer_moore_search(haystack, needle, start),
        }
    }

    /// Every non-overlapping occurrence of `needle`, left to right.
    ///
    /// An empty needle yields no matches.
    pub fn find_all(&self, haystack: &[u8], needle: &[u8]) -> Vec<usize> {
        let mut matches = Vec::new();
        if needle.is_empty() {
            return matches;
        }
        let mut start = 0;
        while let Some(pos) = self.search(haystack, needle, start) {
            matches.push(pos);
            start = pos + needle.len();
        }
        matches
    }
}

impl Default for PatternSearcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte-by-byte scan, aborting each candidate at its first mismatch
fn naive_search(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    let last = haystack.len() - needle.len();
    'candidates: for pos in start..=last {
        for (j, &byte) in needle.iter().enumerate() {
            if haystack[pos + j] != byte {
                continue 'candidates;
            }
        }
        return Some(pos);
    }
    None
}

/// BNDM over a 64-bit state word. Needle byte `i` maps to bit `63 - i`, so a
/// state that reaches the high bit after reading the whole window is a match.
fn bndm_search(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    let m = needle.len();
    debug_assert!(m >= 1 && m <= 64);

    const HIGH_BIT: u64 = 1 << 63;
    let mut masks = [0u64; 256];
    for (i, &byte) in needle.iter().enumerate() {
        masks[byte as usize] |= HIGH_BIT >> i;
    }

    let last_window = haystack.len() - m;
    let mut pos = start;
    while pos <= last_window {
        let mut j = m;
        let mut shift = m;
        let mut state = !0u64;
        while state != 0 {
            j -= 1;
            state &= masks[haystack[pos + j] as usize];
            if state & HIGH_BIT != 0 {
                if j > 0 {
                    // Suffix read so far is also a needle prefix
                    shift = j;
                } else {
                    return Some(pos);
                }
            }
            state <<= 1;
        }
        pos += shift;
    }
    None
}

/// Boyer–Moore with the bad-character rule.
///
/// `table[b]` holds `m - 1 - last index of b in the needle`, or `None` when
/// `b` does not occur in it.
fn boyer_moore_search(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    let m = needle.len();
    let mut table = [None::<usize>; 256];
    for (i, &byte) in needle.iter().enumerate() {
        table[byte as usize] = Some(m - 1 - i);
    }

    let last_window = haystack.len() - m;
    let mut pos = start;
    while pos <= last_window {
        let mut j = m - 1;
        loop {
            let byte = haystack[pos + j];
            if byte != needle[j] {
                pos += match table[byte as usize] {
                    None => j + 1,
                    Some(distance) => distance.saturating_sub(m - 1 - j).max(1),
                };
                break;
            }
            if j == 0 {
                return Some(pos);
            }
            j -= 1;
        }
    }
    None
}

/// First occurrence of `needle` in `haystack` at or after `start`
pub fn find_pattern(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    PatternSearcher::new().search(haystack, needle, start)
}

/// Like [`find_pattern`], but a miss is answered by `on_not_found`, which may
/// itself run a second search strategy.
pub fn find_pattern_or_else<F>(haystack: &[u8], needle: &[u8], start: usize, on_not_found: F) -> Option<usize>
where
    F: FnOnce() -> Option<usize>,
{
    find_pattern(haystack, needle, start).or_else(on_not_found)
}

/// Every non-overlapping occurrence of `needle` in `haystack`
pub fn find_all_patterns(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    PatternSearcher::new().find_all(haystack, needle)
}

/// Whether `haystack` contains `needle`
pub fn contains_pattern(haystack: &[u8], needle: &[u8]) -> bool {
    find_pattern(haystack, needle, 0).is_some()
}
