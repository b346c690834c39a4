//! # Word Tiering
//!
//! Splits a buffer length into descending word-width passes (64 → 32 → 16 → 8
//! bits). Each pass covers as many whole words as fit in what the previous
//! pass left over, so every byte is covered exactly once and the passes are
//! laid out left to right. A tier runs only when it covers at least its
//! threshold of whole words; otherwise its bytes fall through to the next
//! narrower tier. Buffers shorter than [`DIRECT_BYTEWISE_LIMIT`] skip tiering
//! altogether and are processed bytewise.
//!
//! The [`Word`] trait is the only place where bytes are reinterpreted as
//! integers. Loads and stores go through `from_ne_bytes`/`to_ne_bytes` on
//! fixed-size arrays, so no alignment assumptions are made.

use crate::system::Capabilities;
use std::ops::{BitAnd, BitOr, BitXor, Not, Range};

/// Word widths used by the tiered passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordWidth {
    /// Single bytes
    W8,
    /// 16-bit words
    W16,
    /// 32-bit words
    W32,
    /// 64-bit words
    W64,
}

impl WordWidth {
    /// Size of one word in bytes
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }

    /// Size of one word in bits
    #[inline]
    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }
}

/// One row of the tiering table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSpec {
    /// Word width of this tier
    pub width: WordWidth,
    /// Minimum number of whole words for the tier to run; fewer fall through
    pub threshold: usize,
    /// Bytes per word
    pub word_bytes: usize,
}

/// Number of rows in [`TIERING_TABLE`]
pub const TIER_COUNT: usize = 4;

/// Buffers shorter than this many bytes are processed bytewise without a plan
pub const DIRECT_BYTEWISE_LIMIT: usize = 8;

/// Static tiering table, widest first
pub static TIERING_TABLE: [TierSpec; TIER_COUNT] = [
    TierSpec { width: WordWidth::W64, threshold: 4, word_bytes: 8 },
    TierSpec { width: WordWidth::W32, threshold: 2, word_bytes: 4 },
    TierSpec { width: WordWidth::W16, threshold: 1, word_bytes: 2 },
    TierSpec { width: WordWidth::W8, threshold: 1, word_bytes: 1 },
];

/// A contiguous run of whole words of a single width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSegment {
    /// Word width of the run
    pub width: WordWidth,
    /// Byte offset of the first word
    pub start: usize,
    /// Number of whole words
    pub words: usize,
}

impl TierSegment {
    const EMPTY: Self = Self { width: WordWidth::W8, start: 0, words: 0 };

    /// Number of bytes covered
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.words * self.width.bytes()
    }

    /// Byte range covered
    #[inline]
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.start + self.byte_len()
    }
}

/// Result of tiering a buffer length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPlan {
    segments: [TierSegment; TIER_COUNT],
    len: usize,
    tail_start: usize,
    total: usize,
}

impl TierPlan {
    /// Word runs, left to right and widest first
    pub fn segments(&self) -> &[TierSegment] {
        &self.segments[..self.len]
    }

    /// Bytes not covered by any word run (always processed bytewise)
    pub fn tail(&self) -> Range<usize> {
        self.tail_start..self.total
    }

    /// Whether the plan runs no multi-byte tier, so the whole buffer is
    /// handled in direct bytewise mode
    pub fn is_direct(&self) -> bool {
        self.segments().iter().all(|segment| segment.width == WordWidth::W8)
    }
}

/// Word tiering strategy over the static [`TIERING_TABLE`]
pub struct WordTiering;

impl WordTiering {
    /// Tiers usable on a target, widest first
    pub fn active_tiers(caps: &Capabilities) -> impl Iterator<Item = &'static TierSpec> + '_ {
        TIERING_TABLE
            .iter()
            .filter(move |spec| spec.width != WordWidth::W64 || caps.supports_64bit_words())
    }

    /// Number of whole words of `width` in `len` bytes and the leftover bytes
    #[inline]
    pub fn split(len: usize, width: WordWidth) -> (usize, usize) {
        (len / width.bytes(), len % width.bytes())
    }

    /// Plan the descending passes for a buffer of `len` bytes
    pub fn plan(len: usize, caps: &Capabilities) -> TierPlan {
        let mut plan = TierPlan {
            segments: [TierSegment::EMPTY; TIER_COUNT],
            len: 0,
            tail_start: 0,
            total: len,
        };
        if len < DIRECT_BYTEWISE_LIMIT {
            return plan;
        }

        let mut start = 0;
        for spec in Self::active_tiers(caps) {
            let (words, _) = Self::split(len - start, spec.width);
            if words < spec.threshold.max(1) {
                continue;
            }
            plan.segments[plan.len] = TierSegment { width: spec.width, start, words };
            plan.len += 1;
            start += words * spec.word_bytes;
        }
        plan.tail_start = start;
        plan
    }
}

/// Unsigned integer that can be loaded from and stored to a byte chunk
pub trait Word:
    Copy
    + Eq
    + Send
    + Sync
    + BitXor<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
{
    /// Size in bytes
    const BYTES: usize;
    /// All bits clear
    const ZERO: Self;

    /// Read the first `BYTES` bytes of `bytes` in native byte order
    fn load(bytes: &[u8]) -> Self;

    /// Write `self` into the first `BYTES` bytes of `bytes` in native byte order
    fn store(self, bytes: &mut [u8]);
}

macro_rules! impl_word {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Word for $ty {
                const BYTES: usize = std::mem::size_of::<$ty>();
                const ZERO: Self = 0;

                #[inline(always)]
                fn load(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::BYTES]);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline(always)]
                fn store(self, bytes: &mut [u8]) {
                    bytes[..Self::BYTES].copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);
