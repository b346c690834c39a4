//! # Equality Engine
//!
//! Block-wise byte sequence comparison. Blocks of 256 bytes are compared
//! first, then 64 (on 64-bit targets), 32, 4 and finally single bytes. Each
//! block is folded into a single word (`acc |= a ^ b`) and tested once, so a
//! large equal buffer costs one branch per block while a mismatch is still
//! reported at the first differing block.

use crate::error::Result;
use crate::memory::tiering::Word;
use crate::memory::view::BufferView;
use crate::system::{get_capabilities, Capabilities};

/// Block sizes in bytes, widest first
pub static EQUALITY_BLOCKS: [usize; 5] = [256, 64, 32, 4, 1];

/// Tiered block comparison
#[derive(Debug, Clone, Copy)]
pub struct EqualityEngine {
    capabilities: Capabilities,
}

impl EqualityEngine {
    /// Engine using the detected capabilities
    pub fn new() -> Self {
        Self {
            capabilities: *get_capabilities(),
        }
    }

    /// Engine using an explicit capability descriptor
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// Block sizes used on this target
    pub fn active_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        EQUALITY_BLOCKS
            .iter()
            .copied()
            .filter(move |&block| block != 64 || self.capabilities.supports_64bit_words())
    }

    /// Whether `a` and `b` hold the same bytes.
    ///
    /// Slices starting at the same address with the same length are accepted
    /// without reading them; differing lengths are rejected immediately.
    pub fn equals(&self, a: &[u8], b: &[u8]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        if std::ptr::eq(a.as_ptr(), b.as_ptr()) {
            return true;
        }
        self.compare_blocks(a, b)
    }

    /// Whether two views hold the same bytes
    pub fn equals_views(&self, a: BufferView<'_>, b: BufferView<'_>) -> bool {
        if a.len() != b.len() {
            return false;
        }
        if a.same_origin(&b) {
            return true;
        }
        self.compare_blocks(a.as_slice(), b.as_slice())
    }

    /// Compare `count` bytes of `a` at `a_offset` with `count` bytes of `b` at `b_offset`.
    ///
    /// Fails with `OutOfBounds` if either range reaches past its buffer.
    pub fn equals_at(
        &self,
        a: &[u8],
        a_offset: usize,
        b: &[u8],
        b_offset: usize,
        count: usize,
    ) -> Result<bool> {
        let a = BufferView::new(a, a_offset, count)?;
        let b = BufferView::new(b, b_offset, count)?;
        Ok(self.equals_views(a, b))
    }

    /// Compare everything from `a_offset` to the end of `a` with everything
    /// from `b_offset` to the end of `b`; unequal remaining lengths compare false.
    pub fn equals_remaining(&self, a: &[u8], a_offset: usize, b: &[u8], b_offset: usize) -> Result<bool> {
        let a = BufferView::from_offset(a, a_offset)?;
        let b = BufferView::from_offset(b, b_offset)?;
        Ok(self.equals_views(a, b))
    }

    /// Equality over possibly absent buffers.
    ///
    /// Two absent buffers are equal; an absent and a present buffer are not.
    pub fn equals_opt(&self, a: Option<&[u8]>, b: Option<&[u8]>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.equals(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn compare_blocks(&self, a: &[u8], b: &[u8]) -> bool {
        debug_assert_eq!(a.len(), b.len());
        let wide = self.capabilities.supports_64bit_words();
        let mut pos = 0;
        for block in self.active_blocks() {
            let blocks = (a.len() - pos) / block;
            if blocks == 0 {
                continue;
            }
            let end = pos + blocks * block;
            let (lhs, rhs) = (&a[pos..end], &b[pos..end]);
            let equal = match block {
                1 => lhs == rhs,
                4 => blocks_equal::<u32>(lhs, rhs, block),
                _ if wide => blocks_equal::<u64>(lhs, rhs, block),
                _ => blocks_equal::<u32>(lhs, rhs, block),
            };
            if !equal {
                return false;
            }
            pos = end;
        }
        true
    }
}

impl Default for EqualityEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare `lhs` and `rhs` in `block`-byte blocks using `W`-sized lanes,
/// stopping at the first differing block.
#[inline]
fn blocks_equal<W: Word>(lhs: &[u8], rhs: &[u8], block: usize) -> bool {
    lhs.chunks_exact(block).zip(rhs.chunks_exact(block)).all(|(x, y)| {
        x.chunks_exact(W::BYTES)
            .zip(y.chunks_exact(W::BYTES))
            .fold(W::ZERO, |acc, (p, q)| acc | (W::load(p) ^ W::load(q)))
            == W::ZERO
    })
}

/// Whether `a` and `b` hold the same bytes
pub fn sequence_equal(a: &[u8], b: &[u8]) -> bool {
    EqualityEngine::new().equals(a, b)
}

/// Compare `count` bytes at `a_offset` in `a` with `count` bytes at `b_offset` in `b`
pub fn sequence_equal_at(a: &[u8], a_offset: usize, b: &[u8], b_offset: usize, count: usize) -> Result<bool> {
    EqualityEngine::new().equals_at(a, a_offset, b, b_offset, count)
}

/// Compare the remainders of `a` and `b` starting at the given offsets
pub fn sequence_equal_remaining(a: &[u8], a_offset: usize, b: &[u8], b_offset: usize) -> Result<bool> {
    EqualityEngine::new().equals_remaining(a, a_offset, b, b_offset)
}
