//! # Fill Engine
//!
//! Fills a buffer with a repeating 1/2/4/8-byte value by block doubling: a
//! seed word is written once, then the filled prefix is copied onto the region
//! right after it, doubling the filled length on every pass until the
//! remainder is shorter than the prefix, which is then copied as a tail.
//!
//! Values narrower than the native word are replicated across a full native
//! word before seeding. Multi-byte values are laid out in native byte order,
//! exactly as an in-memory store of the integer would be, and the pattern's
//! phase starts at the first byte of the target range.

use crate::error::Result;
use crate::memory::view::BufferViewMut;
use crate::system::{get_capabilities, Capabilities};

/// Value replicated across a fill target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillValue {
    /// One byte
    U8(u8),
    /// Two bytes
    U16(u16),
    /// Four bytes
    U32(u32),
    /// Eight bytes
    U64(u64),
}

impl FillValue {
    /// Width of the value in bytes
    #[inline]
    pub fn width(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
            Self::U64(_) => 8,
        }
    }

    /// Native-endian bytes of the value, left-aligned in an 8-byte array
    pub fn to_ne_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        match *self {
            Self::U8(v) => bytes[0] = v,
            Self::U16(v) => bytes[..2].copy_from_slice(&v.to_ne_bytes()),
            Self::U32(v) => bytes[..4].copy_from_slice(&v.to_ne_bytes()),
            Self::U64(v) => bytes = v.to_ne_bytes(),
        }
        bytes
    }

    /// Seed word: the value repeated across the widest word the target supports.
    ///
    /// Returns the seed bytes and the number of valid bytes in them.
    fn seed(&self, caps: &Capabilities) -> ([u8; 8], usize) {
        let width = self.width();
        let value = self.to_ne_bytes();
        let seed_len = caps.native_word_bytes().max(width);
        let mut seed = [0u8; 8];
        for (i, byte) in seed[..seed_len].iter_mut().enumerate() {
            *byte = value[i % width];
        }
        (seed, seed_len)
    }
}

macro_rules! impl_fill_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FillValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_fill_value_from!(u8 => U8, u16 => U16, u32 => U32, u64 => U64);

/// Block-doubling fill
#[derive(Debug, Clone, Copy)]
pub struct FillEngine {
    capabilities: Capabilities,
}

impl FillEngine {
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

    /// Overwrite all of `target` with the repeating pattern of `value`
    pub fn fill<V: Into<FillValue>>(&self, target: &mut [u8], value: V) {
        self.fill_slice(target, value.into());
    }

    /// Overwrite `count` bytes of `target` starting at `offset`.
    ///
    /// Fails with `OutOfBounds` before writing if the range exceeds the buffer.
    pub fn fill_range<V: Into<FillValue>>(
        &self,
        target: &mut [u8],
        value: V,
        offset: usize,
        count: usize,
    ) -> Result<()> {
        let view = BufferViewMut::new(target, offset, count)?;
        self.fill_view(view, value);
        Ok(())
    }

    /// Overwrite the bytes of a view
    pub fn fill_view<V: Into<FillValue>>(&self, view: BufferViewMut<'_>, value: V) {
        self.fill_slice(view.into_mut_slice(), value.into());
    }

    /// Zero all of `target`
    pub fn clear(&self, target: &mut [u8]) {
        self.fill_slice(target, FillValue::U8(0));
    }

    fn fill_slice(&self, target: &mut [u8], value: FillValue) {
        if target.is_empty() {
            return;
        }
        let (seed, seed_len) = value.seed(&self.capabilities);

        if !self.capabilities.has_fast_bulk_copy {
            for (i, byte) in target.iter_mut().enumerate() {
                *byte = seed[i % seed_len];
            }
            return;
        }

        let mut filled = seed_len.min(target.len());
        target[..filled].copy_from_slice(&seed[..filled]);
        while filled < target.len() {
            let chunk = filled.min(target.len() - filled);
            target.copy_within(..chunk, filled);
            filled += chunk;
        }
    }
}

impl Default for FillEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill all of `target` with `value`
pub fn fill<V: Into<FillValue>>(target: &mut [u8], value: V) {
    FillEngine::new().fill(target, value)
}

/// Fill `count` bytes of `target` starting at `offset` with `value`
pub fn fill_range<V: Into<FillValue>>(target: &mut [u8], value: V, offset: usize, count: usize) -> Result<()> {
    FillEngine::new().fill_range(target, value, offset, count)
}

/// Zero all of `target`
pub fn clear(target: &mut [u8]) {
    FillEngine::new().clear(target)
}

/// Zero `count` bytes of `target` starting at `offset`
pub fn clear_range(target: &mut [u8], offset: usize, count: usize) -> Result<()> {
    FillEngine::new().fill_range(target, 0u8, offset, count)
}
