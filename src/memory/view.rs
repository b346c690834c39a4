//! Bounds-checked sub-ranges of caller-owned buffers.
//!
//! A view never owns or reallocates its buffer. The `offset + count <= len`
//! invariant is checked once at construction, so the engines can slice
//! without re-validating.

use crate::error::{check_view, Result};

/// Read-only `(buffer, offset, count)` triple
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    buffer: &'a [u8],
    offset: usize,
    count: usize,
}

impl<'a> BufferView<'a> {
    /// Create a view of `count` bytes starting at `offset`.
    ///
    /// Fails with `OutOfBounds` when the range reaches past the buffer.
    pub fn new(buffer: &'a [u8], offset: usize, count: usize) -> Result<Self> {
        check_view(offset, count, buffer.len())?;
        Ok(Self { buffer, offset, count })
    }

    /// View from `offset` to the end of the buffer
    pub fn from_offset(buffer: &'a [u8], offset: usize) -> Result<Self> {
        let count = buffer.len().checked_sub(offset).unwrap_or(usize::MAX);
        Self::new(buffer, offset, count)
    }

    /// View of the whole buffer
    pub fn full(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0, count: buffer.len() }
    }

    /// Underlying buffer
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Start offset within the underlying buffer
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes in the view
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the view is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The viewed bytes
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.buffer[self.offset..self.offset + self.count]
    }

    /// Same underlying buffer and offset
    #[inline]
    pub fn same_origin(&self, other: &BufferView<'_>) -> bool {
        std::ptr::eq(self.buffer.as_ptr(), other.buffer.as_ptr()) && self.offset == other.offset
    }
}

impl<'a> From<&'a [u8]> for BufferView<'a> {
    fn from(buffer: &'a [u8]) -> Self {
        Self::full(buffer)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for BufferView<'a> {
    fn from(buffer: &'a [u8; N]) -> Self {
        Self::full(buffer)
    }
}

impl<'a> From<&'a Vec<u8>> for BufferView<'a> {
    fn from(buffer: &'a Vec<u8>) -> Self {
        Self::full(buffer)
    }
}

/// Mutable `(buffer, offset, count)` triple
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
    count: usize,
}

impl<'a> BufferViewMut<'a> {
    /// Create a mutable view of `count` bytes starting at `offset`.
    pub fn new(buffer: &'a mut [u8], offset: usize, count: usize) -> Result<Self> {
        check_view(offset, count, buffer.len())?;
        Ok(Self { buffer, offset, count })
    }

    /// Mutable view of the whole buffer
    pub fn full(buffer: &'a mut [u8]) -> Self {
        let count = buffer.len();
        Self { buffer, offset: 0, count }
    }

    /// Start offset within the underlying buffer
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes in the view
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the view is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The viewed bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[self.offset..self.offset + self.count]
    }

    /// The viewed bytes, mutably
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buffer[self.offset..self.offset + self.count]
    }

    /// Consume the view, keeping the borrow of the underlying buffer
    #[inline]
    pub fn into_mut_slice(self) -> &'a mut [u8] {
        &mut self.buffer[self.offset..self.offset + self.count]
    }
}

impl<'a> From<&'a mut [u8]> for BufferViewMut<'a> {
    fn from(buffer: &'a mut [u8]) -> Self {
        Self::full(buffer)
    }
}

impl<'a> From<&'a mut Vec<u8>> for BufferViewMut<'a> {
    fn from(buffer: &'a mut Vec<u8>) -> Self {
        Self::full(buffer.as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_bounds() {
        let data = [1u8, 2, 3, 4, 5];
        let view = BufferView::new(&data, 1, 3).unwrap();
        assert_eq!(view.as_slice(), &[2, 3, 4]);
        assert_eq!(view.offset(), 1);
        assert_eq!(view.len(), 3);

        assert!(BufferView::new(&data, 5, 0).unwrap().is_empty());
        assert!(BufferView::new(&data, 3, 3).is_err());
        assert!(BufferView::new(&data, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_view_from_offset() {
        let data = [1u8, 2, 3];
        assert_eq!(BufferView::from_offset(&data, 1).unwrap().as_slice(), &[2, 3]);
        assert!(BufferView::from_offset(&data, 3).unwrap().is_empty());
        assert!(BufferView::from_offset(&data, 4).is_err());
    }

    #[test]
    fn test_same_origin() {
        let data = [0u8; 8];
        let a = BufferView::new(&data, 2, 4).unwrap();
        let b = BufferView::new(&data, 2, 6).unwrap();
        let c = BufferView::new(&data, 3, 4).unwrap();
        assert!(a.same_origin(&b));
        assert!(!a.same_origin(&c));
    }

    #[test]
    fn test_mut_view() {
        let mut data = vec![0u8; 6];
        {
            let mut view = BufferViewMut::new(&mut data, 2, 2).unwrap();
            view.as_mut_slice().copy_from_slice(&[7, 8]);
        }
        assert_eq!(data, vec![0, 0, 7, 8, 0, 0]);
        assert!(BufferViewMut::new(&mut data, 5, 2).is_err());
    }
}
