//! In-place bulk operations over byte buffers.
//!
//! - [`tiering`]: descending word-width passes shared by the engines
//! - [`view`]: bounds-checked sub-ranges of caller buffers
//! - [`bitwise`]: XOR/AND/OR/NOT with an optional parallel fast path
//! - [`equality`]: tiered block comparison
//! - [`fill`]: block-doubling fill
//!
//! Buffers always belong to the caller. Nothing here allocates, resizes or
//! frees them, and no engine keeps state between calls.

pub mod bitwise;
pub mod equality;
pub mod fill;
pub mod tiering;
pub mod view;

pub use bitwise::{
    buffer_and, buffer_not, buffer_or, buffer_xor, get_global_bitwise_engine, BitwiseOp,
    BitwiseTransformEngine,
};
pub use equality::{sequence_equal, sequence_equal_at, sequence_equal_remaining, EqualityEngine};
pub use fill::{clear, clear_range, fill, fill_range, FillEngine, FillValue};
pub use tiering::{
    TierPlan, TierSegment, TierSpec, WordTiering, WordWidth, DIRECT_BYTEWISE_LIMIT, TIERING_TABLE,
};
pub use view::{BufferView, BufferViewMut};
