//! # bulkbytes: Bulk Operations over Byte Buffers
//!
//! Low-level operations over contiguous, caller-owned byte buffers:
//!
//! - **Pattern search**: first occurrence of a byte needle, using BNDM for
//!   word-sized needles, Boyer–Moore for longer ones and a naive scan on
//!   targets without cheap bit manipulation
//! - **Bitwise transforms**: in-place XOR/AND/OR/NOT processed in descending
//!   word widths, fanned out over rayon for large buffers
//! - **Equality**: tiered block comparison with early exit on mismatch
//! - **Fill**: repeating 1/2/4/8-byte values written by block doubling
//!
//! ## Quick Start
//!
//! ```rust
//! use bulkbytes::{buffer_xor, fill, find_pattern, sequence_equal};
//!
//! let haystack = [0x61, 0x62, 0x63, 0x62, 0x63];
//! assert_eq!(find_pattern(&haystack, &[0x62, 0x63], 0), Some(1));
//!
//! let mut data = [0xFF, 0x00, 0xFF];
//! buffer_xor(&mut data, &[0x0F, 0x0F, 0x0F]);
//! assert_eq!(data, [0xF0, 0x0F, 0xF0]);
//!
//! let mut buffer = [0u8; 10];
//! fill(&mut buffer, 0xABu8);
//! assert!(sequence_equal(&buffer, &[0xAB; 10]));
//! ```
//!
//! Every operation is synchronous. The bitwise engine may use worker threads
//! internally but joins them before returning.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod memory;
pub mod string;
pub mod system;

// Re-export core types
pub use config::{BulkOpsConfig, Config};
pub use error::{BulkError, Result};
pub use system::{get_capabilities, Capabilities};

pub use memory::{
    buffer_and, buffer_not, buffer_or, buffer_xor, clear, clear_range, fill, fill_range,
    sequence_equal, sequence_equal_at, sequence_equal_remaining, BitwiseOp,
    BitwiseTransformEngine, BufferView, BufferViewMut, EqualityEngine, FillEngine, FillValue,
    WordTiering, WordWidth,
};
pub use string::{
    contains_pattern, find_all_patterns, find_pattern, find_pattern_or_else, PatternSearcher,
    SearchAlgorithm,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library: detects target capabilities up front so the
/// first operation does not pay for it.
pub fn init() {
    log::debug!("Initializing bulkbytes v{}", VERSION);
    let _ = get_capabilities();
}
