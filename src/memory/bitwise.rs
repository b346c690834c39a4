//! # Bitwise Transform Engine
//!
//! In-place XOR/AND/OR/NOT of a source buffer against an operand buffer (or
//! against itself for NOT).
//!
//! Binary operations only touch `min(source.len(), operand.len())` bytes; the
//! rest of the longer buffer is left alone. Buffers are processed in tiered
//! word mode ([`WordTiering`]): 64-bit words first, then 32, 16 and finally
//! single bytes. Within a tier, once the word count exceeds the configured
//! threshold (2048 by default) the tier is split into disjoint contiguous
//! partitions and handed to rayon. `par_chunks_mut` joins every partition
//! before returning, so callers only ever observe a completed transform.

use crate::config::{BulkOpsConfig, Config};
use crate::error::{BulkError, Result};
use crate::memory::tiering::{Word, WordTiering, WordWidth};
use crate::memory::view::{BufferView, BufferViewMut};
use crate::system::{get_capabilities, Capabilities};
use rayon::prelude::*;
use std::sync::OnceLock;

/// Bitwise operator applied by [`BitwiseTransformEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    /// `source ^= operand`
    Xor,
    /// `source &= operand`
    And,
    /// `source |= operand`
    Or,
    /// `source = !source`
    Not,
}

impl BitwiseOp {
    /// Whether the operator takes an operand buffer
    #[inline]
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Not)
    }

    #[inline(always)]
    fn combine<W: Word>(self, lhs: W, rhs: W) -> W {
        match self {
            Self::Xor => lhs ^ rhs,
            Self::And => lhs & rhs,
            Self::Or => lhs | rhs,
            Self::Not => !lhs,
        }
    }
}

/// Tiered, optionally parallel in-place bitwise transforms
#[derive(Debug, Clone)]
pub struct BitwiseTransformEngine {
    config: BulkOpsConfig,
    capabilities: Capabilities,
}

impl BitwiseTransformEngine {
    /// Engine with the default configuration and detected capabilities
    pub fn new() -> Self {
        Self {
            config: BulkOpsConfig::default(),
            capabilities: *get_capabilities(),
        }
    }

    /// Engine with a validated custom configuration
    pub fn with_config(config: BulkOpsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            capabilities: *get_capabilities(),
        })
    }

    /// Replace the capability descriptor
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &BulkOpsConfig {
        &self.config
    }

    /// Apply `op` to `source` in place.
    ///
    /// `operand` must be present for XOR/AND/OR and absent for NOT; anything
    /// else is rejected with `InvalidArgument` before any byte is written.
    pub fn transform(&self, op: BitwiseOp, source: &mut [u8], operand: Option<&[u8]>) -> Result<()> {
        match (op.is_binary(), operand.is_some()) {
            (true, false) => {
                return Err(BulkError::invalid_argument(format!(
                    "{:?} requires an operand buffer",
                    op
                )))
            }
            (false, true) => {
                return Err(BulkError::invalid_argument("Not does not take an operand buffer"))
            }
            _ => {}
        }
        self.apply(op, source, operand);
        Ok(())
    }

    /// Apply `op` to a sub-range of the source against a sub-range of the operand.
    pub fn transform_range(
        &self,
        op: BitwiseOp,
        mut source: BufferViewMut<'_>,
        operand: Option<BufferView<'_>>,
    ) -> Result<()> {
        self.transform(op, source.as_mut_slice(), operand.map(|view| view.as_slice()))
    }

    /// `source ^= operand`
    pub fn xor(&self, source: &mut [u8], operand: &[u8]) -> Result<()> {
        self.transform(BitwiseOp::Xor, source, Some(operand))
    }

    /// `source &= operand`
    pub fn and(&self, source: &mut [u8], operand: &[u8]) -> Result<()> {
        self.transform(BitwiseOp::And, source, Some(operand))
    }

    /// `source |= operand`
    pub fn or(&self, source: &mut [u8], operand: &[u8]) -> Result<()> {
        self.transform(BitwiseOp::Or, source, Some(operand))
    }

    /// `source = !source`
    pub fn not(&self, source: &mut [u8]) -> Result<()> {
        self.transform(BitwiseOp::Not, source, None)
    }

    /// Number of workers for a tier of `words` elements; `1` means sequential.
    pub fn worker_count(&self, words: usize) -> usize {
        if !self.config.enable_parallel || words <= self.config.parallel_threshold {
            return 1;
        }
        let max_workers = match self.config.max_workers {
            0 => self.capabilities.available_parallelism,
            n => n,
        };
        max_workers.min(words / self.config.min_items_per_worker).max(1)
    }

    /// Whether a buffer of `len` bytes is processed in direct bytewise mode
    pub fn uses_direct_mode(&self, len: usize) -> bool {
        !self.config.enable_word_tiering || WordTiering::plan(len, &self.capabilities).is_direct()
    }

    fn apply(&self, op: BitwiseOp, source: &mut [u8], operand: Option<&[u8]>) {
        let len = match operand {
            Some(operand) => source.len().min(operand.len()),
            None => source.len(),
        };
        let source = &mut source[..len];
        let operand = operand.map(|operand| &operand[..len]);

        let plan = WordTiering::plan(len, &self.capabilities);
        if !self.config.enable_word_tiering || plan.is_direct() {
            apply_words::<u8>(op, source, operand);
            return;
        }

        for segment in plan.segments() {
            let range = segment.byte_range();
            let dst = &mut source[range.clone()];
            let src = operand.map(|operand| &operand[range]);
            match segment.width {
                WordWidth::W64 => self.apply_tier::<u64>(op, dst, src, segment.words),
                WordWidth::W32 => self.apply_tier::<u32>(op, dst, src, segment.words),
                WordWidth::W16 => self.apply_tier::<u16>(op, dst, src, segment.words),
                WordWidth::W8 => self.apply_tier::<u8>(op, dst, src, segment.words),
            }
        }
        let tail = plan.tail();
        if !tail.is_empty() {
            apply_words::<u8>(op, &mut source[tail.clone()], operand.map(|operand| &operand[tail]));
        }
    }

    fn apply_tier<W: Word>(&self, op: BitwiseOp, dst: &mut [u8], src: Option<&[u8]>, words: usize) {
        let workers = self.worker_count(words);
        if workers <= 1 {
            apply_words::<W>(op, dst, src);
            return;
        }

        let chunk_bytes = ((words + workers - 1) / workers) * W::BYTES;
        log::debug!(
            "{:?}: {} x {}-byte words across {} workers ({} bytes each)",
            op,
            words,
            W::BYTES,
            workers,
            chunk_bytes
        );
        match src {
            Some(src) => dst
                .par_chunks_mut(chunk_bytes)
                .zip(src.par_chunks(chunk_bytes))
                .for_each(|(dst, src)| apply_words::<W>(op, dst, Some(src))),
            None => dst
                .par_chunks_mut(chunk_bytes)
                .for_each(|dst| apply_words::<W>(op, dst, None)),
        }
    }
}

impl Default for BitwiseTransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `op` word by word over whole `W`-sized chunks of `dst`.
#[inline]
fn apply_words<W: Word>(op: BitwiseOp, dst: &mut [u8], src: Option<&[u8]>) {
    match src {
        Some(src) => {
            for (d, s) in dst.chunks_exact_mut(W::BYTES).zip(src.chunks_exact(W::BYTES)) {
                op.combine(W::load(d), W::load(s)).store(d);
            }
        }
        None => {
            for d in dst.chunks_exact_mut(W::BYTES) {
                op.combine(W::load(d), W::ZERO).store(d);
            }
        }
    }
}

static GLOBAL_ENGINE: OnceLock<BitwiseTransformEngine> = OnceLock::new();

/// Shared engine with the default configuration
pub fn get_global_bitwise_engine() -> &'static BitwiseTransformEngine {
    GLOBAL_ENGINE.get_or_init(BitwiseTransformEngine::new)
}

/// `source ^= operand` over `min(source.len(), operand.len())` bytes
pub fn buffer_xor(source: &mut [u8], operand: &[u8]) {
    get_global_bitwise_engine().apply(BitwiseOp::Xor, source, Some(operand))
}

/// `source &= operand` over `min(source.len(), operand.len())` bytes
pub fn buffer_and(source: &mut [u8], operand: &[u8]) {
    get_global_bitwise_engine().apply(BitwiseOp::And, source, Some(operand))
}

/// `source |= operand` over `min(source.len(), operand.len())` bytes
pub fn buffer_or(source: &mut [u8], operand: &[u8]) {
    get_global_bitwise_engine().apply(BitwiseOp::Or, source, Some(operand))
}

/// Invert every bit of `source`
pub fn buffer_not(source: &mut [u8]) {
    get_global_bitwise_engine().apply(BitwiseOp::Not, source, None)
}
