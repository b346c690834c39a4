//! # Target Capability Descriptor
//!
//! Word-width and bulk-copy capabilities of the running target, detected once
//! and shared read-only by every engine. Engines consult the descriptor instead
//! of scattering `cfg` branches through their hot paths, which also lets tests
//! drive the narrow-word fallbacks on any host through [`Capabilities::portable`].

use std::sync::OnceLock;

/// Capabilities of the current target relevant to bulk byte operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Native machine word width in bits (32 or 64)
    pub native_word_bits: u32,
    /// Whether word-level bit manipulation is cheap enough for bit-parallel search
    pub has_bit_tricks: bool,
    /// Whether a fast bulk-copy primitive backs slice copies
    pub has_fast_bulk_copy: bool,
    /// Number of workers available for data-parallel fan-out
    pub available_parallelism: usize,
}

impl Capabilities {
    /// Detect the capabilities of the running target
    pub fn detect() -> Self {
        let native_word_bits = if cfg!(target_pointer_width = "64") { 64 } else { 32 };
        let has_bit_tricks = cfg!(any(target_pointer_width = "32", target_pointer_width = "64"));
        let available_parallelism = rayon::current_num_threads().max(1);

        let caps = Self {
            native_word_bits,
            has_bit_tricks,
            has_fast_bulk_copy: true,
            available_parallelism,
        };
        log::debug!(
            "Detected capabilities: {}-bit words, bit tricks: {}, fast copy: {}, workers: {}",
            caps.native_word_bits,
            caps.has_bit_tricks,
            caps.has_fast_bulk_copy,
            caps.available_parallelism
        );
        caps
    }

    /// Lowest-common-denominator descriptor: 32-bit words, no bit tricks,
    /// no fast bulk copy and a single worker.
    pub const fn portable() -> Self {
        Self {
            native_word_bits: 32,
            has_bit_tricks: false,
            has_fast_bulk_copy: false,
            available_parallelism: 1,
        }
    }

    /// Whether 64-bit words may be used for tiering and block comparison
    #[inline]
    pub fn supports_64bit_words(&self) -> bool {
        self.native_word_bits >= 64
    }

    /// Longest needle (in bytes) handled by the bit-parallel search
    #[inline]
    pub fn bndm_word_bits(&self) -> usize {
        if self.supports_64bit_words() {
            64
        } else {
            32
        }
    }

    /// Bytes per native word
    #[inline]
    pub fn native_word_bytes(&self) -> usize {
        (self.native_word_bits / 8) as usize
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        *get_capabilities()
    }
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Get the global capability descriptor (detected once on first call)
pub fn get_capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(Capabilities::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_detection() {
        let caps = get_capabilities();
        assert!(caps.native_word_bits == 32 || caps.native_word_bits == 64);
        assert!(caps.available_parallelism >= 1);
        assert_eq!(caps.native_word_bytes() * 8, caps.native_word_bits as usize);
    }

    #[test]
    fn test_detected_once() {
        let a = get_capabilities();
        let b = get_capabilities();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_portable_descriptor() {
        let caps = Capabilities::portable();
        assert!(!caps.supports_64bit_words());
        assert!(!caps.has_bit_tricks);
        assert_eq!(caps.bndm_word_bits(), 32);
        assert_eq!(caps.native_word_bytes(), 4);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_64bit_target() {
        let caps = get_capabilities();
        assert!(caps.supports_64bit_words());
        assert_eq!(caps.bndm_word_bits(), 64);
    }
}
