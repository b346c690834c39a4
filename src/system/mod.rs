//! # System Integration Utilities
//!
//! Runtime description of the target the engines run on. Detection happens once
//! per process; the result is immutable.

pub mod capabilities;

pub use capabilities::{Capabilities, get_capabilities};
