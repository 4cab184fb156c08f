//! ISA tests.

/// Field extraction and immediate synthesis.
pub mod decode;
