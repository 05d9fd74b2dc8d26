//! # Simplect
//!
//! A keyed block transform composed from three primitives over GF(2^w):
//!
//! 1. **Field arithmetic**: carry-less multiplication modulo a fixed polynomial
//! 2. **Noise**: a simplex-style gradient noise function evaluated in the field
//! 3. **Curves**: cubic Bezier curves mapping block positions to noise coordinates
//!
//! The block loop samples the noise along the key's curves and XORs the
//! result into the block. Three widths are provided (w = 8, 32, 64 giving
//! 64, 256 and 512-bit keys and blocks) in two modes:
//!
//! - [`Mode::Feedback`]: one noise bit per block bit, with each position's
//!   mask fed into a running copy of the key
//! - [`Mode::Keyed`]: one noise element per block element, sampled along a
//!   key-derived quadrilateral
//!
//! Both are self-inverse when the same key is supplied again.
//!
//! ## Usage Example
//!
//! ```
//! use simplect::Simplect64;
//!
//! let cipher = Simplect64::feedback();
//! let key = [0u8; 8];
//! let mut block = [0u8; 8];
//!
//! cipher.encode(&key, &mut block);
//! assert_ne!(block, [0u8; 8]);
//!
//! cipher.encode(&key, &mut block);
//! assert_eq!(block, [0u8; 8]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod analysis; // Round-trip and avalanche measurements
pub mod codec; // Block encoding loop
pub mod config; // Modes, widths and profiles
pub mod curve; // Bezier curve mapping
pub mod field; // GF(2^w) arithmetic
pub mod noise; // Gradient noise and shared tables

// Re-exports for convenience
pub use codec::{RunningKey, Simplect, Simplect256, Simplect512, Simplect64};
pub use config::{CurveArithmetic, Mode, Profile, SimplectConfig, Width};
pub use field::{BinaryField, Modulus, Word};
pub use noise::NoiseField;

use thiserror::Error;

/// Errors raised at the crate's parsing boundaries.
///
/// The cipher operations themselves cannot fail.
#[derive(Error, Debug)]
pub enum SimplectError {
    /// A key or block had the wrong number of bytes.
    #[error("{what} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which buffer was being parsed.
        what: &'static str,
        /// Bytes required by the selected width.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Input was not valid hexadecimal.
    #[error("invalid hex for {what}: {source}")]
    InvalidHex {
        /// Which buffer was being parsed.
        what: &'static str,
        /// Underlying decoder error.
        #[source]
        source: hex::FromHexError,
    },

    /// Mode name not recognised.
    #[error("unknown mode '{0}' (expected 'feedback' or 'keyed')")]
    UnknownMode(String),

    /// Width not one of 64, 256, 512.
    #[error("unsupported width '{0}' (expected 64, 256 or 512)")]
    UnsupportedWidth(String),
}

/// Parse a hex string into a key or block buffer for width `W`.
///
/// Surrounding whitespace and an optional `0x` prefix are ignored.
pub fn bytes_from_hex<W: Word>(what: &'static str, input: &str) -> Result<W::Bytes, SimplectError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let decoded = hex::decode(digits).map_err(|source| SimplectError::InvalidHex { what, source })?;

    let mut bytes = W::zero_bytes();
    let expected = bytes.as_ref().len();
    if decoded.len() != expected {
        return Err(SimplectError::InvalidLength {
            what,
            expected,
            actual: decoded.len(),
        });
    }
    bytes.as_mut().copy_from_slice(&decoded);
    Ok(bytes)
}

/// Build every process-wide table now instead of on first use.
///
/// Idempotent; later calls return immediately.
pub fn init() {
    noise::permutation();
    u8::tables();
    u32::tables();
    u64::tables();
}
