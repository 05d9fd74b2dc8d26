//! Field element words and the fixed-size buffers built from them.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, BitXorAssign, Div, Not, Rem, Shl, Shr};
use std::sync::OnceLock;

use crate::noise::WidthTables;

/// Number of field elements in a key or block.
pub const ELEMENTS: usize = 8;

/// Unsigned word backing one field element of GF(2^w).
///
/// Implemented for `u8`, `u32` and `u64`, giving the 64, 256 and 512-bit
/// instances. Each implementation owns its own lazily built [`WidthTables`].
pub trait Word:
    Copy
    + Debug
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
    + BitXor<Output = Self>
    + BitXorAssign
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// Width w in bits.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize;
    /// Additive identity.
    const ZERO: Self;
    /// The polynomial `1`.
    const ONE: Self;
    /// All bits set.
    const MAX: Self;
    /// Low w bits of the standard irreducible modulus for this width.
    const STANDARD_REDUCTION: Self;

    /// Key or block buffer: `ELEMENTS` words laid out little-endian.
    type Bytes: Copy + Debug + Eq + Hash + Send + Sync + AsRef<[u8]> + AsMut<[u8]> + 'static;

    /// All-zero key or block buffer.
    fn zero_bytes() -> Self::Bytes;

    /// Truncating conversion from `u64`.
    fn from_u64(value: u64) -> Self;

    /// Truncating conversion from `u128`.
    fn from_u128(value: u128) -> Self;

    /// Widening conversion to `u128`.
    fn to_u128(self) -> u128;

    /// Lowest 8 bits.
    fn low_byte(self) -> u8;

    /// Integer addition modulo 2^w.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Integer subtraction modulo 2^w.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Integer multiplication modulo 2^w.
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Read one word from exactly `BYTES` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Write this word into exactly `BYTES` bytes, little-endian.
    fn write_le(self, out: &mut [u8]);

    /// Process-wide gradient table and noise constants for this width.
    fn tables() -> &'static WidthTables<Self>;
}

macro_rules! impl_word {
    ($ty:ty, $standard:expr) => {
        impl Word for $ty {
            const BITS: u32 = <$ty>::BITS;
            const BYTES: usize = std::mem::size_of::<$ty>();
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$ty>::MAX;
            const STANDARD_REDUCTION: Self = $standard;

            type Bytes = [u8; ELEMENTS * std::mem::size_of::<$ty>()];

            #[inline]
            fn zero_bytes() -> Self::Bytes {
                [0u8; ELEMENTS * std::mem::size_of::<$ty>()]
            }

            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $ty
            }

            #[inline]
            fn from_u128(value: u128) -> Self {
                value as $ty
            }

            #[inline]
            fn to_u128(self) -> u128 {
                self as u128
            }

            #[inline]
            fn low_byte(self) -> u8 {
                self as u8
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$ty>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_le_bytes(buf)
            }

            #[inline]
            fn write_le(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }

            fn tables() -> &'static WidthTables<Self> {
                static TABLES: OnceLock<WidthTables<$ty>> = OnceLock::new();
                TABLES.get_or_init(WidthTables::build)
            }
        }
    };
}

// x^8 + x^4 + x^3 + x + 1
impl_word!(u8, 0x1B);
// x^32 + x^7 + x^3 + x^2 + 1
impl_word!(u32, 0x8D);
// x^64 + x^4 + x^3 + x + 1
impl_word!(u64, 0x1B);

/// Split a key or block buffer into its `ELEMENTS` field elements.
pub fn elements_from_bytes<W: Word>(bytes: &W::Bytes) -> [W; ELEMENTS] {
    let raw = bytes.as_ref();
    std::array::from_fn(|i| W::from_le_slice(&raw[i * W::BYTES..(i + 1) * W::BYTES]))
}

/// Pack `ELEMENTS` field elements back into a buffer.
pub fn elements_to_bytes<W: Word>(elements: &[W; ELEMENTS]) -> W::Bytes {
    let mut bytes = W::zero_bytes();
    for (chunk, element) in bytes.as_mut().chunks_exact_mut(W::BYTES).zip(elements) {
        element.write_le(chunk);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        assert_eq!(u8::zero_bytes().len(), 8);
        assert_eq!(u32::zero_bytes().len(), 32);
        assert_eq!(u64::zero_bytes().len(), 64);
    }

    #[test]
    fn test_elements_little_endian() {
        let mut bytes = u32::zero_bytes();
        bytes[0] = 0x01;
        bytes[3] = 0x80;
        bytes[4] = 0xFF;
        let elements = elements_from_bytes::<u32>(&bytes);
        assert_eq!(elements[0], 0x8000_0001);
        assert_eq!(elements[1], 0x0000_00FF);
        assert_eq!(elements_to_bytes::<u32>(&elements), bytes);
    }
}
