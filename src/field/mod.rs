//! Binary field arithmetic over GF(2^w)
//!
//! Elements are fixed-width words (w ∈ {8, 32, 64}) read as polynomials
//! over GF(2). Addition is XOR; multiplication is carry-less with reduction
//! by a fixed modulus of degree w.

mod binary;
mod word;

pub use binary::{BinaryField, Modulus};
pub use word::{elements_from_bytes, elements_to_bytes, Word, ELEMENTS};
