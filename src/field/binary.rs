//! GF(2^w) multiplication, inversion and irreducibility checking.

use super::Word;

/// Choice of reduction polynomial for a width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modulus {
    /// `x^w + 1010…1011`: every odd bit below w plus the constant term.
    ///
    /// This pattern has an even number of terms, so `x + 1` always divides
    /// it. The quotient ring still multiplies fine but 3 and 6 have no
    /// inverse.
    Alternating,
    /// A low-weight irreducible polynomial (see [`Word::STANDARD_REDUCTION`]).
    Standard,
}

impl Modulus {
    /// Low w bits of the modulus (the leading `x^w` term is implicit).
    pub fn reduction<W: Word>(self) -> W {
        match self {
            Modulus::Alternating => {
                let mut word = W::ONE;
                let mut bit = 1;
                while bit < W::BITS {
                    word = word | (W::ONE << bit);
                    bit += 2;
                }
                word
            }
            Modulus::Standard => W::STANDARD_REDUCTION,
        }
    }
}

/// Binary extension field GF(2^w) (or quotient ring, for a reducible modulus)
///
/// Uses the shift-and-add (Russian peasant) algorithm with reduction by the
/// modulus whenever the top bit shifts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryField<W: Word> {
    reduction: W,
}

impl<W: Word> BinaryField<W> {
    /// Create the field for `modulus` at width `W::BITS`.
    pub fn new(modulus: Modulus) -> Self {
        Self {
            reduction: modulus.reduction::<W>(),
        }
    }

    /// Low w bits of the modulus.
    pub fn reduction(&self) -> W {
        self.reduction
    }

    /// Add two elements (XOR for characteristic 2)
    #[inline]
    pub fn add(&self, a: W, b: W) -> W {
        a ^ b
    }

    /// Multiply two elements.
    ///
    /// Runs exactly w rounds regardless of the operands.
    #[inline]
    pub fn mul(&self, a: W, b: W) -> W {
        let mut product = W::ZERO;
        let mut a = a;
        let mut b = b;
        for _ in 0..W::BITS {
            if b & W::ONE != W::ZERO {
                product ^= a;
            }
            let carry = (a >> (W::BITS - 1)) != W::ZERO;
            a = a << 1;
            if carry {
                a ^= self.reduction;
            }
            b = b >> 1;
        }
        product
    }

    /// `a · a`
    #[inline]
    pub fn square(&self, a: W) -> W {
        self.mul(a, a)
    }

    /// Multiplicative inverse by extended Euclid over GF(2)[x].
    ///
    /// Returns `None` for zero, and for any element sharing a factor with a
    /// reducible modulus.
    pub(crate) fn invert(&self, a: W) -> Option<W> {
        if a == W::ZERO {
            return None;
        }

        let (mut r0, mut r1) = (self.modulus_poly(), a.to_u128());
        let (mut s0, mut s1) = (0u128, 1u128);

        while r1 != 0 {
            while r0 != 0 && degree(r0) >= degree(r1) {
                let shift = degree(r0) - degree(r1);
                r0 ^= r1 << shift;
                s0 ^= s1 << shift;
            }
            std::mem::swap(&mut r0, &mut r1);
            std::mem::swap(&mut s0, &mut s1);
        }

        // r0 is now gcd(modulus, a) and s0 · a ≡ r0
        (r0 == 1).then(|| W::from_u128(s0))
    }

    /// Rabin's irreducibility test.
    ///
    /// w is a power of two, so the only maximal proper divisor to check is
    /// w/2: P is irreducible iff `x^(2^w) ≡ x (mod P)` and
    /// `gcd(x^(2^(w/2)) - x, P) = 1`.
    pub fn is_irreducible(&self) -> bool {
        let modulus = self.modulus_poly();
        let x = 0b10u128;

        let frobenius = |rounds: u32| {
            let mut acc = x;
            for _ in 0..rounds {
                acc = clmul_mod(acc, acc, modulus);
            }
            acc
        };

        if frobenius(W::BITS) != x {
            return false;
        }
        poly_gcd(modulus, frobenius(W::BITS / 2) ^ x) == 1
    }

    /// Full modulus including the `x^w` term.
    fn modulus_poly(&self) -> u128 {
        (1u128 << W::BITS) | self.reduction.to_u128()
    }
}

/// Degree of a non-zero polynomial.
#[inline]
fn degree(p: u128) -> u32 {
    127 - p.leading_zeros()
}

/// `a · b mod m` for `a, b` already reduced below `deg(m) <= 64`.
fn clmul_mod(a: u128, b: u128, m: u128) -> u128 {
    let top = degree(m);
    let mut a = a;
    let mut b = b;
    let mut result = 0u128;
    while b != 0 {
        if b & 1 == 1 {
            result ^= a;
        }
        b >>= 1;
        a <<= 1;
        if (a >> top) & 1 == 1 {
            a ^= m;
        }
    }
    result
}

fn poly_rem(a: u128, m: u128) -> u128 {
    let top = degree(m);
    let mut a = a;
    while a != 0 && degree(a) >= top {
        a ^= m << (degree(a) - top);
    }
    a
}

fn poly_gcd(a: u128, b: u128) -> u128 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = poly_rem(a, b);
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alternating_reduction_words() {
        assert_eq!(Modulus::Alternating.reduction::<u8>(), 0xAB);
        assert_eq!(Modulus::Alternating.reduction::<u32>(), 0xAAAA_AAAB);
        assert_eq!(
            Modulus::Alternating.reduction::<u64>(),
            0xAAAA_AAAA_AAAA_AAAB
        );
    }

    #[test]
    fn test_mul_identity_and_zero() {
        let field = BinaryField::<u8>::new(Modulus::Standard);
        for a in 0u8..=255 {
            assert_eq!(field.mul(a, 1), a);
            assert_eq!(field.mul(1, a), a);
            assert_eq!(field.mul(a, 0), 0);
        }
    }

    #[test]
    fn test_matches_rijndael_multiply() {
        // Standard modulus at w = 8 is the AES polynomial 0x11B.
        let field = BinaryField::<u8>::new(Modulus::Standard);
        assert_eq!(field.mul(0x57, 0x83), 0xC1);
        assert_eq!(field.mul(0x57, 0x13), 0xFE);
    }

    #[test]
    fn test_reduction_uses_top_bit() {
        let field = BinaryField::<u8>::new(Modulus::Alternating);
        // 0x80 · x shifts the top bit out and folds in 0xAB.
        assert_eq!(field.mul(0x80, 0x02), 0xAB);
        // 0x10 · x must not reduce.
        assert_eq!(field.mul(0x10, 0x02), 0x20);
    }

    #[test]
    fn test_gf256_inverse_table() {
        let field = BinaryField::<u8>::new(Modulus::Standard);
        assert_eq!(field.invert(0), None);
        for a in 1u8..=255 {
            let inv = field.invert(a).expect("standard modulus is irreducible");
            assert_eq!(field.mul(a, inv), 1, "a={} inv={}", a, inv);
        }
    }

    #[test]
    fn test_wide_inverses() {
        let f32 = BinaryField::<u32>::new(Modulus::Standard);
        for a in [1u32, 2, 3, 6, 0xDEAD_BEEF, u32::MAX] {
            let inv = f32.invert(a).expect("invertible");
            assert_eq!(f32.mul(a, inv), 1);
        }
        let f64 = BinaryField::<u64>::new(Modulus::Standard);
        for a in [1u64, 3, 6, 0x0123_4567_89AB_CDEF, u64::MAX] {
            let inv = f64.invert(a).expect("invertible");
            assert_eq!(f64.mul(a, inv), 1);
        }
    }

    #[test]
    fn test_standard_moduli_are_irreducible() {
        assert!(BinaryField::<u8>::new(Modulus::Standard).is_irreducible());
        assert!(BinaryField::<u32>::new(Modulus::Standard).is_irreducible());
        assert!(BinaryField::<u64>::new(Modulus::Standard).is_irreducible());
    }

    #[test]
    fn test_alternating_moduli_are_reducible() {
        let f8 = BinaryField::<u8>::new(Modulus::Alternating);
        assert!(!f8.is_irreducible());
        // x + 1 divides the modulus, so 3 is not a unit.
        assert_eq!(f8.invert(3), None);
        assert!(!BinaryField::<u32>::new(Modulus::Alternating).is_irreducible());
        assert!(!BinaryField::<u64>::new(Modulus::Alternating).is_irreducible());
    }

    #[test]
    fn test_known_reducible_rejected() {
        // x^8 + x^4 + x^3 + x^2 + 1 is irreducible; x^8 + 1 = (x + 1)^8 is not.
        let irreducible = BinaryField::<u8> { reduction: 0x1D };
        assert!(irreducible.is_irreducible());
        let reducible = BinaryField::<u8> { reduction: 0x01 };
        assert!(!reducible.is_irreducible());
    }

    proptest! {
        #[test]
        fn gf2_32_every_nonzero_element_inverts(a in 1u32..=u32::MAX) {
            let field = BinaryField::<u32>::new(Modulus::Standard);
            let inv = field.invert(a);
            prop_assert!(inv.is_some(), "no inverse for {:#x}", a);
            prop_assert_eq!(field.mul(a, inv.unwrap()), 1);
        }

        #[test]
        fn gf2_64_every_nonzero_element_inverts(a in 1u64..=u64::MAX) {
            let field = BinaryField::<u64>::new(Modulus::Standard);
            let inv = field.invert(a);
            prop_assert!(inv.is_some(), "no inverse for {:#x}", a);
            prop_assert_eq!(field.mul(a, inv.unwrap()), 1);
        }
    }
}
