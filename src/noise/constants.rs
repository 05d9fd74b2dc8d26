//! Skew and unskew constants.

use crate::config::Mode;
use crate::field::{BinaryField, Word};

/// Fixed constants steering one noise evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseConstants<W: Word> {
    /// Skew factor applied to `x ⊕ y ⊕ z`.
    pub skew: W,
    /// Unskew factor, also the first corner offset.
    pub unskew: W,
    /// Second corner offset.
    pub double_unskew: W,
    /// Unit step written into the corner traversal offsets.
    pub unit: W,
    /// `MAX >> 1`: falloff bias and the block-bit threshold.
    pub mid: W,
}

impl<W: Word> NoiseConstants<W> {
    /// Constants for `mode`.
    ///
    /// Panics if the keyed modulus for this width is not irreducible.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Feedback => Self::shifted(),
            Mode::Keyed => Self::derived(&BinaryField::new(mode.profile().modulus)),
        }
    }

    /// Reference constants: `MAX >> 1` and `MAX >> 2`, with unit offset `MAX`.
    fn shifted() -> Self {
        let unskew = W::MAX >> 2;
        Self {
            skew: W::MAX >> 1,
            unskew,
            double_unskew: unskew << 1,
            unit: W::MAX,
            mid: W::MAX >> 1,
        }
    }

    /// `MAX · 3⁻¹` and `MAX · 6⁻¹` in the field, with unit offset `1`.
    fn derived(field: &BinaryField<W>) -> Self {
        assert!(
            field.is_irreducible(),
            "modulus {:?} for w={} is not irreducible",
            field.reduction(),
            W::BITS
        );
        let inverse = |divisor: u64| {
            field
                .invert(W::from_u64(divisor))
                .expect("every non-zero element is a unit of an irreducible field")
        };
        let unskew = field.mul(W::MAX, inverse(6));
        Self {
            skew: field.mul(W::MAX, inverse(3)),
            unskew,
            double_unskew: field.mul(unskew, W::from_u64(2)),
            unit: W::ONE,
            mid: W::MAX >> 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Modulus;

    #[test]
    fn test_shifted_constants() {
        let constants = NoiseConstants::<u8>::for_mode(Mode::Feedback);
        assert_eq!(constants.skew, 0x7F);
        assert_eq!(constants.unskew, 0x3F);
        assert_eq!(constants.double_unskew, 0x7E);
        assert_eq!(constants.unit, 0xFF);
        assert_eq!(constants.mid, 0x7F);
    }

    #[test]
    fn test_derived_constants_scale_back() {
        let field = BinaryField::<u32>::new(Modulus::Standard);
        let constants = NoiseConstants::<u32>::for_mode(Mode::Keyed);
        assert_eq!(field.mul(constants.skew, 3), u32::MAX);
        assert_eq!(field.mul(constants.unskew, 6), u32::MAX);
        assert_eq!(constants.unit, 1);
    }
}
