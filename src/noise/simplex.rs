//! Three-dimensional noise over GF(2^w).
//!
//! Follows the shape of 3-D simplex noise with every real-number operation
//! replaced by its field counterpart: subtraction and addition become XOR,
//! products become field multiplications. Corner ordering still compares
//! the offsets as plain integers.

use super::{permutation, GradientTable, NoiseConstants, GRADIENT_COUNT, PERMUTATION_LEN};
use crate::config::Mode;
use crate::field::{BinaryField, Word};

/// The noise function for one width and mode.
#[derive(Debug, Clone, Copy)]
pub struct NoiseField<W: Word> {
    field: BinaryField<W>,
    constants: NoiseConstants<W>,
    gradients: &'static GradientTable<W>,
    permutation: &'static [u8; PERMUTATION_LEN],
}

impl<W: Word> NoiseField<W> {
    /// Bind the process-wide tables for `mode`.
    pub fn new(mode: Mode) -> Self {
        let profile = mode.profile();
        let tables = W::tables();
        Self {
            field: BinaryField::new(profile.modulus),
            constants: *tables.constants(mode),
            gradients: tables.gradients(),
            permutation: permutation(),
        }
    }

    /// Field the noise is evaluated in.
    pub fn field(&self) -> &BinaryField<W> {
        &self.field
    }

    /// Constants in use.
    pub fn constants(&self) -> &NoiseConstants<W> {
        &self.constants
    }

    /// Evaluate the noise at `(x, y, z)`.
    pub fn noise3d(&self, x: W, y: W, z: W) -> W {
        let field = &self.field;
        let c = &self.constants;

        // Skew into lattice space.
        let s = field.mul(x ^ y ^ z, c.skew);
        let (i, j, k) = (x ^ s, y ^ s, z ^ s);

        // Unskew back to find the cell origin and the offset from it.
        let t = field.mul(i ^ j ^ k, c.unskew);
        let x0 = x ^ i ^ t;
        let y0 = y ^ j ^ t;
        let z0 = z ^ k ^ t;

        let (first, second) = traversal_offsets(x0, y0, z0, c.unit);
        let origin = [x0, y0, z0];
        let last_step = W::MAX ^ c.double_unskew ^ c.unskew;

        let corners = [
            origin,
            [
                x0 ^ first[0] ^ c.unskew,
                y0 ^ first[1] ^ c.unskew,
                z0 ^ first[2] ^ c.unskew,
            ],
            [
                x0 ^ second[0] ^ c.double_unskew,
                y0 ^ second[1] ^ c.double_unskew,
                z0 ^ second[2] ^ c.double_unskew,
            ],
            [x0 ^ last_step, y0 ^ last_step, z0 ^ last_step],
        ];

        let lattice = [i.low_byte(), j.low_byte(), k.low_byte()];
        let offsets = [
            [0u8; 3],
            first.map(W::low_byte),
            second.map(W::low_byte),
            [1u8; 3],
        ];

        corners
            .iter()
            .zip(offsets.iter())
            .fold(W::ZERO, |acc, (corner, offset)| {
                let gradient = self.gradient_index(lattice, *offset);
                acc ^ self.contribution(corner, gradient)
            })
    }

    /// Gradient selected for a corner by nested permutation lookups.
    fn gradient_index(&self, lattice: [u8; 3], offset: [u8; 3]) -> usize {
        let perm = self.permutation;
        let [ii, jj, kk] = lattice;
        let [oi, oj, ok] = offset;
        // Masking to a byte keeps every index inside the first 256 entries.
        let h = perm[(kk ^ ok) as usize];
        let h = perm[(jj ^ oj ^ h) as usize];
        let hashed = perm[(ii ^ oi ^ h) as usize];
        hashed as usize % GRADIENT_COUNT
    }

    /// Falloff-weighted gradient contribution of one corner.
    fn contribution(&self, corner: &[W; 3], gradient: usize) -> W {
        let field = &self.field;
        let [x, y, z] = *corner;
        let falloff = self.constants.mid ^ field.square(x) ^ field.square(y) ^ field.square(z);
        let falloff = field.square(field.square(falloff));
        field.mul(falloff, self.gradients.dot(field, gradient, x, y, z))
    }
}

/// Offsets of the second and third simplex corners.
///
/// The ordering of `x0`, `y0`, `z0` as integers picks one of six traversal
/// orders; `unit` marks a step along an axis.
fn traversal_offsets<W: Word>(x0: W, y0: W, z0: W, unit: W) -> ([W; 3], [W; 3]) {
    let o = W::ZERO;
    let u = unit;
    if x0 >= y0 {
        if y0 >= z0 {
            ([u, o, o], [u, u, o]) // X Y Z
        } else if x0 >= z0 {
            ([u, o, o], [u, o, u]) // X Z Y
        } else {
            ([o, o, u], [u, o, u]) // Z X Y
        }
    } else if y0 < z0 {
        ([o, o, u], [o, u, u]) // Z Y X
    } else if x0 < z0 {
        ([o, u, o], [o, u, u]) // Y Z X
    } else {
        ([o, u, o], [u, u, o]) // Y X Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic() {
        for mode in [Mode::Feedback, Mode::Keyed] {
            let noise = NoiseField::<u32>::new(mode);
            let a = noise.noise3d(0x1234_5678, 0x9ABC_DEF0, 42);
            let b = NoiseField::<u32>::new(mode).noise3d(0x1234_5678, 0x9ABC_DEF0, 42);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_modes_give_distinct_noise() {
        let feedback = NoiseField::<u64>::new(Mode::Feedback);
        let keyed = NoiseField::<u64>::new(Mode::Keyed);
        let differing = (0u64..16)
            .filter(|&z| feedback.noise3d(7, 11, z) != keyed.noise3d(7, 11, z))
            .count();
        assert!(differing > 0);
    }

    #[test]
    fn test_noise_covers_both_halves() {
        let noise = NoiseField::<u8>::new(Mode::Feedback);
        let mid = noise.constants().mid;
        let mut above = 0;
        let mut below = 0;
        for x in (0u8..=255).step_by(7) {
            for z in 0u8..8 {
                if noise.noise3d(x, x.rotate_left(3), z) > mid {
                    above += 1;
                } else {
                    below += 1;
                }
            }
        }
        assert!(above > 0 && below > 0, "above={} below={}", above, below);
    }

    #[test]
    fn test_gradient_hashing_is_xor_masked_in_both_modes() {
        let perm = permutation();
        let feedback = NoiseField::<u8>::new(Mode::Feedback);
        let keyed = NoiseField::<u8>::new(Mode::Keyed);
        for lattice in [[0u8, 0, 0], [255, 255, 255], [17, 200, 3], [128, 1, 254]] {
            for offset in [[0u8, 0, 0], [1, 0, 1], [1, 1, 1], [255, 255, 0]] {
                let [ii, jj, kk] = lattice;
                let [oi, oj, ok] = offset;
                let h = perm[(kk ^ ok) as usize];
                let h = perm[(jj ^ oj ^ h) as usize];
                let expected = perm[(ii ^ oi ^ h) as usize] as usize % GRADIENT_COUNT;
                assert_eq!(keyed.gradient_index(lattice, offset), expected);
                assert_eq!(feedback.gradient_index(lattice, offset), expected);
            }
        }
    }

    #[test]
    fn test_traversal_orders() {
        let u = 0xFFu8;
        assert_eq!(traversal_offsets(3u8, 2, 1, u), ([u, 0, 0], [u, u, 0]));
        assert_eq!(traversal_offsets(3u8, 1, 2, u), ([u, 0, 0], [u, 0, u]));
        assert_eq!(traversal_offsets(2u8, 1, 3, u), ([0, 0, u], [u, 0, u]));
        assert_eq!(traversal_offsets(1u8, 2, 3, u), ([0, 0, u], [0, u, u]));
        assert_eq!(traversal_offsets(1u8, 3, 2, u), ([0, u, 0], [0, u, u]));
        assert_eq!(traversal_offsets(2u8, 3, 1, u), ([0, u, 0], [u, u, 0]));
    }

    #[test]
    fn test_extreme_coordinates_stay_in_table() {
        for mode in [Mode::Feedback, Mode::Keyed] {
            let noise = NoiseField::<u64>::new(mode);
            for &v in &[0u64, 1, u64::MAX, u64::MAX - 1, 0xFF, 0x100] {
                noise.noise3d(v, v, v);
                noise.noise3d(v, !v, v);
                noise.noise3d(u64::MAX, 0, v);
            }
        }
    }
}
