//! Gradient vectors and the permutation table.

use std::sync::OnceLock;

use crate::field::{BinaryField, Word};

/// Number of gradient vectors.
pub const GRADIENT_COUNT: usize = 12;

/// Length of the doubled permutation table.
pub const PERMUTATION_LEN: usize = 512;

/// Edge midpoints of the cube, as signs per axis.
const GRADIENT_SIGNS: [[i8; 3]; GRADIENT_COUNT] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

/// Ken Perlin's reference permutation of 0..=255.
const PERMUTATION_SEED: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The seed permutation repeated twice, built on first use.
pub fn permutation() -> &'static [u8; PERMUTATION_LEN] {
    static PERMUTATION: OnceLock<[u8; PERMUTATION_LEN]> = OnceLock::new();
    PERMUTATION.get_or_init(|| {
        let mut table = [0u8; PERMUTATION_LEN];
        for (i, &value) in PERMUTATION_SEED.iter().enumerate() {
            table[i] = value;
            table[i + 256] = value;
        }
        table
    })
}

/// Twelve gradient vectors mapped into the field.
///
/// Axis values: `+1 → MAX`, `-1 → MAX >> 1`, `0 → 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientTable<W: Word> {
    vectors: [[W; 3]; GRADIENT_COUNT],
}

impl<W: Word> GradientTable<W> {
    /// Fill the table from the sign template.
    pub fn build() -> Self {
        let axis = |sign: i8| match sign {
            0 => W::ZERO,
            1 => W::MAX,
            _ => W::MAX >> 1,
        };
        let vectors = GRADIENT_SIGNS.map(|signs| signs.map(axis));
        Self { vectors }
    }

    /// Gradient `index` (must be below [`GRADIENT_COUNT`]).
    #[inline]
    pub fn get(&self, index: usize) -> &[W; 3] {
        &self.vectors[index]
    }

    /// `gx·x ⊕ gy·y ⊕ gz·z` for gradient `index`.
    #[inline]
    pub fn dot(&self, field: &BinaryField<W>, index: usize, x: W, y: W, z: W) -> W {
        let [gx, gy, gz] = *self.get(index);
        field.mul(gx, x) ^ field.mul(gy, y) ^ field.mul(gz, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Modulus;

    #[test]
    fn test_permutation_is_bijective_and_doubled() {
        let table = permutation();
        let mut seen = [false; 256];
        for &value in &table[..256] {
            assert!(!seen[value as usize], "duplicate entry {}", value);
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(&table[..256], &table[256..]);
        // The last seed entry lands in both halves.
        assert_eq!(table[255], 180);
        assert_eq!(table[511], 180);
    }

    #[test]
    fn test_gradient_axis_values() {
        let table = GradientTable::<u8>::build();
        assert_eq!(table.get(0), &[0xFF, 0xFF, 0x00]);
        assert_eq!(table.get(1), &[0x7F, 0xFF, 0x00]);
        assert_eq!(table.get(11), &[0x00, 0x7F, 0x7F]);
        for index in 0..GRADIENT_COUNT {
            assert_eq!(
                table.get(index).iter().filter(|&&axis| axis == 0).count(),
                1,
                "gradient {} should have exactly one zero axis",
                index
            );
        }
    }

    #[test]
    fn test_dot_skips_zero_axis() {
        let field = BinaryField::<u32>::new(Modulus::Standard);
        let table = GradientTable::<u32>::build();
        // Gradient 0 is (MAX, MAX, 0): z never contributes.
        let a = table.dot(&field, 0, 5, 9, 0);
        let b = table.dot(&field, 0, 5, 9, 0xFFFF_0000);
        assert_eq!(a, b);
        assert_eq!(a, field.mul(u32::MAX, 5) ^ field.mul(u32::MAX, 9));
    }
}
