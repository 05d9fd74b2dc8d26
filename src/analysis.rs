//! Diffusion and round-trip measurements.
//!
//! These back the `vectors` and `avalanche` commands and the statistical
//! tests; they are not part of the cipher itself.

use bitvec::prelude::*;

use crate::codec::Simplect;
use crate::field::Word;

/// 64-bit key patterns used for round-trip vectors.
pub const REFERENCE_PATTERNS: [u64; 12] = [
    0,
    0xFFFF_FFFF_FFFF_FFFF,
    0xF0F0_F0F0_F0F0_F0F0,
    0x0F0F_0F0F_0F0F_0F0F,
    0xEEEE_EEEE_EEEE_EEEE,
    0x1111_1111_1111_1111,
    0x0123_4567_89AB_CDEF,
    0xFEDC_BA98_7654_3210,
    0x1234_5678_7654_3210,
    0x8765_4321_0123_4567,
    0x1,
    0x2,
];

/// Reference keys for `W`: each pattern's little-endian bytes repeated
/// across the key.
pub fn reference_keys<W: Word>() -> Vec<W::Bytes> {
    REFERENCE_PATTERNS
        .iter()
        .map(|pattern| {
            let mut key = W::zero_bytes();
            for chunk in key.as_mut().chunks_mut(8) {
                chunk.copy_from_slice(&pattern.to_le_bytes()[..chunk.len()]);
            }
            key
        })
        .collect()
}

/// Number of bits that differ between two equal-length buffers.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    let diff: Vec<u8> = a.iter().zip(b).map(|(x, y)| x ^ y).collect();
    diff.view_bits::<Lsb0>().count_ones()
}

/// Result of encoding a block and encoding the ciphertext again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip<W: Word> {
    /// Key used for both calls.
    pub key: W::Bytes,
    /// Input block.
    pub plaintext: W::Bytes,
    /// Output of the first call.
    pub ciphertext: W::Bytes,
    /// Output of the second call.
    pub recovered: W::Bytes,
}

impl<W: Word> RoundTrip<W> {
    /// Whether the second call restored the input.
    pub fn is_restored(&self) -> bool {
        self.recovered == self.plaintext
    }
}

/// Encode `block` under `key`, then encode the result under the same key.
pub fn round_trip<W: Word>(
    cipher: &Simplect<W>,
    key: &W::Bytes,
    block: &W::Bytes,
) -> RoundTrip<W> {
    let mut ciphertext = *block;
    cipher.encode(key, &mut ciphertext);
    let mut recovered = ciphertext;
    cipher.encode(key, &mut recovered);
    RoundTrip {
        key: *key,
        plaintext: *block,
        ciphertext,
        recovered,
    }
}

/// Output bit changes caused by single-bit key flips.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvalancheReport {
    /// Bits per output block.
    pub block_bits: usize,
    /// Changed output bits for each flipped key bit, in key-bit order.
    pub per_trial: Vec<usize>,
}

impl AvalancheReport {
    /// Number of flips performed.
    pub fn trials(&self) -> usize {
        self.per_trial.len()
    }

    /// Sum of changed bits over all trials.
    pub fn total(&self) -> usize {
        self.per_trial.iter().sum()
    }

    /// Mean changed bits per trial.
    pub fn mean(&self) -> f64 {
        if self.per_trial.is_empty() {
            return 0.0;
        }
        self.total() as f64 / self.trials() as f64
    }

    /// Mean changed bits as a fraction of the block (ideal: 0.5).
    pub fn fraction(&self) -> f64 {
        if self.block_bits == 0 {
            return 0.0;
        }
        self.mean() / self.block_bits as f64
    }

    /// Fewest changed bits in any trial.
    pub fn min(&self) -> usize {
        self.per_trial.iter().copied().min().unwrap_or(0)
    }

    /// Most changed bits in any trial.
    pub fn max(&self) -> usize {
        self.per_trial.iter().copied().max().unwrap_or(0)
    }
}

/// Flip each key bit in turn (restoring it afterwards) and measure how far
/// the ciphertext of `block` moves from the unflipped ciphertext.
pub fn key_avalanche<W: Word>(
    cipher: &Simplect<W>,
    key: &W::Bytes,
    block: &W::Bytes,
) -> AvalancheReport {
    let mut baseline = *block;
    cipher.encode(key, &mut baseline);

    let block_bits = block.as_ref().len() * 8;
    let key_bits = key.as_ref().len() * 8;
    let mut per_trial = Vec::with_capacity(key_bits);
    let mut flipped = *key;

    for bit in 0..key_bits {
        toggle_bit(flipped.as_mut(), bit);
        let mut output = *block;
        cipher.encode(&flipped, &mut output);
        toggle_bit(flipped.as_mut(), bit);

        let distance = hamming_distance(baseline.as_ref(), output.as_ref());
        tracing::trace!(bit, distance, "avalanche trial");
        per_trial.push(distance);
    }

    let report = AvalancheReport {
        block_bits,
        per_trial,
    };
    tracing::debug!(
        trials = report.trials(),
        mean = report.mean(),
        "key avalanche measured"
    );
    report
}

fn toggle_bit(bytes: &mut [u8], bit: usize) {
    let bits = bytes.view_bits_mut::<Lsb0>();
    let current = bits[bit];
    bits.set(bit, !current);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_distance() {
        assert_eq!(hamming_distance(&[0x00, 0xFF], &[0x00, 0xFF]), 0);
        assert_eq!(hamming_distance(&[0x00, 0x00], &[0x01, 0x80]), 2);
        assert_eq!(hamming_distance(&[0xF0], &[0x0F]), 8);
    }

    #[test]
    fn test_toggle_bit_is_lsb_first() {
        let mut bytes = [0u8; 2];
        toggle_bit(&mut bytes, 0);
        toggle_bit(&mut bytes, 9);
        assert_eq!(bytes, [0x01, 0x02]);
        toggle_bit(&mut bytes, 9);
        assert_eq!(bytes, [0x01, 0x00]);
    }

    #[test]
    fn test_reference_keys_repeat_pattern() {
        let keys = reference_keys::<u32>();
        assert_eq!(keys.len(), REFERENCE_PATTERNS.len());
        let pattern = 0x0123_4567_89AB_CDEFu64.to_le_bytes();
        for chunk in keys[6].chunks(8) {
            assert_eq!(chunk, &pattern[..]);
        }
        assert_eq!(reference_keys::<u8>()[10], [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_report_statistics() {
        let report = AvalancheReport {
            block_bits: 64,
            per_trial: vec![30, 34, 32],
        };
        assert_eq!(report.trials(), 3);
        assert_eq!(report.total(), 96);
        assert_eq!(report.min(), 30);
        assert_eq!(report.max(), 34);
        assert!((report.mean() - 32.0).abs() < f64::EPSILON);
        assert!((report.fraction() - 0.5).abs() < f64::EPSILON);
    }
}
