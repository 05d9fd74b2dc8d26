//! Block encoding loop
//!
//! Both modes derive a keystream from the key alone and XOR it into the
//! block, so encoding twice with the same (unmodified) key restores the
//! block.
//!
//! - Feedback: one noise bit per block bit. Each position's mask is folded
//!   into the next byte of a running copy of the key, so positions must be
//!   processed in order.
//! - Keyed: one noise element per block element, sampled along a curve fixed
//!   by the key for the whole call.

use crate::config::{Mode, SimplectConfig};
use crate::curve::{ControlPolygon, CurveMapper};
use crate::field::{elements_from_bytes, elements_to_bytes, Word, ELEMENTS};
use crate::noise::NoiseField;

/// Key state carried from one block position to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningKey<W: Word> {
    bytes: W::Bytes,
}

impl<W: Word> RunningKey<W> {
    /// Start from a copy of `key`.
    pub fn new(key: &W::Bytes) -> Self {
        Self { bytes: *key }
    }

    /// Current key viewed as field elements.
    pub fn elements(&self) -> [W; ELEMENTS] {
        elements_from_bytes::<W>(&self.bytes)
    }

    /// Key byte at `position`.
    pub fn byte(&self, position: usize) -> u8 {
        self.bytes.as_ref()[position]
    }

    /// Fold the mask of `position` into the following key byte.
    pub fn absorb(&mut self, position: usize, mask: u8) {
        let bytes = self.bytes.as_mut();
        let next = (position + 1) % bytes.len();
        bytes[next] ^= mask;
    }

    /// Key state after the last absorbed position.
    pub fn into_bytes(self) -> W::Bytes {
        self.bytes
    }
}

/// A Simplect instance for element word `W`.
#[derive(Debug, Clone, Copy)]
pub struct Simplect<W: Word> {
    config: SimplectConfig,
    noise: NoiseField<W>,
    curve: CurveMapper<W>,
}

/// 64-bit key and block, 8-bit field.
pub type Simplect64 = Simplect<u8>;
/// 256-bit key and block, 32-bit field.
pub type Simplect256 = Simplect<u32>;
/// 512-bit key and block, 64-bit field.
pub type Simplect512 = Simplect<u64>;

impl<W: Word> Simplect<W> {
    /// Key and block length in bytes.
    pub const BLOCK_BYTES: usize = ELEMENTS * W::BYTES;

    /// Build an instance, initialising the shared tables on first use.
    pub fn new(config: SimplectConfig) -> Self {
        let noise = NoiseField::new(config.mode);
        let curve = CurveMapper::new(config.profile().curve, *noise.field());
        Self {
            config,
            noise,
            curve,
        }
    }

    /// Reference key-feedback construction.
    pub fn feedback() -> Self {
        Self::new(SimplectConfig::feedback())
    }

    /// Revised keyed-curve construction.
    pub fn keyed() -> Self {
        Self::new(SimplectConfig::keyed())
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimplectConfig {
        &self.config
    }

    /// Transform `block` in place; `key` is left untouched.
    pub fn encode(&self, key: &W::Bytes, block: &mut W::Bytes) {
        match self.config.mode {
            Mode::Feedback => {
                let mut running = RunningKey::new(key);
                self.encode_feedback(&mut running, block);
            }
            Mode::Keyed => self.encode_keyed(key, block),
        }
    }

    /// Transform `block` in place.
    ///
    /// In feedback mode `key` is advanced to the running key state after
    /// the last position; decoding needs the key as it was before this call.
    /// In keyed mode `key` is not modified.
    pub fn encode_block(&self, key: &mut W::Bytes, block: &mut W::Bytes) {
        match self.config.mode {
            Mode::Feedback => {
                let mut running = RunningKey::new(key);
                self.encode_feedback(&mut running, block);
                *key = running.into_bytes();
            }
            Mode::Keyed => self.encode_keyed(key, block),
        }
    }

    /// The mask stream XORed into any block under `key`.
    pub fn keystream(&self, key: &W::Bytes) -> W::Bytes {
        let mut stream = W::zero_bytes();
        self.encode(key, &mut stream);
        stream
    }

    /// Apply [`encode`](Self::encode) to each block under the same unmodified
    /// key.
    ///
    /// This is not a chaining mode. Every block receives the identical
    /// keystream, so the XOR of two outputs equals the XOR of their inputs.
    /// It is a batch form of `encode`, kept for the benchmarks and diagnostics.
    pub fn encode_blocks(&self, key: &W::Bytes, blocks: &mut [W::Bytes]) {
        let stream = self.keystream(key);
        for block in blocks.iter_mut() {
            for (byte, mask) in block.as_mut().iter_mut().zip(stream.as_ref()) {
                *byte ^= mask;
            }
        }
        tracing::debug!(blocks = blocks.len(), mode = %self.config.mode, "encoded blocks");
    }

    fn encode_feedback(&self, running: &mut RunningKey<W>, block: &mut W::Bytes) {
        let block = block.as_mut();
        let positions = block.len();
        let frac = W::MAX / W::from_u64((positions * 8) as u64);

        for (c, byte) in block.iter_mut().enumerate() {
            let polygon = ControlPolygon::interleaved(&running.elements());
            let base = frac.wrapping_mul(W::from_u64(c as u64));

            let mut mask = 0u8;
            for d in 0..8usize {
                // Only the last sub-step advances past the position's start.
                let step = W::from_u64(((d + 1) / 8) as u64).wrapping_mul(frac);
                let (x, y) = self.curve.point_at(&polygon, base.wrapping_add(step));
                let value = self.noise.noise3d(x, y, W::from_u64((d ^ c) as u64));
                if value > self.noise.constants().mid {
                    mask |= 1 << d;
                }
            }
            mask ^= running.byte(c).rotate_left((c % 8) as u32);

            *byte ^= mask;
            running.absorb(c, mask);
            tracing::trace!(position = c, mask, "feedback position");
        }
        tracing::debug!(positions, "feedback block encoded");
    }

    fn encode_keyed(&self, key: &W::Bytes, block: &mut W::Bytes) {
        let polygon = ControlPolygon::keyed_quadrilateral(&elements_from_bytes::<W>(key));
        let frac = W::MAX >> 3;
        let half = frac >> 1;

        let mut elements = elements_from_bytes::<W>(block);
        for (c, element) in elements.iter_mut().enumerate() {
            let t = frac.wrapping_mul(W::from_u64(c as u64));
            let (x, y) = self.curve.point_at(&polygon, t);
            *element ^= self.noise.noise3d(x, y, t.wrapping_add(half));
            tracing::trace!(position = c, "keyed position");
        }
        *block = elements_to_bytes::<W>(&elements);
        tracing::debug!(positions = ELEMENTS, "keyed block encoded");
    }
}
