//! Simplex-style gradient noise evaluated over GF(2^w)
//!
//! The process-wide tables live here:
//! - the doubled permutation table (shared by every width)
//! - per width, the gradient table and the noise constants of both modes

mod constants;
mod gradient;
mod simplex;

pub use constants::NoiseConstants;
pub use gradient::{permutation, GradientTable, GRADIENT_COUNT, PERMUTATION_LEN};
pub use simplex::NoiseField;

use crate::config::Mode;
use crate::field::Word;

/// Everything a width needs that is computed once per process.
#[derive(Debug)]
pub struct WidthTables<W: Word> {
    gradients: GradientTable<W>,
    feedback: NoiseConstants<W>,
    keyed: NoiseConstants<W>,
}

impl<W: Word> WidthTables<W> {
    /// Build the tables for `W`. Called through [`Word::tables`].
    pub fn build() -> Self {
        tracing::debug!(bits = W::BITS, "building width tables");
        Self {
            gradients: GradientTable::build(),
            feedback: NoiseConstants::for_mode(Mode::Feedback),
            keyed: NoiseConstants::for_mode(Mode::Keyed),
        }
    }

    /// Gradient vectors for this width.
    pub fn gradients(&self) -> &GradientTable<W> {
        &self.gradients
    }

    /// Noise constants for `mode`.
    pub fn constants(&self, mode: Mode) -> &NoiseConstants<W> {
        match mode {
            Mode::Feedback => &self.feedback,
            Mode::Keyed => &self.keyed,
        }
    }
}
