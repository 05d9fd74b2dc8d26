//! Cipher configuration: mode, width and the derived construction profile.

use std::fmt;
use std::str::FromStr;

use crate::field::Modulus;
use crate::SimplectError;

/// Which of the two Simplect constructions to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Reference construction: one noise bit per block bit, with the
    /// per-position mask fed back into a running copy of the key.
    #[default]
    Feedback,
    /// Revised construction: a key-derived control quadrilateral and one
    /// whole noise element XORed into each block element.
    Keyed,
}

impl Mode {
    /// Every knob that differs between the two constructions.
    pub const fn profile(self) -> Profile {
        match self {
            Mode::Feedback => Profile {
                modulus: Modulus::Alternating,
                curve: CurveArithmetic::Wrapping,
            },
            Mode::Keyed => Profile {
                modulus: Modulus::Standard,
                curve: CurveArithmetic::Field,
            },
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Feedback => "feedback",
            Mode::Keyed => "keyed",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = SimplectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feedback" | "a" => Ok(Mode::Feedback),
            "keyed" | "b" => Ok(Mode::Keyed),
            other => Err(SimplectError::UnknownMode(other.to_string())),
        }
    }
}

/// Arithmetic used by the cubic Bezier blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveArithmetic {
    /// Integer arithmetic modulo 2^w.
    Wrapping,
    /// GF(2^w) arithmetic; coefficients 1, 3, 3, 1 are field elements.
    Field,
}

/// Construction knobs fixed by a [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    /// Reduction polynomial.
    pub modulus: Modulus,
    /// Bezier arithmetic.
    pub curve: CurveArithmetic,
}

/// Explicit configuration for a [`crate::Simplect`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplectConfig {
    /// Construction to run.
    pub mode: Mode,
}

impl SimplectConfig {
    /// Reference key-feedback construction.
    pub fn feedback() -> Self {
        Self {
            mode: Mode::Feedback,
        }
    }

    /// Revised keyed-curve construction.
    pub fn keyed() -> Self {
        Self { mode: Mode::Keyed }
    }

    /// Profile implied by the mode.
    pub fn profile(&self) -> Profile {
        self.mode.profile()
    }
}

/// Runtime selector for the three instance widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    /// Simplect64: `u8` elements.
    W64,
    /// Simplect256: `u32` elements.
    W256,
    /// Simplect512: `u64` elements.
    W512,
}

impl Width {
    /// Key and block size in bits.
    pub fn block_bits(self) -> usize {
        self.block_bytes() * 8
    }

    /// Key and block size in bytes.
    pub fn block_bytes(self) -> usize {
        match self {
            Width::W64 => 8,
            Width::W256 => 32,
            Width::W512 => 64,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simplect{}", self.block_bits())
    }
}

impl FromStr for Width {
    type Err = SimplectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered.strip_prefix("simplect").unwrap_or(&lowered);
        match digits {
            "64" => Ok(Width::W64),
            "256" => Ok(Width::W256),
            "512" => Ok(Width::W512),
            other => Err(SimplectError::UnsupportedWidth(other.to_string())),
        }
    }
}
