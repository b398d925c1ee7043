// src/codec/fixed.rs

use crate::common::{Result, VerifyError};
use std::fmt;

/// One encoded sample: the raw two's-complement bits of a fixed-point value,
/// right-aligned in a `u64`. Bits above the data width are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct EncodedWord(u64);

impl EncodedWord {
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedWord({:#x})", self.0)
    }
}

/// Signed fixed-point format of the accelerator's native data word.
///
/// `integer_bits` counts the sign bit, so a 32-bit word with 14 integer bits
/// covers `[-8192, 8192)` with 18 fractional bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedFormat {
    width: u32,
    integer_bits: u32,
}

impl FixedFormat {
    pub const MAX_WIDTH: u32 = 64;

    pub fn new(width: u32, integer_bits: u32) -> Result<Self> {
        if !(2..=Self::MAX_WIDTH).contains(&width) {
            return Err(VerifyError::invalid_config(format!(
                "data width {width} outside 2..={}",
                Self::MAX_WIDTH
            )));
        }
        if integer_bits == 0 || integer_bits > width {
            return Err(VerifyError::invalid_config(format!(
                "integer bits {integer_bits} must be in 1..={width}"
            )));
        }
        Ok(Self {
            width,
            integer_bits,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn frac_bits(&self) -> u32 {
        self.width - self.integer_bits
    }

    /// Distance between two adjacent representable values.
    /// A round trip through the format is off by at most half of this.
    pub fn resolution(&self) -> f64 {
        (-(self.frac_bits() as f64)).exp2()
    }

    pub fn max_value(&self) -> f64 {
        self.max_raw() as f64 * self.resolution()
    }

    pub fn min_value(&self) -> f64 {
        self.min_raw() as f64 * self.resolution()
    }

    fn mask(&self) -> u64 {
        if self.width == 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    fn max_raw(&self) -> i64 {
        if self.width == 64 {
            i64::MAX
        } else {
            (1i64 << (self.width - 1)) - 1
        }
    }

    fn min_raw(&self) -> i64 {
        if self.width == 64 {
            i64::MIN
        } else {
            -(1i64 << (self.width - 1))
        }
    }

    /// Converts a real value to the fixed-point word, rounding to the nearest
    /// representable value and saturating at the format limits. NaN encodes as zero.
    pub fn encode(&self, value: f64) -> EncodedWord {
        let scaled = (value * (self.frac_bits() as f64).exp2()).round();
        let raw = if scaled.is_nan() {
            0
        } else if scaled >= self.max_raw() as f64 {
            self.max_raw()
        } else if scaled <= self.min_raw() as f64 {
            self.min_raw()
        } else {
            scaled as i64
        };
        EncodedWord(raw as u64 & self.mask())
    }

    /// Sign-extends the word and scales it back to a real value.
    /// Bits above the data width are ignored.
    pub fn decode(&self, word: EncodedWord) -> f64 {
        let shift = 64 - self.width;
        let raw = ((word.0 << shift) as i64) >> shift;
        raw as f64 * self.resolution()
    }
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.integer_bits, self.frac_bits())
    }
}
