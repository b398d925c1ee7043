//! Sample <-> word <-> bus beat conversions.

pub mod fixed;
pub mod packing;

pub use fixed::{EncodedWord, FixedFormat};
pub use packing::{BusBeat, BusLayout, WordLocation, WordPacking};

use crate::common::{Result, VerifyError};

/// Converts samples to the accelerator's data words and knows how those
/// words sit on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordCodec {
    format: FixedFormat,
    layout: BusLayout,
}

impl WordCodec {
    pub fn new(format: FixedFormat, layout: BusLayout) -> Result<Self> {
        if format.width() != layout.data_width() {
            return Err(VerifyError::invalid_config(format!(
                "fixed-point width {} does not match bus layout data width {}",
                format.width(),
                layout.data_width()
            )));
        }
        Ok(Self { format, layout })
    }

    #[inline]
    pub fn format(&self) -> FixedFormat {
        self.format
    }

    #[inline]
    pub fn layout(&self) -> BusLayout {
        self.layout
    }

    #[inline]
    pub fn encode(&self, sample: f32) -> EncodedWord {
        self.format.encode(sample as f64)
    }

    #[inline]
    pub fn decode(&self, word: EncodedWord) -> f32 {
        self.format.decode(word) as f32
    }

    /// Largest error a sample inside the format's range picks up on an
    /// encode/decode round trip, before the final narrowing to `f32`.
    pub fn quantization_error(&self) -> f64 {
        self.format.resolution() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_must_agree() {
        let format = FixedFormat::new(32, 14).unwrap();
        let layout = BusLayout::new(16, 64).unwrap();
        assert!(WordCodec::new(format, layout).is_err());
    }

    #[test]
    fn test_sample_round_trip() {
        let codec = WordCodec::new(
            FixedFormat::new(32, 14).unwrap(),
            BusLayout::new(32, 64).unwrap(),
        )
        .unwrap();
        let bound = codec.quantization_error() + 1e-6;
        for &x in &[-5.0f32, -3.25, -0.001, 0.0, 0.1, 1.0, 4.999] {
            let back = codec.decode(codec.encode(x));
            assert!(((back - x).abs() as f64) <= bound, "{} -> {}", x, back);
        }
    }
}
