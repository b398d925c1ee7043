// src/codec/packing.rs

use super::fixed::EncodedWord;
use crate::common::{Result, VerifyError};
use std::fmt;

/// One transfer on the DMA bus. Bits above the bus width are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct BusBeat(u128);

impl BusBeat {
    #[inline]
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u128 {
        self.0
    }
}

impl fmt::Debug for BusBeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusBeat({:#x})", self.0)
    }
}

/// How encoded words map onto bus beats. Chosen once from the configured
/// widths and never per transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordPacking {
    /// The data word is at least as wide as the bus: each word is split
    /// across `beats_per_word` consecutive beats, least significant part first.
    WideWord { beats_per_word: usize },
    /// The bus is wider than the data word: `words_per_beat` words share a
    /// beat, word `i` in bits `[i * data_width, (i + 1) * data_width)`.
    MultiWord { words_per_beat: usize },
}

/// Physical position of one word inside a memory image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordLocation {
    /// First beat holding (part of) the word
    pub beat: usize,
    /// Bit offset of the word's LSB inside that beat
    pub lsb: u32,
}

/// Bus/data width pair together with the packing strategy they imply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusLayout {
    data_width: u32,
    bus_width: u32,
    packing: WordPacking,
}

impl BusLayout {
    pub const MAX_BUS_WIDTH: u32 = 128;

    pub fn new(data_width: u32, bus_width: u32) -> Result<Self> {
        if !(8..=Self::MAX_BUS_WIDTH).contains(&bus_width) {
            return Err(VerifyError::invalid_config(format!(
                "bus width {bus_width} outside 8..={}",
                Self::MAX_BUS_WIDTH
            )));
        }
        if !(2..=64).contains(&data_width) {
            return Err(VerifyError::invalid_config(format!(
                "data width {data_width} outside 2..=64"
            )));
        }

        let packing = if data_width >= bus_width {
            if data_width % bus_width != 0 {
                return Err(VerifyError::invalid_config(format!(
                    "data width {data_width} is not a multiple of bus width {bus_width}"
                )));
            }
            WordPacking::WideWord {
                beats_per_word: (data_width / bus_width) as usize,
            }
        } else {
            if bus_width % data_width != 0 {
                return Err(VerifyError::invalid_config(format!(
                    "bus width {bus_width} is not a multiple of data width {data_width}"
                )));
            }
            WordPacking::MultiWord {
                words_per_beat: (bus_width / data_width) as usize,
            }
        };

        Ok(Self {
            data_width,
            bus_width,
            packing,
        })
    }

    #[inline]
    pub fn data_width(&self) -> u32 {
        self.data_width
    }

    #[inline]
    pub fn bus_width(&self) -> u32 {
        self.bus_width
    }

    #[inline]
    pub fn packing(&self) -> WordPacking {
        self.packing
    }

    /// Words per beat, or `None` when one word spans several beats.
    pub fn words_per_beat(&self) -> Option<usize> {
        match self.packing {
            WordPacking::MultiWord { words_per_beat } => Some(words_per_beat),
            WordPacking::WideWord { .. } => None,
        }
    }

    /// Rounds a word count up to a whole number of beats.
    pub fn adjusted_words(&self, words: usize) -> usize {
        match self.packing {
            WordPacking::MultiWord { words_per_beat } => {
                words.div_ceil(words_per_beat) * words_per_beat
            }
            WordPacking::WideWord { .. } => words,
        }
    }

    /// Number of beats needed to hold `words` words.
    pub fn beats_for(&self, words: usize) -> usize {
        match self.packing {
            WordPacking::MultiWord { words_per_beat } => words.div_ceil(words_per_beat),
            WordPacking::WideWord { beats_per_word } => words * beats_per_word,
        }
    }

    /// Number of whole words stored in `beats` beats.
    pub fn words_in(&self, beats: usize) -> usize {
        match self.packing {
            WordPacking::MultiWord { words_per_beat } => beats * words_per_beat,
            WordPacking::WideWord { beats_per_word } => beats / beats_per_word,
        }
    }

    pub fn locate(&self, index: usize) -> WordLocation {
        match self.packing {
            WordPacking::MultiWord { words_per_beat } => WordLocation {
                beat: index / words_per_beat,
                lsb: (index % words_per_beat) as u32 * self.data_width,
            },
            WordPacking::WideWord { beats_per_word } => WordLocation {
                beat: index * beats_per_word,
                lsb: 0,
            },
        }
    }

    fn bus_mask(&self) -> u128 {
        if self.bus_width == 128 {
            u128::MAX
        } else {
            (1u128 << self.bus_width) - 1
        }
    }

    fn data_mask(&self) -> u128 {
        (1u128 << self.data_width) - 1
    }

    /// Concatenates exactly `words_per_beat` words into one beat.
    pub fn pack(&self, words: &[EncodedWord]) -> Result<BusBeat> {
        let Some(words_per_beat) = self.words_per_beat() else {
            return Err(VerifyError::invalid_config(
                "pack requires a bus wider than the data word",
            ));
        };
        if words.len() != words_per_beat {
            return Err(VerifyError::size_mismatch(words_per_beat, words.len()));
        }
        let mut beat = BusBeat::default();
        for (slot, &word) in words.iter().enumerate() {
            beat = self.insert(beat, slot as u32 * self.data_width, word);
        }
        Ok(beat)
    }

    /// Splits one beat back into its `words_per_beat` words.
    pub fn unpack(&self, beat: BusBeat) -> Result<Vec<EncodedWord>> {
        let Some(words_per_beat) = self.words_per_beat() else {
            return Err(VerifyError::invalid_config(
                "unpack requires a bus wider than the data word",
            ));
        };
        Ok((0..words_per_beat)
            .map(|slot| self.extract(beat, slot as u32 * self.data_width))
            .collect())
    }

    /// Fans one wide word across `beats_per_word` beats.
    pub fn split(&self, word: EncodedWord) -> Result<Vec<BusBeat>> {
        let WordPacking::WideWord { beats_per_word } = self.packing else {
            return Err(VerifyError::invalid_config(
                "split requires a data word at least as wide as the bus",
            ));
        };
        let bits = word.to_bits() as u128 & self.data_mask();
        Ok((0..beats_per_word)
            .map(|j| BusBeat((bits >> (j as u32 * self.bus_width)) & self.bus_mask()))
            .collect())
    }

    /// Reassembles a wide word from its `beats_per_word` beats.
    pub fn join(&self, beats: &[BusBeat]) -> Result<EncodedWord> {
        let WordPacking::WideWord { beats_per_word } = self.packing else {
            return Err(VerifyError::invalid_config(
                "join requires a data word at least as wide as the bus",
            ));
        };
        if beats.len() != beats_per_word {
            return Err(VerifyError::size_mismatch(beats_per_word, beats.len()));
        }
        let bits = beats.iter().enumerate().fold(0u128, |acc, (j, beat)| {
            acc | ((beat.0 & self.bus_mask()) << (j as u32 * self.bus_width))
        });
        Ok(EncodedWord::from_bits((bits & self.data_mask()) as u64))
    }

    #[inline]
    fn insert(&self, beat: BusBeat, lsb: u32, word: EncodedWord) -> BusBeat {
        let field = self.data_mask() << lsb;
        let bits = (word.to_bits() as u128 & self.data_mask()) << lsb;
        BusBeat((beat.0 & !field) | bits)
    }

    #[inline]
    fn extract(&self, beat: BusBeat, lsb: u32) -> EncodedWord {
        EncodedWord::from_bits(((beat.0 >> lsb) & self.data_mask()) as u64)
    }
}

#[cfg(test)]
#[path = "packing_tests.rs"]
mod tests;
