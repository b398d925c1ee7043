// src/memory.rs

use crate::codec::{BusBeat, BusLayout, EncodedWord, WordCodec, WordLocation, WordPacking};
use crate::common::{Result, VerifyError};
use tracing::debug;

/// Beat-addressed memory shared with the accelerator.
///
/// Input and output regions are word offsets into the same image; the
/// mapping from a logical word index to beats is fixed by the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryImage {
    layout: BusLayout,
    beats: Vec<BusBeat>,
}

impl MemoryImage {
    /// Allocates a zeroed image holding at least `words` words, rounded up to
    /// whole beats.
    pub fn new(layout: BusLayout, words: usize) -> Self {
        let beats = layout.beats_for(layout.adjusted_words(words));
        Self {
            layout,
            beats: vec![BusBeat::default(); beats],
        }
    }

    #[inline]
    pub fn layout(&self) -> BusLayout {
        self.layout
    }

    #[inline]
    pub fn beats(&self) -> &[BusBeat] {
        &self.beats
    }

    /// Number of whole words the image can hold.
    pub fn word_capacity(&self) -> usize {
        self.layout.words_in(self.beats.len())
    }

    pub fn locate(&self, index: usize) -> Result<WordLocation> {
        self.check_range(index, 1)?;
        Ok(self.layout.locate(index))
    }

    pub fn word(&self, index: usize) -> Result<EncodedWord> {
        let at = self.locate(index)?;
        match self.layout.packing() {
            WordPacking::MultiWord { words_per_beat } => {
                let words = self.layout.unpack(self.beats[at.beat])?;
                Ok(words[index % words_per_beat])
            }
            WordPacking::WideWord { beats_per_word } => self
                .layout
                .join(&self.beats[at.beat..at.beat + beats_per_word]),
        }
    }

    /// Rewrites one word. Other words sharing its beat are kept.
    pub fn set_word(&mut self, index: usize, word: EncodedWord) -> Result<()> {
        self.write_words(index, &[word])
    }

    /// Encodes `samples` into consecutive words starting at word `offset`.
    pub fn load(&mut self, offset: usize, samples: &[f32], codec: &WordCodec) -> Result<()> {
        self.check_layout(codec)?;
        let words: Vec<EncodedWord> = samples.iter().map(|&x| codec.encode(x)).collect();
        self.write_words(offset, &words)
    }

    /// Decodes `count` consecutive words starting at word `offset`.
    pub fn dump(&self, offset: usize, count: usize, codec: &WordCodec) -> Result<Vec<f32>> {
        self.check_layout(codec)?;
        Ok(self
            .read_words(offset, count)?
            .into_iter()
            .map(|w| codec.decode(w))
            .collect())
    }

    /// Writes whole beats: every beat touched by the region is unpacked,
    /// patched and packed again.
    fn write_words(&mut self, offset: usize, words: &[EncodedWord]) -> Result<()> {
        self.check_range(offset, words.len())?;
        if words.is_empty() {
            return Ok(());
        }
        let end = offset + words.len();

        match self.layout.packing() {
            WordPacking::MultiWord { words_per_beat } => {
                for beat in offset / words_per_beat..end.div_ceil(words_per_beat) {
                    let mut slots = self.layout.unpack(self.beats[beat])?;
                    for (slot, value) in slots.iter_mut().enumerate() {
                        let index = beat * words_per_beat + slot;
                        if (offset..end).contains(&index) {
                            *value = words[index - offset];
                        }
                    }
                    self.beats[beat] = self.layout.pack(&slots)?;
                    debug!("mem beat[{}] := {:?}", beat, self.beats[beat]);
                }
            }
            WordPacking::WideWord { beats_per_word } => {
                for (i, &word) in words.iter().enumerate() {
                    let first = (offset + i) * beats_per_word;
                    let parts = self.layout.split(word)?;
                    self.beats[first..first + beats_per_word].copy_from_slice(&parts);
                    for (beat, part) in (first..).zip(&parts) {
                        debug!("mem beat[{}] := {:?}", beat, part);
                    }
                }
            }
        }
        Ok(())
    }

    fn read_words(&self, offset: usize, count: usize) -> Result<Vec<EncodedWord>> {
        self.check_range(offset, count)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let end = offset + count;

        match self.layout.packing() {
            WordPacking::MultiWord { words_per_beat } => {
                let mut out = Vec::with_capacity(count);
                for beat in offset / words_per_beat..end.div_ceil(words_per_beat) {
                    let slots = self.layout.unpack(self.beats[beat])?;
                    out.extend(slots.into_iter().enumerate().filter_map(|(slot, w)| {
                        (offset..end)
                            .contains(&(beat * words_per_beat + slot))
                            .then_some(w)
                    }));
                }
                Ok(out)
            }
            WordPacking::WideWord { beats_per_word } => (offset..end)
                .map(|i| {
                    let first = i * beats_per_word;
                    self.layout.join(&self.beats[first..first + beats_per_word])
                })
                .collect(),
        }
    }

    fn check_layout(&self, codec: &WordCodec) -> Result<()> {
        if codec.layout() != self.layout {
            return Err(VerifyError::invalid_config(
                "codec bus layout differs from the memory image layout",
            ));
        }
        Ok(())
    }

    fn check_range(&self, offset: usize, count: usize) -> Result<()> {
        let capacity = self.word_capacity();
        match offset.checked_add(count) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(VerifyError::WordOutOfRange {
                index: offset.saturating_add(count).saturating_sub(1),
                capacity,
            }),
        }
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
