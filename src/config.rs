// src/config.rs

use crate::accelerator::ConfigInfo;
use crate::codec::{BusLayout, FixedFormat, WordCodec};
use crate::common::{Result, VerifyError};
use crate::random::{SAMPLE_HI, SAMPLE_LO};
use crate::validate::{RUN_ERROR_THRESHOLD, SAMPLE_ERROR_THRESHOLD, Validator, ZeroPolicy};

/// Parameters of one verification run.
///
/// `do_bitrev` keeps the meaning it has on the accelerator's configuration
/// port: when `true` the accelerator applies the bit-reversal permutation to
/// its input; when `false` the driver permutes the input before writing it to
/// memory. Either way the accelerator and the golden model see the same
/// logical input.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    pub log_len: u32,
    pub do_peak: bool,
    pub do_bitrev: bool,
    /// Width of one encoded sample in bits
    pub data_width: u32,
    /// Integer bits of the fixed-point sample format, sign included
    pub integer_bits: u32,
    /// Width of one DMA beat in bits
    pub bus_width: u32,
    /// Closed interval random input samples are drawn from
    pub sample_range: (f32, f32),
    pub sample_threshold: f32,
    pub run_threshold: f64,
    pub zero_policy: ZeroPolicy,
    /// Word offset of the output region (input always starts at word 0)
    pub output_offset: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_len: 6,
            do_peak: false,
            do_bitrev: true,
            data_width: 32,
            integer_bits: 14,
            bus_width: 64,
            sample_range: (SAMPLE_LO, SAMPLE_HI),
            sample_threshold: SAMPLE_ERROR_THRESHOLD,
            run_threshold: RUN_ERROR_THRESHOLD,
            zero_policy: ZeroPolicy::default(),
            output_offset: 0,
        }
    }
}

impl DriverConfig {
    pub const MAX_LOG_LEN: u32 = 24;

    pub fn with_log_len(mut self, log_len: u32) -> Self {
        self.log_len = log_len;
        self
    }

    pub fn with_peak(mut self, do_peak: bool) -> Self {
        self.do_peak = do_peak;
        self
    }

    pub fn with_bitrev(mut self, do_bitrev: bool) -> Self {
        self.do_bitrev = do_bitrev;
        self
    }

    pub fn with_widths(mut self, data_width: u32, integer_bits: u32, bus_width: u32) -> Self {
        self.data_width = data_width;
        self.integer_bits = integer_bits;
        self.bus_width = bus_width;
        self
    }

    pub fn with_sample_range(mut self, lo: f32, hi: f32) -> Self {
        self.sample_range = (lo, hi);
        self
    }

    pub fn with_thresholds(mut self, sample: f32, run: f64) -> Self {
        self.sample_threshold = sample;
        self.run_threshold = run;
        self
    }

    pub fn with_zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    pub fn with_output_offset(mut self, words: usize) -> Self {
        self.output_offset = words;
        self
    }

    /// Number of complex points
    pub fn points(&self) -> usize {
        1 << self.log_len
    }

    /// Number of interleaved real values exchanged each way
    pub fn words(&self) -> usize {
        2 * self.points()
    }

    /// Words the memory image must hold for both regions.
    pub fn memory_words(&self) -> usize {
        self.output_offset + self.words()
    }

    /// Checks every field, including the codec and validator they describe.
    pub fn validate(&self) -> Result<()> {
        if self.log_len == 0 || self.log_len > Self::MAX_LOG_LEN {
            return Err(VerifyError::invalid_config(format!(
                "log_len {} outside 1..={}",
                self.log_len,
                Self::MAX_LOG_LEN
            )));
        }
        let (lo, hi) = self.sample_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(VerifyError::invalid_config(format!(
                "sample range [{lo}, {hi}] is empty or not finite"
            )));
        }
        if !(self.run_threshold.is_finite() && self.run_threshold > 0.0) {
            return Err(VerifyError::invalid_config(format!(
                "run error threshold {} must be positive",
                self.run_threshold
            )));
        }
        self.validator()?;
        let format = self.codec()?.format();
        if f64::from(lo) < format.min_value() || f64::from(hi) > format.max_value() {
            return Err(VerifyError::invalid_config(format!(
                "sample range [{lo}, {hi}] does not fit {format}"
            )));
        }
        Ok(())
    }

    pub fn codec(&self) -> Result<WordCodec> {
        let format = FixedFormat::new(self.data_width, self.integer_bits)?;
        let layout = BusLayout::new(self.data_width, self.bus_width)?;
        WordCodec::new(format, layout)
    }

    pub fn validator(&self) -> Result<Validator> {
        Validator::new(self.sample_threshold, self.zero_policy)
    }

    /// The record written to the accelerator's configuration port.
    pub fn config_info(&self) -> ConfigInfo {
        ConfigInfo {
            do_peak: self.do_peak,
            do_bitrev: self.do_bitrev,
            log_len: self.log_len,
        }
    }
}
