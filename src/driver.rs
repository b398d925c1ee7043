// src/driver.rs

//! Configuration/compute/validate protocol for one accelerator run.
//!
//! ```text
//! Reset -> Configure -> Compute -> Validate -> Conclude -> Stopped
//! ```
//!
//! The sequence is linear and runs once per driver. Every clock cycle the
//! driver waits on is one [`Accelerator::tick`]; the accelerator holds the
//! memory image only for the duration of that call.

use crate::accelerator::{Accelerator, AcceleratorStatus, ConfigInfo, DebugCode};
use crate::codec::WordCodec;
use crate::common::{Result, VerifyError};
use crate::config::DriverConfig;
use crate::golden::{self, Direction};
use crate::memory::MemoryImage;
use crate::random::RandomSource;
use crate::validate::{ValidationReport, Validator, Verdict};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Reset,
    Configure,
    Compute,
    Validate,
    Conclude,
    /// The run is over; no further steps are possible
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Reset => "reset",
            Phase::Configure => "configure",
            Phase::Compute => "compute",
            Phase::Validate => "validate",
            Phase::Conclude => "conclude",
            Phase::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Everything a finished run reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunReport {
    pub debug_code: DebugCode,
    /// Cycles between entering Compute and observing done
    pub compute_cycles: u64,
    pub validation: ValidationReport,
    pub verdict: Verdict,
}

pub struct AcceleratorDriver<A: Accelerator> {
    config: DriverConfig,
    codec: WordCodec,
    validator: Validator,
    rng: RandomSource,
    accelerator: A,
    stimulus: Option<Vec<f32>>,

    phase: Phase,
    cycle: u64,
    conf_done: bool,
    conf_info: Option<ConfigInfo>,
    memory: MemoryImage,
    golden: Option<Vec<f32>>,
    debug_code: DebugCode,
    compute_cycles: u64,
    report: Option<RunReport>,
}

impl<A: Accelerator> fmt::Debug for AcceleratorDriver<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcceleratorDriver")
            .field("phase", &self.phase)
            .field("cycle", &self.cycle)
            .field("conf_done", &self.conf_done)
            .field("accelerator", &self.accelerator)
            .finish_non_exhaustive()
    }
}

impl<A: Accelerator> AcceleratorDriver<A> {
    pub fn new(config: DriverConfig, rng: RandomSource, accelerator: A) -> Result<Self> {
        config.validate()?;
        let codec = config.codec()?;
        let validator = config.validator()?;
        // Empty until Configure allocates the real image
        let memory = MemoryImage::new(codec.layout(), 0);

        Ok(Self {
            config,
            codec,
            validator,
            rng,
            accelerator,
            stimulus: None,
            phase: Phase::Reset,
            cycle: 0,
            conf_done: false,
            conf_info: None,
            memory,
            golden: None,
            debug_code: DebugCode::default(),
            compute_cycles: 0,
            report: None,
        })
    }

    /// Uses `samples` as the input instead of drawing random values.
    /// Must hold exactly `2 * len` interleaved values.
    pub fn with_stimulus(mut self, samples: Vec<f32>) -> Self {
        self.stimulus = Some(samples);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Clock cycles waited so far
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn config_done(&self) -> bool {
        self.conf_done
    }

    /// The configuration currently published, if any.
    pub fn config_info(&self) -> Option<&ConfigInfo> {
        self.conf_info.as_ref()
    }

    pub fn memory(&self) -> &MemoryImage {
        &self.memory
    }

    pub fn accelerator(&self) -> &A {
        &self.accelerator
    }

    pub fn report(&self) -> Option<&RunReport> {
        self.report.as_ref()
    }

    /// Runs the current phase to completion and returns the next one.
    pub fn step(&mut self) -> Result<Phase> {
        let next = match self.phase {
            Phase::Reset => {
                self.reset();
                Phase::Configure
            }
            Phase::Configure => {
                self.configure()?;
                Phase::Compute
            }
            Phase::Compute => {
                self.compute();
                Phase::Validate
            }
            Phase::Validate => {
                self.validate()?;
                Phase::Conclude
            }
            Phase::Conclude => {
                info!("[cycle {}] run concluded", self.cycle);
                Phase::Stopped
            }
            Phase::Stopped => {
                return Err(VerifyError::invalid_state("run already concluded"));
            }
        };
        self.phase = next;
        Ok(next)
    }

    /// Drives the whole protocol. A failing comparison is reported in the
    /// returned verdict, not as an error.
    pub fn run(mut self) -> Result<RunReport> {
        while self.step()? != Phase::Stopped {}
        self.report
            .ok_or_else(|| VerifyError::invalid_state("run stopped without a report"))
    }

    /// One clock cycle: the accelerator sees the configuration only while
    /// "configuration done" is asserted.
    fn wait(&mut self) -> AcceleratorStatus {
        self.cycle += 1;
        let conf = if self.conf_done {
            self.conf_info.as_ref()
        } else {
            None
        };
        self.accelerator.tick(conf, &mut self.memory)
    }

    fn reset(&mut self) {
        self.conf_done = false;
        self.conf_info = None;
        self.accelerator.reset();
        self.wait();
        info!("[cycle {}] reset done", self.cycle);
    }

    fn configure(&mut self) -> Result<()> {
        self.load_memory()?;

        let config = self.config.config_info();
        self.wait();
        self.conf_info = Some(config);
        self.conf_done = true;

        info!(
            "[cycle {}] config(): do_peak = {}, do_bitrev = {}, log_len = {}",
            self.cycle, config.do_peak, config.do_bitrev, config.log_len
        );
        info!("[cycle {}] config done", self.cycle);
        Ok(())
    }

    fn compute(&mut self) {
        let begin = self.cycle;
        info!("[cycle {}] run fft: BEGIN", begin);
        info!("[cycle {}] waiting for acc_done", begin);

        // No timeout: an accelerator that never finishes stalls the run
        let status = loop {
            let status = self.wait();
            if status.done {
                break status;
            }
        };
        self.debug_code = status.debug;
        self.compute_cycles = self.cycle - begin;

        info!("[cycle {}] run fft: END", self.cycle);
        info!("[cycle {}] debug code: {}", self.cycle, self.debug_code);

        self.wait();
        self.conf_done = false;
    }

    fn validate(&mut self) -> Result<()> {
        let actual = self.dump_memory()?;
        let golden = self
            .golden
            .take()
            .ok_or_else(|| VerifyError::invalid_state("no golden output loaded"))?;

        let words = self.config.words();
        let validation = self.validator.validate(&golden[..words], &actual)?;
        let verdict = Verdict::from_ratio(
            validation.errors,
            self.config.points(),
            self.config.run_threshold,
        );

        match verdict {
            Verdict::Pass => info!("[cycle {}] validation: PASS", self.cycle),
            Verdict::Fail => warn!(
                "[cycle {}] validation: FAIL (exceeding error count threshold)",
                self.cycle
            ),
        }

        self.report = Some(RunReport {
            debug_code: self.debug_code,
            compute_cycles: self.compute_cycles,
            validation,
            verdict,
        });
        Ok(())
    }

    /// Builds the input and golden buffers and writes the input to a freshly
    /// allocated memory image.
    fn load_memory(&mut self) -> Result<()> {
        let len = self.config.points();
        let log_len = self.config.log_len;
        let layout = self.codec.layout();
        let words = self.config.words();

        let mut input = match self.stimulus.take() {
            Some(samples) if samples.len() != words => {
                return Err(VerifyError::size_mismatch(words, samples.len()));
            }
            Some(samples) => samples,
            None => {
                let mut samples = vec![0.0f32; words];
                self.rng.fill(&mut samples);
                samples
            }
        };

        // When the accelerator is told not to bit-reverse, the host does it
        if !self.config.do_bitrev {
            golden::bit_reverse(&mut input, len, log_len)?;
        }

        let mut gold = vec![0.0f32; layout.adjusted_words(words)];
        gold[..words].copy_from_slice(&input);
        golden::transform(&mut gold, len, log_len, Direction::Forward, !self.config.do_bitrev)?;

        let mut memory = MemoryImage::new(layout, self.config.memory_words());
        memory.load(0, &input, &self.codec)?;
        debug!(
            "memory image: {} beats of {} bits, {:?}",
            memory.beats().len(),
            layout.bus_width(),
            layout.packing()
        );

        self.memory = memory;
        self.golden = Some(gold);
        info!("[cycle {}] load memory completed", self.cycle);
        Ok(())
    }

    fn dump_memory(&self) -> Result<Vec<f32>> {
        let out = self
            .memory
            .dump(self.config.output_offset, self.config.words(), &self.codec)?;
        info!("[cycle {}] dump memory completed", self.cycle);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
