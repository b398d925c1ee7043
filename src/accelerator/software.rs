//! Behavioral FFT accelerator
//!
//! Stands in for the hardware when no simulator is attached. It follows the
//! same signal protocol: it waits for "configuration done", stays busy for a
//! configurable number of cycles, then reads the input region, transforms it
//! with a table-driven `f32` radix-2 FFT, writes the quantized result to the
//! output region and raises done.
//!
//! Peak detection is accepted in the configuration but not modeled.

use super::{Accelerator, AcceleratorStatus, ConfigInfo, DebugCode};
use crate::codec::WordCodec;
use crate::common::Result;
use crate::float::CplxFft;
use crate::memory::MemoryImage;
use num_complex::Complex32;
use tracing::{debug, info, warn};

/// Reported when the transform completed.
pub const DEBUG_OK: DebugCode = DebugCode(0);
/// Reported when the input or output region could not be accessed.
pub const DEBUG_MEMORY_FAULT: DebugCode = DebugCode(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ModelState {
    Idle,
    Busy { remaining: u64 },
    Done(DebugCode),
}

#[derive(Debug)]
pub struct SoftwareAccelerator {
    codec: WordCodec,
    latency: u64,
    output_offset: usize,
    state: ModelState,
}

impl SoftwareAccelerator {
    /// Creates a model reading its input at word 0 and writing its output
    /// in place.
    pub fn new(codec: WordCodec) -> Self {
        Self {
            codec,
            latency: 0,
            output_offset: 0,
            state: ModelState::Idle,
        }
    }

    /// Cycles spent busy between seeing the configuration and computing.
    pub fn with_latency(mut self, cycles: u64) -> Self {
        self.latency = cycles;
        self
    }

    /// Word offset of the output region.
    pub fn with_output_offset(mut self, words: usize) -> Self {
        self.output_offset = words;
        self
    }

    fn compute(&self, conf: &ConfigInfo, memory: &mut MemoryImage) -> Result<()> {
        let n = conf.points();
        let samples = memory.dump(0, 2 * n, &self.codec)?;
        let mut buffer: Vec<Complex32> = samples
            .chunks_exact(2)
            .map(|p| Complex32::new(p[0], p[1]))
            .collect();

        let plan = CplxFft::new(n)?;
        plan.process(&mut buffer, conf.do_bitrev)?;

        let out: Vec<f32> = buffer.iter().flat_map(|c| [c.re, c.im]).collect();
        memory.load(self.output_offset, &out, &self.codec)
    }
}

impl Accelerator for SoftwareAccelerator {
    fn reset(&mut self) {
        self.state = ModelState::Idle;
    }

    fn tick(&mut self, conf: Option<&ConfigInfo>, memory: &mut MemoryImage) -> AcceleratorStatus {
        match self.state {
            ModelState::Idle => {
                if let Some(conf) = conf {
                    info!(
                        "SoftwareAccelerator: start len={} do_bitrev={} do_peak={}",
                        conf.points(),
                        conf.do_bitrev,
                        conf.do_peak
                    );
                    self.state = ModelState::Busy {
                        remaining: self.latency,
                    };
                }
                AcceleratorStatus::IDLE
            }
            ModelState::Busy { remaining } => {
                let Some(conf) = conf else {
                    warn!("SoftwareAccelerator: configuration withdrawn while busy");
                    self.state = ModelState::Idle;
                    return AcceleratorStatus::IDLE;
                };
                if remaining > 0 {
                    self.state = ModelState::Busy {
                        remaining: remaining - 1,
                    };
                    return AcceleratorStatus::IDLE;
                }

                let code = match self.compute(conf, memory) {
                    Ok(()) => DEBUG_OK,
                    Err(e) => {
                        warn!("SoftwareAccelerator: {}", e);
                        DEBUG_MEMORY_FAULT
                    }
                };
                debug!("SoftwareAccelerator: done, debug code {}", code);
                self.state = ModelState::Done(code);
                AcceleratorStatus::done(code)
            }
            ModelState::Done(code) => {
                if conf.is_none() {
                    self.state = ModelState::Idle;
                    AcceleratorStatus::IDLE
                } else {
                    AcceleratorStatus::done(code)
                }
            }
        }
    }
}
