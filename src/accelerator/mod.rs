//! Boundary between the driver and the FFT accelerator.
//!
//! The driver owns the [`MemoryImage`] and lends it to the accelerator once
//! per clock cycle through [`Accelerator::tick`]. Nothing else can touch the
//! image while the accelerator holds it, and the driver only reads it back
//! after the accelerator has reported done.

pub mod software;

use crate::memory::MemoryImage;
use std::fmt;

pub use software::SoftwareAccelerator;

/// Scalar parameters sent to the accelerator once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigInfo {
    /// Peak detection enable
    pub do_peak: bool,
    /// The accelerator performs the bit-reversal permutation itself. When
    /// false the host has already permuted the input.
    pub do_bitrev: bool,
    /// log2 of the number of complex points
    pub log_len: u32,
}

impl ConfigInfo {
    /// Number of complex points
    pub fn points(&self) -> usize {
        1 << self.log_len
    }
}

/// Opaque diagnostic value sampled when the accelerator reports done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DebugCode(pub u32);

impl fmt::Display for DebugCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Level signals driven by the accelerator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceleratorStatus {
    pub done: bool,
    pub debug: DebugCode,
}

impl AcceleratorStatus {
    pub const IDLE: Self = Self {
        done: false,
        debug: DebugCode(0),
    };

    pub fn done(debug: DebugCode) -> Self {
        Self { done: true, debug }
    }
}

/// An FFT accelerator advancing one clock cycle per `tick`.
pub trait Accelerator: fmt::Debug {
    /// Returns the accelerator to its power-on state.
    fn reset(&mut self);

    /// Advances one cycle.
    ///
    /// `conf` is `Some` exactly while the driver asserts "configuration done".
    /// `done` may take any number of cycles to rise; the driver has no timeout.
    fn tick(&mut self, conf: Option<&ConfigInfo>, memory: &mut MemoryImage) -> AcceleratorStatus;
}

impl<A: Accelerator + ?Sized> Accelerator for Box<A> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn tick(&mut self, conf: Option<&ConfigInfo>, memory: &mut MemoryImage) -> AcceleratorStatus {
        (**self).tick(conf, memory)
    }
}
