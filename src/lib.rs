//! Verification driver for a memory-mapped FFT accelerator.
//!
//! A run generates random complex input, encodes it into the accelerator's
//! fixed-point bus format, drives the accelerator through
//! reset/configure/compute, decodes its output and compares it against a
//! software golden FFT.
//!
//! ```no_run
//! use fft_accel_verify::prelude::*;
//!
//! # fn main() -> fft_accel_verify::Result<()> {
//! let config = DriverConfig::default().with_log_len(10).with_bitrev(false);
//! let accelerator = SoftwareAccelerator::new(config.codec()?).with_latency(200);
//! let (lo, hi) = config.sample_range;
//! let rng = RandomSource::from_entropy(lo, hi)?;
//!
//! let report = AcceleratorDriver::new(config, rng, accelerator)?.run()?;
//! println!("{} ({} mismatches)", report.verdict, report.validation.errors);
//! # Ok(())
//! # }
//! ```

pub mod accelerator;
pub mod codec;
pub mod common;
pub mod config;
pub mod driver;
pub mod float;
pub mod golden;
pub mod memory;
pub mod random;
pub mod validate;

pub use common::{Result, VerifyError};

/// Commonly used types.
pub mod prelude {
    pub use crate::accelerator::{
        Accelerator, AcceleratorStatus, ConfigInfo, DebugCode, SoftwareAccelerator,
    };
    pub use crate::codec::{BusBeat, BusLayout, EncodedWord, FixedFormat, WordCodec, WordPacking};
    pub use crate::config::DriverConfig;
    pub use crate::driver::{AcceleratorDriver, Phase, RunReport};
    pub use crate::golden::Direction;
    pub use crate::memory::MemoryImage;
    pub use crate::random::RandomSource;
    pub use crate::validate::{ValidationReport, Validator, Verdict, ZeroPolicy};
    pub use crate::{Result, VerifyError};
}
