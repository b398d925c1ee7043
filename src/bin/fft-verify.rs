//! `fft-verify`: one verification run against the behavioral accelerator.
//!
//! ```text
//! USAGE:
//!   fft-verify [--log-len N] [--no-bitrev] [--peak] [--latency CYCLES] [--seed S]
//!              [--data-width W] [--integer-bits I] [--bus-width B]
//! ```
//!
//! Exits 0 on PASS and 1 on FAIL. Set `RUST_LOG=debug` to see every
//! comparison.

use anyhow::{Context, Result};
use clap::Parser;
use fft_accel_verify::prelude::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fft-verify", about = "FFT accelerator verification run", version)]
struct Cli {
    /// log2 of the number of complex points.
    #[arg(long, default_value_t = 6)]
    log_len: u32,

    /// Tell the accelerator not to bit-reverse; the host permutes the input instead.
    #[arg(long)]
    no_bitrev: bool,

    /// Enable peak detection on the accelerator.
    #[arg(long)]
    peak: bool,

    /// Bits per encoded sample.
    #[arg(long, default_value_t = 32)]
    data_width: u32,

    /// Integer bits of the fixed-point format, sign included.
    #[arg(long, default_value_t = 14)]
    integer_bits: u32,

    /// Bits per DMA beat.
    #[arg(long, default_value_t = 64)]
    bus_width: u32,

    /// Cycles the behavioral accelerator stays busy before computing.
    #[arg(long, default_value_t = 100)]
    latency: u64,

    /// Seed for a reproducible input; drawn from OS entropy when absent.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let config = DriverConfig::default()
        .with_log_len(cli.log_len)
        .with_bitrev(!cli.no_bitrev)
        .with_peak(cli.peak)
        .with_widths(cli.data_width, cli.integer_bits, cli.bus_width);
    config.validate().context("invalid run configuration")?;

    let (lo, hi) = config.sample_range;
    let rng = match cli.seed {
        Some(seed) => RandomSource::seeded(seed, lo, hi)?,
        None => RandomSource::from_entropy(lo, hi).context("entropy source unavailable")?,
    };

    let accelerator = SoftwareAccelerator::new(config.codec()?).with_latency(cli.latency);
    let report = AcceleratorDriver::new(config, rng, accelerator)?.run()?;

    println!(
        "validation: {} ({} of {} values off by more than {:.2}, debug code {}, {} compute cycles)",
        report.verdict,
        report.validation.errors,
        report.validation.total,
        report.validation.threshold,
        report.debug_code,
        report.compute_cycles
    );

    Ok(if report.verdict.is_pass() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
