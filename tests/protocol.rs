//! End-to-end runs of the driver against the behavioral accelerator
//!
//! Every bus layout and both bit-reversal placements must verify cleanly.

use fft_accel_verify::prelude::*;

fn run(config: DriverConfig, seed: u64, latency: u64) -> RunReport {
    let (lo, hi) = config.sample_range;
    let rng = RandomSource::seeded(seed, lo, hi).expect("Failed to seed random source");
    let accelerator = SoftwareAccelerator::new(config.codec().expect("Invalid codec"))
        .with_latency(latency);
    AcceleratorDriver::new(config, rng, accelerator)
        .expect("Failed to build driver")
        .run()
        .expect("Run failed")
}

/// Multi-word beats, a single word per beat and a word spread over two beats
#[test]
fn test_all_layouts_pass() {
    let layouts = [(32, 14, 64), (32, 14, 128), (32, 14, 32), (64, 42, 32)];
    for &(data_width, integer_bits, bus_width) in &layouts {
        for do_bitrev in [true, false] {
            let config = DriverConfig::default()
                .with_log_len(4)
                .with_bitrev(do_bitrev)
                .with_widths(data_width, integer_bits, bus_width);
            let report = run(config, 2024, 5);
            assert_eq!(
                report.verdict,
                Verdict::Pass,
                "layout {}/{}/{} do_bitrev={} gave {} mismatches",
                data_width,
                integer_bits,
                bus_width,
                do_bitrev,
                report.validation.errors
            );
            assert_eq!(report.debug_code, DebugCode(0));
        }
    }
}

/// The same logical input decodes identically under either packing strategy
#[test]
fn test_layouts_agree_on_decoded_input() {
    let samples: Vec<f32> = (0..32).map(|i| ((i * 13 % 17) as f32 - 8.0) * 0.3).collect();

    let decode = |bus_width: u32| {
        let codec = DriverConfig::default()
            .with_widths(32, 14, bus_width)
            .codec()
            .expect("Invalid codec");
        let mut memory = MemoryImage::new(codec.layout(), samples.len());
        memory.load(0, &samples, &codec).expect("Load failed");
        memory.dump(0, samples.len(), &codec).expect("Dump failed")
    };

    assert_eq!(decode(32), decode(64));
    assert_eq!(decode(32), decode(128));
}

/// The default configuration (64 points, accelerator-side bit reversal)
#[test]
fn test_default_configuration() {
    let report = run(DriverConfig::default(), 99, 50);
    assert!(report.verdict.is_pass(), "{} mismatches", report.validation.errors);
    assert_eq!(report.validation.total, 128);
    assert_eq!(report.compute_cycles, 52);
}
