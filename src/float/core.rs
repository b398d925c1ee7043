// src/float/core.rs

use num_complex::Complex32;
use std::f32::consts::PI;

/// Computes the rotation factors (twiddle factors) for an FFT of size N.
pub(crate) fn precompute_twiddles(twiddles: &mut [Complex32], n: usize) {
    // Only N/2 factors are needed for radix-2
    for j in 0..(n / 2) {
        let angle = -2.0 * PI * (j as f32) / (n as f32);
        let (sin, cos) = angle.sin_cos();
        twiddles[j] = Complex32::new(cos, sin);
    }
}

/// Fills the bit-reversal table.
pub(crate) fn precompute_bitrev(bitrev: &mut [usize], n: usize) {
    bitrev[0] = 0;
    let mut j = 0;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        bitrev[i] = j;
    }
}

/// Radix-2 decimation-in-time FFT core.
///
/// With `permute == false` the buffer must already be in bit-reversed order.
pub(crate) fn radix_2_dit_fft_core(
    buffer: &mut [Complex32],
    twiddles: &[Complex32],
    bitrev: &[usize],
    permute: bool,
) {
    let n = buffer.len();

    // 1. Bit-reverse
    if permute {
        for i in 1..n.saturating_sub(1) {
            let j = bitrev[i];
            if i < j {
                buffer.swap(i, j);
            }
        }
    }

    // 2. Butterflies
    let mut stride = 1;
    let mut tw_index = n >> 1;

    while stride < n {
        let jmax = n - stride;

        for j in (0..jmax).step_by(stride << 1) {
            for i in 0..stride {
                let w = twiddles[i * tw_index];
                let index = j + i;
                let a = buffer[index];
                let t = buffer[index + stride] * w;

                buffer[index] = a + t;
                buffer[index + stride] = a - t;
            }
        }
        stride <<= 1;
        tw_index >>= 1;
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
