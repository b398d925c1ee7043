// src/golden/core.rs

/// Swaps complex point `i` with point `rev(i)` over `2 * len` interleaved reals.
/// The caller guarantees `len == 1 << log_len` and the buffer is long enough.
pub(crate) fn bit_reverse_core(data: &mut [f32], len: usize, log_len: u32) {
    if log_len == 0 {
        return;
    }
    let shift = u32::BITS - log_len;
    for i in 0..len {
        let r = ((i as u32).reverse_bits() >> shift) as usize;
        if i < r {
            data.swap(2 * i, 2 * r);
            data.swap(2 * i + 1, 2 * r + 1);
        }
    }
}

/// In-place radix-2 decimation-in-time butterflies over bit-reversed input.
///
/// The twiddle factor for each stage is advanced by a trigonometric
/// recurrence instead of a table, so only one `sin` pair is evaluated per stage.
/// `sign` is -1.0 for the forward transform. No scaling is applied.
pub(crate) fn butterflies_core(data: &mut [f32], len: usize, log_len: u32, sign: f32) {
    let mut span = 1;

    for _ in 0..log_len {
        let theta = sign * std::f32::consts::PI / span as f32;
        let s = (theta as f64).sin() as f32;
        let t = (0.5 * theta as f64).sin() as f32;
        let s2 = 2.0 * t * t;

        let mut w_re = 1.0f32;
        let mut w_im = 0.0f32;

        for a in 0..span {
            for b in (0..len).step_by(2 * span) {
                let i = b + a;
                let j = i + span;

                let z_re = data[2 * j];
                let z_im = data[2 * j + 1];
                let t_re = w_re * z_re - w_im * z_im;
                let t_im = w_re * z_im + w_im * z_re;

                data[2 * j] = data[2 * i] - t_re;
                data[2 * j + 1] = data[2 * i + 1] - t_im;
                data[2 * i] += t_re;
                data[2 * i + 1] += t_im;
            }

            let next_re = w_re - (s * w_im + s2 * w_re);
            let next_im = w_im + (s * w_re - s2 * w_im);
            w_re = next_re;
            w_im = next_im;
        }
        span <<= 1;
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
