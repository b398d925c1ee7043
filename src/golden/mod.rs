//! Reference ("golden") FFT over interleaved `re, im` buffers.

mod core;

use crate::common::{Result, VerifyError};
use self::core::{bit_reverse_core, butterflies_core};

/// Transform direction. The forward transform uses the `e^{-j...}` kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Sign of the exponent: -1 forward, +1 inverse.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => -1,
            Direction::Inverse => 1,
        }
    }
}

fn check_buffer(data: &[f32], len: usize, log_len: u32) -> Result<()> {
    if !len.is_power_of_two() {
        return Err(VerifyError::NotPowerOfTwo { len });
    }
    if log_len >= usize::BITS || 1usize << log_len != len {
        return Err(VerifyError::invalid_config(format!(
            "log2 length {log_len} does not describe {len} points"
        )));
    }
    if data.len() < 2 * len {
        return Err(VerifyError::size_mismatch(2 * len, data.len()));
    }
    Ok(())
}

/// Permutes the first `len` complex points of `data` into bit-reversed order.
/// Applying it twice restores the buffer.
pub fn bit_reverse(data: &mut [f32], len: usize, log_len: u32) -> Result<()> {
    check_buffer(data, len, log_len)?;
    bit_reverse_core(data, len, log_len);
    Ok(())
}

/// Computes the unscaled FFT of `len` complex points in place.
///
/// When `already_bit_reversed` is false the input is permuted first. Words of
/// `data` past `2 * len` are left untouched.
pub fn transform(
    data: &mut [f32],
    len: usize,
    log_len: u32,
    direction: Direction,
    already_bit_reversed: bool,
) -> Result<()> {
    check_buffer(data, len, log_len)?;
    if !already_bit_reversed {
        bit_reverse_core(data, len, log_len);
    }
    butterflies_core(data, len, log_len, direction.sign() as f32);
    Ok(())
}
