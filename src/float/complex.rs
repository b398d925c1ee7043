use crate::common::{Result, VerifyError};
use num_complex::Complex32;
use super::core::{precompute_bitrev, precompute_twiddles, radix_2_dit_fft_core};

/// Complex FFT plan holding the precomputed twiddle and bit-reversal tables.
#[derive(Clone, Debug)]
pub struct CplxFft {
    twiddles: Vec<Complex32>,
    bitrev: Vec<usize>,
    n: usize,
}

impl CplxFft {
    /// Builds the tables for an `n`-point transform.
    pub fn new(n: usize) -> Result<Self> {
        if !n.is_power_of_two() {
            return Err(VerifyError::NotPowerOfTwo { len: n });
        }

        let mut twiddles = vec![Complex32::default(); n / 2];
        let mut bitrev = vec![0; n];
        precompute_bitrev(&mut bitrev, n);
        precompute_twiddles(&mut twiddles, n);
        Ok(Self { twiddles, bitrev, n })
    }

    /// Executes the forward FFT in place. `bit_reverse == false` means the
    /// input has already been permuted into bit-reversed order.
    pub fn process(&self, buffer: &mut [Complex32], bit_reverse: bool) -> Result<()> {
        if buffer.len() != self.n {
            return Err(VerifyError::size_mismatch(self.n, buffer.len()));
        }
        radix_2_dit_fft_core(buffer, &self.twiddles, &self.bitrev, bit_reverse);
        Ok(())
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
