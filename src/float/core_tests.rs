use super::*;
use num_complex::Complex32;

const EPSILON: f32 = 1e-4;

fn assert_cplx_eq(a: Complex32, b: Complex32) {
    assert!(
        (a - b).l1_norm() < EPSILON,
        "Complex mismatch: {} vs {}", a, b
    );
}

fn tables(n: usize) -> (Vec<Complex32>, Vec<usize>) {
    let mut twiddles = vec![Complex32::default(); n / 2];
    let mut bitrev = vec![0; n];
    precompute_bitrev(&mut bitrev, n);
    precompute_twiddles(&mut twiddles, n);
    (twiddles, bitrev)
}

#[test]
fn test_precompute_bitrev_8() {
    let n = 8;
    let mut bitrev = vec![0; n];
    precompute_bitrev(&mut bitrev, n);

    // 1 (001) -> 4 (100), 3 (011) -> 6 (110), ...
    let expected = vec![0, 4, 2, 6, 1, 5, 3, 7];
    assert_eq!(bitrev, expected);
}

#[test]
fn test_precompute_twiddles_8() {
    let n = 8;
    let mut twiddles = vec![Complex32::default(); n / 2];
    precompute_twiddles(&mut twiddles, n);

    // e^(-j * 2*pi * k / N) for k=0..N/2-1
    assert_cplx_eq(twiddles[0], Complex32::new(1.0, 0.0));

    let sqrt2_2 = (2.0f32).sqrt() / 2.0;
    assert_cplx_eq(twiddles[1], Complex32::new(sqrt2_2, -sqrt2_2));
    assert_cplx_eq(twiddles[2], Complex32::new(0.0, -1.0));
    assert_cplx_eq(twiddles[3], Complex32::new(-sqrt2_2, -sqrt2_2));
}

#[test]
fn test_radix_2_dit_fft_core_basic() {
    let n = 4;
    let mut buffer = vec![Complex32::new(1.0, 0.0); n];
    let (twiddles, bitrev) = tables(n);

    radix_2_dit_fft_core(&mut buffer, &twiddles, &bitrev, true);

    // Expected: [4, 0, 0, 0]
    assert_cplx_eq(buffer[0], Complex32::new(4.0, 0.0));
    assert_cplx_eq(buffer[1], Complex32::new(0.0, 0.0));
    assert_cplx_eq(buffer[2], Complex32::new(0.0, 0.0));
    assert_cplx_eq(buffer[3], Complex32::new(0.0, 0.0));
}

#[test]
fn test_skip_permutation_on_reversed_input() {
    let n = 8;
    let (twiddles, bitrev) = tables(n);
    let input: Vec<Complex32> = (0..n)
        .map(|i| Complex32::new(i as f32, 1.0 - i as f32))
        .collect();

    let mut natural = input.clone();
    radix_2_dit_fft_core(&mut natural, &twiddles, &bitrev, true);

    let mut reversed: Vec<Complex32> = (0..n).map(|i| input[bitrev[i]]).collect();
    radix_2_dit_fft_core(&mut reversed, &twiddles, &bitrev, false);

    for (a, b) in natural.iter().zip(&reversed) {
        assert_cplx_eq(*a, *b);
    }
}
