use super::CplxFft;
use num_complex::Complex32;

fn assert_complex_close(val: Complex32, expected: Complex32) {
    let tolerance = 1e-4;
    let diff = (val - expected).l1_norm();
    assert!(
        diff < tolerance,
        "Error. Expected: {}, Got: {}", expected, val
    );
}

#[test]
fn test_fft_known_vector() {
    let n = 8;

    let input = [
        Complex32::new(1.0, 2.0),
        Complex32::new(3.0, 4.0),
        Complex32::new(5.0, 6.0),
        Complex32::new(7.0, 8.0),
        Complex32::new(-8.0, -7.0),
        Complex32::new(-6.0, -5.0),
        Complex32::new(-4.0, -3.0),
        Complex32::new(-2.0, -1.0),
    ];

    let expected_fft = [
        Complex32::new(-4.0, 4.0),
        Complex32::new(30.72792, -12.72792),
        Complex32::new(-16.0, 0.0),
        Complex32::new(12.72792, 5.27208),
        Complex32::new(-8.0, -8.0),
        Complex32::new(5.27208, 12.72792),
        Complex32::new(0.0, -16.0),
        Complex32::new(-12.72792, 30.72792),
    ];

    let mut buffer = input.to_vec();
    let fft = CplxFft::new(n).unwrap();

    fft.process(&mut buffer, true).unwrap();
    for (i, &val) in buffer.iter().enumerate() {
        assert_complex_close(val, expected_fft[i]);
    }

    // Same transform when the caller has already permuted the input
    let mut permuted: Vec<Complex32> = [0, 4, 2, 6, 1, 5, 3, 7].iter().map(|&i| input[i]).collect();
    fft.process(&mut permuted, false).unwrap();
    for (i, &val) in permuted.iter().enumerate() {
        assert_complex_close(val, expected_fft[i]);
    }
}

#[test]
fn test_rejects_bad_sizes() {
    assert!(CplxFft::new(12).is_err());
    let fft = CplxFft::new(8).unwrap();
    let mut short = vec![Complex32::default(); 4];
    assert!(fft.process(&mut short, true).is_err());
}
