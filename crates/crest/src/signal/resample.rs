// ABOUTME: Fourier-domain resampling of a real signal to a new length.
// ABOUTME: Truncates or zero-pads the spectrum, splitting or joining the Nyquist bin when present.

use std::f64::consts::PI;

/// `k`-th bin of the discrete Fourier transform of `x`, as (re, im).
fn dft_bin(x: &[f64], k: usize) -> (f64, f64) {
    let n = x.len();
    let mut re = 0.0;
    let mut im = 0.0;
    for (t, value) in x.iter().enumerate() {
        let angle = 2.0 * PI * ((k * t) % n) as f64 / n as f64;
        re += value * angle.cos();
        im -= value * angle.sin();
    }
    (re, im)
}

/// Resamples `x` to `num` samples with the Fourier method.
///
/// The signal is treated as periodic and band-limited: the low-frequency half
/// spectrum is kept, the rest is dropped (downsampling) or zero (upsampling).
/// The mean is handled separately so a constant signal stays exactly constant.
pub fn resample(x: &[f64], num: usize) -> Vec<f64> {
    let len = x.len();
    if num == 0 {
        return Vec::new();
    }
    if len == 0 {
        return vec![0.0; num];
    }

    let mean = x.iter().sum::<f64>() / len as f64;
    let centered: Vec<f64> = x.iter().map(|v| v - mean).collect();

    let n = num.min(len);
    let bins = n / 2 + 1;
    let mut spectrum: Vec<(f64, f64)> = (0..bins).map(|k| dft_bin(&centered, k)).collect();

    if n % 2 == 0 {
        let nyquist = &mut spectrum[n / 2];
        let factor = if num < len {
            2.0
        } else if len < num {
            0.5
        } else {
            1.0
        };
        nyquist.0 *= factor;
        nyquist.1 *= factor;
    }

    // Inverse real transform of length `num`; bins above the output's Nyquist
    // frequency cannot occur since `bins <= num / 2 + 1`.
    let mut out = Vec::with_capacity(num);
    for t in 0..num {
        let mut sum = spectrum[0].0;
        for (k, &(re, im)) in spectrum.iter().enumerate().skip(1) {
            let angle = 2.0 * PI * ((k * t) % num) as f64 / num as f64;
            let term = re * angle.cos() - im * angle.sin();
            if num % 2 == 0 && k == num / 2 {
                sum += re * angle.cos();
            } else {
                sum += 2.0 * term;
            }
        }
        out.push(mean + sum / len as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_constant_stays_exact() {
        let out = resample(&[3.5; 7], 20);
        assert_eq!(out.len(), 20);
        assert!(out.iter().all(|v| *v == 3.5));
    }

    #[test]
    fn test_same_length_is_identity() {
        let x = [0.0, 1.0, 4.0, 2.0, -1.0, 0.5];
        assert!(close(&resample(&x, x.len()), &x, 1e-9));
        let odd = [1.0, 5.0, 2.0, 0.0, 3.0];
        assert!(close(&resample(&odd, odd.len()), &odd, 1e-9));
    }

    #[test]
    fn test_upsampling_keeps_original_samples() {
        // Band-limited input: a single cosine period over four samples.
        let x = [1.0, 0.0, -1.0, 0.0];
        let out = resample(&x, 8);
        for (i, v) in x.iter().enumerate() {
            assert!((out[2 * i] - v).abs() < 1e-9, "sample {i}: {} vs {v}", out[2 * i]);
        }
        assert!((out[1] - 0.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_downsampling_smooth_signal() {
        let x: Vec<f64> = (0..16)
            .map(|t| (2.0 * PI * t as f64 / 16.0).sin())
            .collect();
        let expected: Vec<f64> = (0..8)
            .map(|t| (2.0 * PI * t as f64 / 8.0).sin())
            .collect();
        assert!(close(&resample(&x, 8), &expected, 1e-9));
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(resample(&[1.0, 2.0], 0).is_empty());
        assert_eq!(resample(&[], 3), vec![0.0; 3]);
        assert_eq!(resample(&[4.0], 3), vec![4.0; 3]);
    }
}
