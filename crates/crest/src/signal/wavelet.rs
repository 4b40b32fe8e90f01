// ABOUTME: Bank of Mexican-hat (Ricker) kernels and their multi-scale correlation with a signal.
// ABOUTME: The bank is built once per detector and only read afterwards.

use std::f64::consts::PI;

use super::filter::nearest;

/// Ricker wavelet of width `a` sampled on `points` points.
///
/// The peak sits on sample `points / 2`, the same origin [`KernelBank::response`]
/// shifts the signal around, so even lengths stay aligned with the signal.
pub fn ricker(points: usize, a: f64) -> Vec<f64> {
    let amplitude = 2.0 / ((3.0 * a).sqrt() * PI.powf(0.25));
    let wsq = a * a;
    let center = (points / 2) as f64;
    (0..points)
        .map(|i| {
            let x = i as f64 - center;
            let xsq = x * x;
            amplitude * (1.0 - xsq / wsq) * (-xsq / (2.0 * wsq)).exp()
        })
        .collect()
}

/// Ricker kernels for every integer scale in `[min_scale, max_scale)`.
#[derive(Debug, Clone)]
pub struct KernelBank {
    min_scale: usize,
    max_scale: usize,
    length: usize,
    kernels: Vec<Vec<f64>>,
}

impl KernelBank {
    /// Builds kernels of `length` points with `max_scale = 2 * length / 3`.
    pub fn new(length: usize, min_scale: usize) -> Self {
        let max_scale = 2 * length / 3;
        let kernels = (min_scale..max_scale)
            .map(|scale| ricker(length, scale as f64))
            .collect();
        Self {
            min_scale,
            max_scale,
            length,
            kernels,
        }
    }

    pub fn min_scale(&self) -> usize {
        self.min_scale
    }

    pub fn max_scale(&self) -> usize {
        self.max_scale
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Kernel of a given scale, if the bank holds it.
    pub fn kernel(&self, scale: usize) -> Option<&[f64]> {
        if scale < self.min_scale || scale >= self.max_scale {
            return None;
        }
        Some(&self.kernels[scale - self.min_scale])
    }

    /// Correlates every kernel with every shift of `signal`.
    ///
    /// Row `s` of the result holds the response at scale `s` for each
    /// position; rows below `min_scale` are zero. Only scales below
    /// `2 * signal.len() / 3` are used, and kernels are cut to the signal
    /// length. Samples shifted in from outside repeat the nearest edge.
    pub fn response(&self, signal: &[f64]) -> Vec<Vec<f64>> {
        let n = signal.len();
        let scales = (2 * n / 3).min(self.max_scale);
        let width = n.min(self.length);
        let half = (n / 2) as isize;

        (0..scales)
            .map(|scale| match self.kernel(scale) {
                None => vec![0.0; n],
                Some(kernel) => (0..n as isize)
                    .map(|position| {
                        kernel[..width]
                            .iter()
                            .enumerate()
                            .map(|(t, k)| k * signal[nearest(t as isize + position - half, n)])
                            .sum()
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Largest response per position over all scales, with the scale reaching it.
///
/// Scales below the bank's minimum respond with 0, so a position where every
/// kernel responds negatively reports 0 at scale 0.
pub fn max_over_scales(response: &[Vec<f64>], len: usize) -> (Vec<f64>, Vec<usize>) {
    let mut best = vec![f64::NEG_INFINITY; len];
    let mut best_scale = vec![0; len];
    for (scale, row) in response.iter().enumerate() {
        for (position, value) in row.iter().enumerate() {
            if *value > best[position] {
                best[position] = *value;
                best_scale[position] = scale;
            }
        }
    }
    if response.is_empty() {
        best.iter_mut().for_each(|v| *v = 0.0);
    }
    (best, best_scale)
}
