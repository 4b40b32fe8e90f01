// ABOUTME: One-dimensional Gaussian smoothing and the small array helpers used by the detector.
// ABOUTME: Boundaries are handled by mirror reflection; shifts extend the edge samples.

/// Kernel radius in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Index into a signal of length `len` extended by mirror reflection
/// (`d c b a | a b c d | d c b a`).
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period) as usize;
    if m < len {
        m
    } else {
        2 * len - 1 - m
    }
}

/// Index clamped to the signal, repeating the first and last samples outward.
pub fn nearest(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}

/// Normalized Gaussian weights over `[-radius, radius]`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Smooths `x` with a Gaussian of standard deviation `sigma`.
pub fn gaussian_filter(x: &[f64], sigma: f64) -> Vec<f64> {
    if x.is_empty() || sigma <= 0.0 {
        return x.to_vec();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    (0..x.len() as isize)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(j, w)| w * x[reflect(i + j as isize - radius, x.len())])
                .sum()
        })
        .collect()
}

/// Caps every value at `ceiling`.
pub fn clip(x: &[f64], ceiling: f64) -> Vec<f64> {
    x.iter().map(|v| v.min(ceiling)).collect()
}

/// Backward difference `x[i] - x[i-1]`, with `x[-1]` taken as `x[0]`.
pub fn backward_difference(x: &[f64]) -> Vec<f64> {
    (0..x.len())
        .map(|i| x[i] - x[nearest(i as isize - 1, x.len())])
        .collect()
}
