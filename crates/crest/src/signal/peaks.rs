// ABOUTME: Local maxima of the baseline-free wavelet response, filtered by sharpness.
// ABOUTME: Falls back to every maximum when none is sharp enough.

use tracing::debug;

use super::filter::backward_difference;

/// A local maximum found in resampled coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub position: usize,
    pub scale: usize,
    pub value: f64,
    /// `derivative[i + 1] - derivative[i]`; negative for concave peaks.
    pub second_order: f64,
}

/// Finds the positions where `delta` turns from rising to falling.
///
/// The scan skips the first position and the last two.
pub fn find_peaks(delta: &[f64], scales: &[usize]) -> Vec<Peak> {
    let d = backward_difference(delta);
    let end = d.len().saturating_sub(2);
    (1..end)
        .filter(|&i| d[i] > 0.0 && d[i + 1] < 0.0)
        .map(|i| Peak {
            position: i,
            scale: scales[i],
            value: delta[i],
            second_order: d[i + 1] - d[i],
        })
        .collect()
}

/// Drops the peaks whose best scale is the largest of the `scales` response rows.
///
/// At that scale the kernel is cut by the window and acts as a plain
/// smoothing window, so its maxima trace the page edges instead of a region.
pub fn drop_saturated(peaks: Vec<Peak>, scales: usize) -> Vec<Peak> {
    let before = peaks.len();
    let kept: Vec<Peak> = peaks.into_iter().filter(|p| p.scale + 1 < scales).collect();
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "dropped maxima at the largest scale");
    }
    kept
}

/// Keeps the peaks sharper than `concavity_threshold`, or all of them if none is.
pub fn select_sharp(peaks: Vec<Peak>, concavity_threshold: f64) -> Vec<Peak> {
    let sharp: Vec<Peak> = peaks
        .iter()
        .copied()
        .filter(|p| p.second_order < -concavity_threshold)
        .collect();
    if sharp.is_empty() {
        if !peaks.is_empty() {
            debug!(count = peaks.len(), "no sharp peak, keeping all maxima");
        }
        return peaks;
    }
    sharp
}
