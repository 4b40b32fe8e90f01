// ABOUTME: Volume-profile analysis: multi-scale Mexican-hat peak detection over per-node text volume.
// ABOUTME: Turns the profile into weighted intervals of node positions that likely hold the content.

//! Detection of dense text regions in a volume profile.
//!
//! The profile is clipped, resampled to a fixed length and correlated with a
//! bank of Ricker kernels at every scale. The best response per position,
//! minus its own broad baseline, is scanned for sharp local maxima. Each
//! surviving maximum becomes an interval of profile positions, centered on
//! the maximum and as wide as its best scale, weighted by its share of the
//! total response. Maxima found at the largest scale the response holds are
//! discarded: that kernel no longer fits the window.

mod filter;
mod peaks;
mod resample;
mod wavelet;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ContentParams;
use crate::intervals::IntervalMap;

pub use filter::{clip, gaussian_filter};
pub use peaks::{drop_saturated, find_peaks, select_sharp, Peak};
pub use resample::resample;
pub use wavelet::{max_over_scales, ricker, KernelBank};

/// Width of the Gaussian estimating the kernels' own broad response.
const BASELINE_SIGMA: f64 = 50.0;

/// A detected content center, in profile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Maximum {
    pub position: f64,
    /// Half-width of the region around `position`.
    pub scale: f64,
    /// Share of the total response; all maxima sum to 1.
    pub weight: f64,
}

/// Output of [`analyze`].
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub maxima: Vec<Maximum>,
    pub intervals: IntervalMap,
    /// Resampled length over profile length.
    pub alpha: f64,
}

/// Detects the dense regions of `profile`.
///
/// When no maximum exists the whole profile becomes one interval of weight 1.
pub fn analyze(profile: &[f64], bank: &KernelBank, params: &ContentParams) -> Analysis {
    let len = profile.len();
    let clipped = clip(profile, params.max_profile_volume);
    let resampled = resample(&clipped, params.resampling);
    let alpha = if len == 0 {
        0.0
    } else {
        resampled.len() as f64 / len as f64
    };
    debug!(profile_len = len, alpha, "resampled volume profile");

    let response = bank.response(&resampled);
    let (best, scales) = max_over_scales(&response, resampled.len());

    let max_response = gaussian_filter(&best, params.smooth_factor);
    let base = gaussian_filter(&best, BASELINE_SIGMA);
    let delta: Vec<f64> = max_response
        .iter()
        .zip(&base)
        .map(|(m, b)| (m - b).max(0.0))
        .collect();

    let peaks = drop_saturated(find_peaks(&delta, &scales), response.len());
    let peaks = select_sharp(peaks, params.concavity_threshold);
    info!("found {} maxima", peaks.len());

    let mut intervals = IntervalMap::new();
    if peaks.is_empty() {
        debug!("no maxima, treating the whole page as content");
        intervals.insert(0.0, len as f64, 1.0);
        return Analysis {
            maxima: Vec::new(),
            intervals,
            alpha,
        };
    }

    let total: f64 = peaks.iter().map(|p| p.value).sum();
    let maxima: Vec<Maximum> = peaks
        .iter()
        .map(|p| {
            let mut position = p.position as f64;
            let mut scale = p.scale as f64;
            if alpha > 0.0 {
                position /= alpha;
                scale /= alpha;
            }
            Maximum {
                position,
                scale,
                weight: p.value / total,
            }
        })
        .collect();

    for m in &maxima {
        let begin = (m.position - m.scale).max(0.0);
        let end = (m.position + m.scale).min(len as f64);
        intervals.insert(begin, end, m.weight);
    }

    Analysis {
        maxima,
        intervals,
        alpha,
    }
}
