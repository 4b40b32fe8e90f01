// ABOUTME: Sigmoid response curves used to turn raw lexical statistics into weights.
// ABOUTME: Supports an unbounded logistic form and a form rescaled to [0, 1] between start and end.

use serde::{Deserialize, Serialize};

/// Largest argument `exp` accepts before overflowing to infinity, `f64::MAX.ln()`.
const MAX_EXP_ARGUMENT: f64 = 709.782712893384;

/// Description of a sigmoid curve.
///
/// When both `start` and `end` are present the bounded form is used: the curve
/// is 0 below `start`, 1 above `end` and rescaled in between. Otherwise the
/// plain logistic centered on `half` is used. The result is optionally flipped
/// (`decreasing`) and finally mapped onto `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigmoidSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    pub half: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    pub slope: f64,
    #[serde(default)]
    pub decreasing: bool,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
}

fn default_max() -> f64 {
    1.0
}

impl SigmoidSpec {
    /// Unbounded logistic with neutral output range.
    pub fn logistic(half: f64, slope: f64) -> Self {
        Self {
            start: None,
            half,
            end: None,
            slope,
            decreasing: false,
            min: 0.0,
            max: default_max(),
        }
    }

    /// Logistic rescaled to reach exactly 0 at `start` and 1 at `end`.
    pub fn bounded(start: f64, half: f64, end: f64, slope: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::logistic(half, slope)
        }
    }

    pub fn decreasing(mut self) -> Self {
        self.decreasing = true;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Evaluates the curve at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let mut value = match (self.start, self.end) {
            (Some(start), Some(end)) => bounded_sigmoid(x, start, self.half, end, self.slope),
            _ => sigmoid(x, self.slope, self.half),
        };

        if self.decreasing {
            value = 1.0 - value;
        }

        self.min + (self.max - self.min) * value
    }
}

/// Logistic function with slope `s` centered on `h`.
pub fn sigmoid(x: f64, s: f64, h: f64) -> f64 {
    let arg = -s * (x - h);
    if arg > MAX_EXP_ARGUMENT {
        return 0.0;
    }
    1.0 / (1.0 + arg.exp())
}

/// Logistic rescaled so that it spans exactly [0, 1] over [start, end].
pub fn bounded_sigmoid(x: f64, start: f64, half: f64, end: f64, slope: f64) -> f64 {
    if x > end {
        return 1.0;
    }
    if x < start {
        return 0.0;
    }

    let y0 = sigmoid(start, slope, half);
    let y1 = sigmoid(end, slope, half);
    let y = sigmoid(x, slope, half);
    if y1 == y0 {
        return 0.0;
    }
    (y - y0) / (y1 - y0)
}
