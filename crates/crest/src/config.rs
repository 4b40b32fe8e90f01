// ABOUTME: Typed configuration for the detector: signal parameters, lexical weighting and tag priors.
// ABOUTME: Loads from YAML or JSON with documented defaults for every missing field.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};
use crate::sigmoid::SigmoidSpec;

/// Parameters of the volume-profile analysis and of the final weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentParams {
    /// Length the volume profile is resampled to before analysis.
    pub resampling: usize,
    /// Smallest wavelet scale in the kernel bank.
    pub min_scale: usize,
    /// Ceiling applied to every profile value.
    pub max_profile_volume: f64,
    /// Floor of a node's content weight.
    pub epsilon: f64,
    /// Width of the narrow Gaussian applied to the per-position maximum.
    pub smooth_factor: f64,
    /// Peaks whose second-order difference is not below `-concavity_threshold` are dropped.
    pub concavity_threshold: f64,
    /// Sentences must weigh strictly more than this to be reported.
    pub sentence_threshold: f64,
}

impl Default for ContentParams {
    fn default() -> Self {
        Self {
            resampling: 500,
            min_scale: 2,
            max_profile_volume: 200.0,
            epsilon: 0.001,
            smooth_factor: 3.0,
            concavity_threshold: 0.01,
            sentence_threshold: 0.01,
        }
    }
}

impl ContentParams {
    /// Largest wavelet scale (exclusive), derived from the resampling length.
    pub fn max_scale(&self) -> usize {
        2 * self.resampling / 3
    }
}

/// Parameters of the Heap's law weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeapsParams {
    /// Below this unigram volume the weight is neutral.
    pub min_volume: f64,
    /// Exponent applied to the volume.
    pub power: f64,
    pub sigmoid: SigmoidSpec,
}

impl Default for HeapsParams {
    fn default() -> Self {
        Self {
            min_volume: 50.0,
            power: 0.5,
            sigmoid: SigmoidSpec::bounded(0.0, 25.0, 60.0, 0.2)
                .decreasing()
                .with_range(0.2, 1.0),
        }
    }
}

fn default_numeric() -> SigmoidSpec {
    SigmoidSpec::logistic(0.3, 20.0)
        .decreasing()
        .with_range(0.05, 1.0)
}

fn default_html() -> BTreeMap<String, f64> {
    [
        ("title", 2.0),
        ("h1", 2.0),
        ("h2", 1.5),
        ("h3", 1.3),
        ("h4", 1.2),
        ("form", 0.2),
        ("header", 0.5),
    ]
    .into_iter()
    .map(|(tag, weight)| (tag.to_string(), weight))
    .collect()
}

/// Complete detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content: ContentParams,
    pub heaps: HeapsParams,
    pub numeric: SigmoidSpec,
    /// Static prior per tag name. Tags not listed weigh 1.0.
    pub html: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: ContentParams::default(),
            heaps: HeapsParams::default(),
            numeric: default_numeric(),
            html: default_html(),
        }
    }
}

impl Config {
    /// Loads a configuration file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DetectError::io(path, e))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yml" | "yaml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            other => Err(DetectError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Prior weight of a tag.
    pub fn html_weight(&self, tag: &str) -> f64 {
        self.html.get(tag).copied().unwrap_or(1.0)
    }

    /// Rejects values the detector cannot work with.
    pub fn validate(&self) -> Result<()> {
        let c = &self.content;
        if c.resampling < 3 {
            return Err(DetectError::invalid_config(format!(
                "resampling must be at least 3, got {}",
                c.resampling
            )));
        }
        if c.min_scale == 0 {
            return Err(DetectError::invalid_config("min_scale must be positive"));
        }
        if c.min_scale >= c.max_scale() {
            return Err(DetectError::invalid_config(format!(
                "min_scale {} must be below max_scale {}",
                c.min_scale,
                c.max_scale()
            )));
        }
        if !(c.smooth_factor > 0.0) {
            return Err(DetectError::invalid_config("smooth_factor must be positive"));
        }
        if !(c.max_profile_volume > 0.0) {
            return Err(DetectError::invalid_config(
                "max_profile_volume must be positive",
            ));
        }
        if c.epsilon < 0.0 {
            return Err(DetectError::invalid_config("epsilon must not be negative"));
        }

        check_sigmoid("heaps.sigmoid", &self.heaps.sigmoid)?;
        check_sigmoid("numeric", &self.numeric)?;
        Ok(())
    }
}

fn check_sigmoid(name: &str, spec: &SigmoidSpec) -> Result<()> {
    if let (Some(start), Some(end)) = (spec.start, spec.end) {
        if start >= end {
            return Err(DetectError::invalid_config(format!(
                "{}: start {} must be below end {}",
                name, start, end
            )));
        }
    }
    Ok(())
}
