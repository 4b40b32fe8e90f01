// ABOUTME: Detector entry point wiring markup parsing, tree weighting, profile analysis and smearing.
// ABOUTME: Owns the validated configuration and the precomputed wavelet kernel bank.

use std::path::Path;

use tracing::{debug, debug_span};

use crate::config::Config;
use crate::error::Result;
use crate::markup::{parse_markup, MarkupNode};
use crate::result::{Detection, Sentence};
use crate::signal::{analyze, KernelBank};
use crate::terms::TermModel;
use crate::tree::DocumentTree;

/// Finds the main content of HTML pages.
///
/// Building a detector validates the configuration and precomputes the
/// kernel bank; every detection call afterwards only reads it, so one
/// detector can serve any number of pages, including from several threads.
#[derive(Debug, Clone)]
pub struct Detector {
    config: Config,
    bank: KernelBank,
}

impl Detector {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let bank = KernelBank::new(config.content.resampling, config.content.min_scale);
        debug!(
            resampling = config.content.resampling,
            min_scale = bank.min_scale(),
            max_scale = bank.max_scale(),
            "built kernel bank"
        );
        Ok(Self { config, bank })
    }

    /// Loads the configuration from a YAML or JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Config::from_path(path)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Weighted sentences of `html`, in document order, without empty texts.
    pub fn run(&self, html: &str) -> Vec<Sentence> {
        self.detect(html).non_empty_sentences()
    }

    /// Parses `html` and runs the full detection.
    pub fn detect(&self, html: &str) -> Detection {
        self.detect_tree(&parse_markup(html))
    }

    /// Runs the full detection on an already parsed tree.
    pub fn detect_tree(&self, markup: &MarkupNode) -> Detection {
        let span = debug_span!("detect", root = %markup.tag);
        let _enter = span.enter();

        let params = &self.config.content;

        let mut tree = DocumentTree::build(markup);
        tree.prepare(&self.config);

        let profile = tree.volume_profile();
        let volumes: Vec<f64> = profile.iter().map(|entry| entry.volume).collect();
        let analysis = analyze(&volumes, &self.bank, params);

        tree.apply_content_weight(&analysis.intervals, params.epsilon);
        let mut page_terms = TermModel::new();
        tree.smear(&self.config, &mut page_terms);

        let sentences = tree.sentences(params.sentence_threshold);
        debug!(nodes = profile.len(), sentences = sentences.len(), "detection done");

        Detection {
            sentences,
            profile,
            maxima: analysis.maxima,
            intervals: analysis.intervals,
            page_terms,
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        let config = Config::default();
        let bank = KernelBank::new(config.content.resampling, config.content.min_scale);
        Self { config, bank }
    }
}
