// ABOUTME: Output types of a detection run: weighted sentences, the volume profile and the full report.
// ABOUTME: Serializable so the CLI can emit them as JSON.

use serde::Serialize;

use crate::intervals::IntervalMap;
use crate::signal::Maximum;
use crate::terms::TermModel;

/// Text of one flattened node and its final weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    pub text: String,
    pub weight: f64,
}

impl Sentence {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// One sample of the volume profile, labelled `tag:class`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEntry {
    pub label: String,
    pub volume: f64,
}

/// Everything a detection run produced.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Sentences above the threshold in tree order. May contain empty texts.
    pub sentences: Vec<Sentence>,
    pub profile: Vec<ProfileEntry>,
    pub maxima: Vec<Maximum>,
    pub intervals: IntervalMap,
    /// Term model of the whole page, each node weighted by its final weight.
    pub page_terms: TermModel,
}

impl Detection {
    /// Sentences with non-empty text.
    pub fn non_empty_sentences(&self) -> Vec<Sentence> {
        self.sentences
            .iter()
            .filter(|s| !s.text.is_empty())
            .cloned()
            .collect()
    }
}
