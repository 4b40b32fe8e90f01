// ABOUTME: Bag-of-words term model counting unigrams, bigrams and trigrams of text fragments.
// ABOUTME: Offers named algebra (combine, offset, scale, power) and the Heap's law and numeric weights.

use std::collections::HashMap;

use crate::config::HeapsParams;
use crate::sigmoid::SigmoidSpec;
use crate::text::{is_numeric, Tokenizer};

/// Joins the tokens of a bigram or trigram. Keys without it are unigrams.
const SEPARATOR: char = ' ';

fn is_unigram(term: &str) -> bool {
    !term.contains(SEPARATOR)
}

/// Counts of terms seen in one or more text fragments.
///
/// `volume` is the total unigram count and `numeric` the part of it made of
/// purely numeric tokens. Both can always be recomputed from the unigram keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermModel {
    counts: HashMap<String, f64>,
    volume: f64,
    numeric: f64,
    text_count: usize,
}

impl TermModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from one fragment.
    pub fn from_text(text: &str) -> Self {
        let mut model = Self::new();
        model.account_for(text);
        model
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn numeric(&self) -> f64 {
        self.numeric
    }

    /// Number of non-empty fragments folded into this model.
    pub fn text_count(&self) -> usize {
        self.text_count
    }

    /// Count of a term, 0 if absent.
    pub fn get(&self, term: &str) -> f64 {
        self.counts.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Number of distinct terms of any order.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn distinct_unigrams(&self) -> usize {
        self.counts.keys().filter(|k| is_unigram(k)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn add_term(&mut self, term: String, unigram: bool) {
        if unigram {
            self.volume += 1.0;
            if is_numeric(&term) {
                self.numeric += 1.0;
            }
        }
        *self.counts.entry(term).or_insert(0.0) += 1.0;
    }

    /// Folds a text fragment into the model using the default tokenizer.
    pub fn account_for(&mut self, text: &str) {
        self.account_for_with(text, &Tokenizer::default());
    }

    /// Folds a text fragment into the model.
    ///
    /// Every token adds its unigram, the bigram with the next token and the
    /// trigram centered on it. Fragments without tokens are ignored.
    pub fn account_for_with(&mut self, text: &str, tokenizer: &Tokenizer) {
        let tokens = tokenizer.tokens(text);
        if tokens.is_empty() {
            return;
        }
        self.text_count += 1;

        for (i, curr) in tokens.iter().enumerate() {
            let left = if i > 0 { tokens.get(i - 1) } else { None };
            let right = tokens.get(i + 1);

            self.add_term(curr.clone(), true);
            if let Some(right) = right {
                self.add_term(format!("{}{}{}", curr, SEPARATOR, right), false);
                if let Some(left) = left {
                    self.add_term(format!("{}{}{}{}{}", left, SEPARATOR, curr, SEPARATOR, right), false);
                }
            }
        }
    }

    /// Sum of two models: union of keys with added counts.
    pub fn combine(&self, other: &TermModel) -> TermModel {
        let mut result = self.clone();
        result.absorb(other);
        result
    }

    /// Adds `other` into this model and returns it.
    pub fn absorb(&mut self, other: &TermModel) -> &mut Self {
        for (term, count) in &other.counts {
            *self.counts.entry(term.clone()).or_insert(0.0) += count;
        }
        self.volume += other.volume;
        self.numeric += other.numeric;
        self.text_count += other.text_count;
        self
    }

    /// Adds `scalar` to every existing count.
    ///
    /// For each unigram key the volume grows by `scalar`, and the numeric
    /// volume grows by `scalar` only when the scalar itself prints as a
    /// number (`2` does, `2.5` does not).
    pub fn offset(&self, scalar: f64) -> TermModel {
        let mut result = self.clone();
        result.offset_in_place(scalar);
        result
    }

    pub fn offset_in_place(&mut self, scalar: f64) -> &mut Self {
        let scalar_is_numeric = is_numeric(&scalar.to_string());
        for (term, count) in self.counts.iter_mut() {
            *count += scalar;
            if is_unigram(term) {
                self.volume += scalar;
                if scalar_is_numeric {
                    self.numeric += scalar;
                }
            }
        }
        self
    }

    /// Multiplies every count, the volume and the numeric volume by `scalar`.
    pub fn scale(&self, scalar: f64) -> TermModel {
        let mut result = self.clone();
        result.scale_in_place(scalar);
        result
    }

    pub fn scale_in_place(&mut self, scalar: f64) -> &mut Self {
        for count in self.counts.values_mut() {
            *count *= scalar;
        }
        self.volume *= scalar;
        self.numeric *= scalar;
        self
    }

    /// Raises every count to `exponent` and recomputes the volumes.
    pub fn raise_to_power(&self, exponent: f64) -> TermModel {
        let mut result = self.clone();
        for count in result.counts.values_mut() {
            *count = count.powf(exponent);
        }
        result.recompute_volume();
        result
    }

    /// Recomputes `volume` and `numeric` from the unigram keys.
    pub fn recompute_volume(&mut self) {
        self.volume = 0.0;
        self.numeric = 0.0;
        for (term, count) in &self.counts {
            if is_unigram(term) {
                self.volume += count;
                if is_numeric(term) {
                    self.numeric += count;
                }
            }
        }
    }

    /// Heap's law weight: vocabulary growth relative to text length.
    ///
    /// Neutral (1.0) for small models, models without unigrams and models
    /// built from fewer than four fragments.
    pub fn heaps_weight(&self, params: &HeapsParams) -> f64 {
        let unigrams = self.distinct_unigrams();
        if self.volume < params.min_volume || unigrams == 0 || self.text_count < 4 {
            return 1.0;
        }

        let value = 100.0 * self.volume.powf(params.power) / unigrams as f64;
        params.sigmoid.eval(value)
    }

    /// Weight of the share of numeric tokens. 0.0 for an empty model.
    pub fn numeric_weight(&self, spec: &SigmoidSpec) -> f64 {
        if self.volume == 0.0 {
            return 0.0;
        }
        spec.eval(self.numeric / self.volume)
    }

    /// Heaviest unigrams, ties broken alphabetically.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, f64)> {
        let mut terms: Vec<(&str, f64)> = self.iter().filter(|(t, _)| is_unigram(t)).collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn assert_same_counts(a: &TermModel, b: &TermModel) {
        assert_eq!(a.len(), b.len());
        for (term, count) in a.iter() {
            assert!(approx(count, b.get(term)), "term {term:?}: {count} vs {}", b.get(term));
        }
        assert!(approx(a.volume(), b.volume()));
        assert!(approx(a.numeric(), b.numeric()));
    }

    #[test]
    fn test_account_for_ngrams() {
        let model = TermModel::from_text("a b a");
        assert_eq!(model.get("a"), 2.0);
        assert_eq!(model.get("b"), 1.0);
        assert_eq!(model.get("a b"), 1.0);
        assert_eq!(model.get("b a"), 1.0);
        assert_eq!(model.get("a b a"), 1.0);
        assert_eq!(model.len(), 5);
        assert_eq!(model.volume(), 3.0);
        assert_eq!(model.text_count(), 1);
    }

    #[test]
    fn test_account_for_blank_is_noop() {
        let mut model = TermModel::new();
        model.account_for("");
        model.account_for("  \n\t");
        assert!(model.is_empty());
        assert_eq!(model.text_count(), 0);
        assert_eq!(model.volume(), 0.0);
    }

    #[test]
    fn test_numeric_volume() {
        let model = TermModel::from_text("price 100 dollars 25");
        assert_eq!(model.volume(), 4.0);
        assert_eq!(model.numeric(), 2.0);
    }

    #[test]
    fn test_combine_is_commutative_and_associative() {
        let a = TermModel::from_text("the quick brown fox");
        let b = TermModel::from_text("the lazy dog 42");
        let c = TermModel::from_text("quick dog");

        assert_same_counts(&a.combine(&b), &b.combine(&a));
        assert_same_counts(&a.combine(&b).combine(&c), &a.combine(&b.combine(&c)));
        assert_eq!(a.combine(&b).text_count(), 2);
    }

    #[test]
    fn test_scale_distributes_over_combine() {
        let a = TermModel::from_text("one two three two");
        let b = TermModel::from_text("two 3 four");
        let left = a.combine(&b).scale(2.5);
        let right = a.scale(2.5).combine(&b.scale(2.5));
        assert_same_counts(&left, &right);
    }

    #[test]
    fn test_in_place_variants_match() {
        let a = TermModel::from_text("alpha beta");
        let b = TermModel::from_text("beta gamma");
        let mut c = a.clone();
        c.absorb(&b).scale_in_place(0.5);
        assert_same_counts(&c, &a.combine(&b).scale(0.5));
    }

    #[test]
    fn test_raise_to_power_recomputes_volume() {
        let model = TermModel::from_text("x x x 7 7").raise_to_power(2.0);
        assert_eq!(model.get("x"), 9.0);
        assert_eq!(model.get("7"), 4.0);
        assert_eq!(model.volume(), 13.0);
        assert_eq!(model.numeric(), 4.0);
    }

    #[test]
    fn test_offset_edge_case() {
        let model = TermModel::from_text("a 1");
        let shifted = model.offset(2.0);
        assert_eq!(shifted.get("a"), 3.0);
        assert_eq!(shifted.get("a 1"), 3.0);
        assert_eq!(shifted.volume(), 6.0);
        assert_eq!(shifted.numeric(), 1.0 + 4.0);

        let fractional = model.offset(0.5);
        assert_eq!(fractional.volume(), 3.0);
        assert_eq!(fractional.numeric(), 1.0);
    }

    #[test]
    fn test_heaps_weight_needs_four_fragments() {
        let mut model = TermModel::new();
        for _ in 0..3 {
            model.account_for(&"lorem ipsum dolor sit amet ".repeat(40));
        }
        assert!(model.volume() > 100.0);
        assert_eq!(model.heaps_weight(&HeapsParams::default()), 1.0);
    }

    #[test]
    fn test_heaps_weight_below_min_volume() {
        let mut model = TermModel::new();
        for _ in 0..5 {
            model.account_for("home");
        }
        assert_eq!(model.heaps_weight(&HeapsParams::default()), 1.0);
    }

    #[test]
    fn test_heaps_weight_penalizes_repetition() {
        let params = HeapsParams::default();

        let mut boilerplate = TermModel::new();
        for _ in 0..40 {
            boilerplate.account_for("home about contact");
        }

        let mut prose = TermModel::new();
        let words: Vec<String> = (0..160).map(|i| format!("word{}", i)).collect();
        for chunk in words.chunks(40) {
            prose.account_for(&chunk.join(" "));
        }

        let repetitive = boilerplate.heaps_weight(&params);
        let varied = prose.heaps_weight(&params);
        assert!(repetitive < varied, "{repetitive} >= {varied}");
        assert!(approx(repetitive, params.sigmoid.min));
    }

    #[test]
    fn test_numeric_weight() {
        let spec = SigmoidSpec::logistic(0.5, 10.0);
        assert_eq!(TermModel::new().numeric_weight(&spec), 0.0);

        let words = TermModel::from_text("plain words only");
        let numbers = TermModel::from_text("1 2 3 4");
        assert!(words.numeric_weight(&spec) < numbers.numeric_weight(&spec));
    }

    #[test]
    fn test_top_terms() {
        let model = TermModel::from_text("b a c a b a");
        let top = model.top_terms(2);
        assert_eq!(top, vec![("a", 3.0), ("b", 2.0)]);
    }
}
