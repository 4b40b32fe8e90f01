// ABOUTME: Text normalization and tokenization shared by the term model and the document tree.
// ABOUTME: Collapses whitespace and splits text into lowercase, punctuation-free tokens.

/// Placeholder token that never counts as a word.
const PLACEHOLDER: &str = "*";

/// Collapse every whitespace run (newlines and tabs included) into one space and trim the ends.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true if `s` is non-empty and made only of numeric characters.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

/// Splits text into lowercase tokens.
///
/// ASCII punctuation is deleted unless listed in `keep`. Characters in
/// `to_space` become word breaks and characters in `extras` are deleted as
/// well. An apostrophe stays attached to the preceding fragment and ends the
/// token (`don't` gives `don'` and `t`).
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenizer {
    pub to_space: Vec<char>,
    pub keep: Vec<char>,
    pub extras: Vec<char>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            to_space: vec!['-', '«', '»', '\u{a0}'],
            keep: Vec::new(),
            extras: Vec::new(),
        }
    }
}

impl Tokenizer {
    fn clean(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if self.to_space.contains(&c) {
                out.push(' ');
            } else if c == '\'' {
                out.push_str("' ");
            } else if self.extras.contains(&c) {
                continue;
            } else if c.is_ascii_punctuation() && !self.keep.contains(&c) {
                continue;
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Tokenizes `text`. Empty or whitespace-only text gives no tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .to_lowercase()
            .split_whitespace()
            .filter(|t| *t != PLACEHOLDER)
            .map(str::to_string)
            .collect()
    }
}
