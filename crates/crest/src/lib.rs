// ABOUTME: Main library entry point for the crest content detector.
// ABOUTME: Re-exports the public API: Detector, Config, Detection, Sentence, DetectError, TermModel.

//! Crest - finds the main content of a web page.
//!
//! A page is mirrored into a tree of text-bearing elements, inline markup is
//! merged into its enclosing block, and the text volume of every block is
//! read as a signal in document order. Multi-scale peak detection over that
//! signal locates the dense text regions, whose weights are then spread back
//! onto the tree together with static tag priors.
//!
//! # Example
//!
//! ```no_run
//! use crest_core::{Detector, DetectError};
//!
//! fn main() -> Result<(), DetectError> {
//!     let detector = Detector::from_path("params.yml")?;
//!     let html = std::fs::read_to_string("page.html").unwrap_or_default();
//!     for sentence in detector.run(&html) {
//!         println!("{:.4}\t{}", sentence.weight, sentence.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod intervals;
pub mod markup;
pub mod result;
pub mod sigmoid;
pub mod signal;
pub mod terms;
pub mod text;
pub mod tree;

pub use crate::config::{Config, ContentParams, HeapsParams};
pub use crate::detector::Detector;
pub use crate::error::{DetectError, Result};
pub use crate::intervals::{Interval, IntervalMap};
pub use crate::markup::{parse_markup, MarkupNode};
pub use crate::result::{Detection, ProfileEntry, Sentence};
pub use crate::sigmoid::SigmoidSpec;
pub use crate::signal::Maximum;
pub use crate::terms::TermModel;
pub use crate::text::Tokenizer;
