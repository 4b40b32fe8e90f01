// ABOUTME: CLI for finding the main content of a web page with crest-core.
// ABOUTME: Reads a page from URL, file or stdin and prints its weighted sentences as text or JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use crest_core::{Config, Detection, Detector};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Print the sentences of a page weighted by how likely they belong to its main content.
#[derive(Parser, Debug)]
#[command(name = "crest")]
#[command(about = "Detect the main content of an HTML page", long_about = None)]
struct Args {
    /// Page URL (http/https), local file path, or "-" to read from stdin.
    target: String,

    /// Detector parameters (.yml, .yaml or .json). Defaults are used when absent.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Only report sentences weighing strictly more than this.
    #[arg(long)]
    threshold: Option<f64>,

    /// Output JSON instead of tab-separated lines.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// With --json, also list the N heaviest terms of the weighted page.
    #[arg(long, value_name = "N")]
    terms: Option<usize>,

    /// Log progress to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.params {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("could not load parameters from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(threshold) = args.threshold {
        if !threshold.is_finite() {
            bail!("threshold must be a finite number");
        }
        config.content.sentence_threshold = threshold;
    }
    let detector = Detector::new(config)?;

    let bytes = load_bytes(&args.target)?;
    let html = String::from_utf8_lossy(&bytes);
    info!(page = %args.target, bytes = bytes.len(), "loaded page");

    let detection = detector.detect(&html);
    let output = if args.json {
        serde_json::to_string_pretty(&json_report(&detection, args.terms))?
    } else {
        text_report(&detection)
    };
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// One `weight<TAB>text` line per sentence.
fn text_report(detection: &Detection) -> String {
    detection
        .non_empty_sentences()
        .iter()
        .map(|s| format!("{:.4}\t{}", s.weight, s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The sentences as a JSON array, or an object also holding the top terms.
fn json_report(detection: &Detection, terms: Option<usize>) -> serde_json::Value {
    let sentences = json!(detection.non_empty_sentences());
    match terms {
        None => sentences,
        Some(n) => {
            let terms: Vec<serde_json::Value> = detection
                .page_terms
                .top_terms(n)
                .into_iter()
                .map(|(term, weight)| json!({ "term": term, "weight": weight }))
                .collect();
            json!({ "sentences": sentences, "terms": terms })
        }
    }
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        let resp = reqwest::blocking::get(target)
            .with_context(|| format!("could not fetch {}", target))?;
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            bail!("could not fetch {}: HTTP {}", target, status);
        }
        let bytes = resp.bytes()?;
        return Ok(bytes.to_vec());
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read(path)?)
}
