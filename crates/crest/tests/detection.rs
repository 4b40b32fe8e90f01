// ABOUTME: End-to-end tests of the detector on HTML pages.
// ABOUTME: Covers determinism, degenerate pages, article detection and configuration loading.

use std::fs;

use crest_core::{Config, DetectError, Detector, MarkupNode};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const WORDS: &[&str] = &[
    "river", "valley", "harbour", "winter", "lantern", "meadow", "copper", "thunder", "orchard",
    "compass", "granite", "willow", "ember", "falcon", "saddle", "quarry", "marble", "cinder",
    "tavern", "hollow", "beacon", "thistle", "anchor", "timber",
];

/// A paragraph of `len` words drawn from a fixed vocabulary, shifted by `seed`.
fn paragraph(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(seed * 7 + i * 5 + i / 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page with a menu, a long article and a footer, each block its own node.
fn article_page() -> String {
    let mut body = String::new();
    for i in 0..15 {
        body.push_str(&format!(r#"<div class="menu"><a href="/{i}">Menu item</a></div>"#));
    }
    body.push_str(r#"<div class="article"><h1>Story of the valley</h1>"#);
    for i in 0..ARTICLE_PARAGRAPHS {
        body.push_str(&format!("<p>{}</p>\n", paragraph(i, 60)));
    }
    body.push_str("</div>");
    for i in 0..15 {
        body.push_str(&format!(r#"<div class="links"><a href="/l/{i}">Link text</a></div>"#));
    }
    body.push_str("<script>var tracking = 1;</script>");

    format!(
        "<!DOCTYPE html><html><head><title>Valley news</title>\
         <style>p {{ color: red; }}</style></head><body>{body}</body></html>"
    )
}

const ARTICLE_PARAGRAPHS: usize = 20;

/// Detector resampling the profile close to its own length.
fn tuned(sentence_threshold: f64) -> Detector {
    let mut config = Config::default();
    config.content.resampling = 60;
    config.content.sentence_threshold = sentence_threshold;
    Detector::new(config).unwrap()
}

#[test]
fn test_detection_is_deterministic() {
    let detector = Detector::default();
    let html = article_page();

    let first = detector.detect(&html);
    let second = detector.detect(&html);

    assert_eq!(first.sentences, second.sentences);
    assert_eq!(first.maxima, second.maxima);
    assert_eq!(first.intervals, second.intervals);
    assert_eq!(first.profile, second.profile);
}

#[test]
fn test_empty_page_gives_no_sentences() {
    let detector = Detector::default();
    assert!(detector.run("").is_empty());
    assert!(detector.run("<html><body>   \n\t </body></html>").is_empty());
}

#[test]
fn test_page_without_text_is_one_full_interval() {
    let detector = Detector::default();
    let detection = detector.detect("<html><body><div></div><div></div></body></html>");

    assert!(detection.maxima.is_empty());
    assert_eq!(detection.intervals.len(), 1);
    assert_eq!(detection.intervals.end(), detection.profile.len() as f64);
    assert!(detection.profile.iter().all(|entry| entry.volume == 0.0));
}

#[test]
fn test_article_paragraphs_are_reported() {
    let sentences = tuned(0.01).run(&article_page());

    for i in 0..ARTICLE_PARAGRAPHS {
        let text = paragraph(i, 60);
        assert!(
            sentences.iter().any(|s| s.text == text),
            "paragraph {i} missing from {sentences:#?}"
        );
    }
    assert!(sentences.iter().all(|s| !s.text.is_empty()));
    assert!(sentences.iter().all(|s| s.weight > 0.01));
    assert!(sentences.iter().all(|s| !s.text.contains("tracking")));
    assert!(sentences.iter().all(|s| !s.text.contains("color")));
}

#[test]
fn test_report_is_consistent() {
    let detector = Detector::default();
    let detection = detector.detect(&article_page());

    let profile_len = detection.profile.len() as f64;
    for m in &detection.maxima {
        assert!(m.position >= 0.0 && m.position < profile_len);
        assert!(m.weight > 0.0);
    }
    if !detection.maxima.is_empty() {
        let total: f64 = detection.maxima.iter().map(|m| m.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
    assert!(detection.intervals.end() <= profile_len);
    assert!(detection.page_terms.get("valley") > 0.0);
    assert!(!detection.page_terms.contains("tracking"));
}

#[test]
fn test_article_paragraphs_at_default_resampling() {
    let detection = Detector::default().detect(&article_page());

    // Menu and title come first: 19 nodes, then the article block and its heading.
    assert!(
        detection
            .maxima
            .iter()
            .any(|m| (20.0..=41.0).contains(&m.position)),
        "{:?}",
        detection.maxima
    );
    let sentences = detection.non_empty_sentences();
    for i in 0..ARTICLE_PARAGRAPHS {
        let text = paragraph(i, 60);
        assert!(sentences.iter().any(|s| s.text == text), "paragraph {i} missing");
    }
}

#[test]
fn test_deeply_nested_page() {
    let html = format!(
        "<html><body>{}deep text{}</body></html>",
        "<span>".repeat(10_000),
        "</span>".repeat(10_000)
    );
    let mut config = Config::default();
    config.content.sentence_threshold = 0.0;
    let detection = Detector::new(config).unwrap().detect(&html);

    assert!(detection.profile.len() < 5, "{:?}", detection.profile);
    let texts: Vec<String> = detection
        .non_empty_sentences()
        .into_iter()
        .map(|s| s.text)
        .collect();
    assert_eq!(texts, vec!["deep text".to_string()]);
    assert_eq!(detection.page_terms.get("deep"), detection.page_terms.get("text"));
    assert!(detection.page_terms.get("deep") > 0.0);
}

#[test]
fn test_threshold_comes_from_config() {
    let sentences = tuned(1.5).run(&article_page());
    assert!(sentences.iter().any(|s| s.text == "Valley news" && s.weight == 2.0));
    assert!(sentences.iter().all(|s| s.weight > 1.5));
    assert!(sentences.iter().all(|s| s.text != paragraph(0, 60)));
}

#[test]
fn test_detect_tree_on_built_markup() {
    let markup = MarkupNode::element("html").with_child(
        MarkupNode::element("body")
            .with_child(MarkupNode::element("p").with_text(paragraph(1, 30)))
            .with_child(
                MarkupNode::element("p")
                    .with_text("see ")
                    .with_child(MarkupNode::element("a").with_text("this link").with_tail(" now")),
            ),
    );

    let detection = tuned(0.0).detect_tree(&markup);
    let texts: Vec<String> = detection
        .non_empty_sentences()
        .into_iter()
        .map(|s| s.text)
        .collect();
    assert!(texts.contains(&"see this link now".to_string()), "{texts:?}");
}

#[test]
fn test_detector_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.yml");
    fs::write(
        &path,
        "content:\n  resampling: 300\n  sentence_threshold: 0.5\nhtml:\n  h1: 3.0\n",
    )
    .unwrap();

    let detector = Detector::from_path(&path).unwrap();
    let config = detector.config();
    assert_eq!(config.content.resampling, 300);
    assert_eq!(config.content.sentence_threshold, 0.5);
    assert_eq!(config.content.min_scale, 2);
    assert_eq!(config.html_weight("h1"), 3.0);
    assert_eq!(config.html_weight("title"), 1.0);
}

#[test]
fn test_detector_rejects_bad_files() {
    let dir = TempDir::new().unwrap();

    let toml = dir.path().join("params.toml");
    fs::write(&toml, "x = 1").unwrap();
    assert!(matches!(
        Detector::from_path(&toml),
        Err(DetectError::UnsupportedFormat(_))
    ));

    let json = dir.path().join("params.json");
    fs::write(&json, r#"{"content": {"resampling": 2}}"#).unwrap();
    let err = Detector::from_path(&json).unwrap_err();
    assert!(err.is_config());

    let missing = Detector::from_path(dir.path().join("missing.yml")).unwrap_err();
    assert!(missing.is_io());
}
