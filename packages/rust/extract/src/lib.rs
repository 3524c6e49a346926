//! Metadata extraction from article HTML.
//!
//! Pure functions over file contents: parsing never fails the run, it only
//! yields `None` fields. The caller decides how to fall back (typically to
//! [`humanize_stem`] for the title).

use scraper::{Html, Selector};
use tracing::warn;

use arcindex_shared::ArchiveConfig;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Metadata extracted from one article.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    /// Text of the first `<h1>`, whitespace-collapsed. `None` when the
    /// document has no heading.
    pub title: Option<String>,
    /// Text of the first non-empty `<p>`, truncated to the configured
    /// maximum length.
    pub excerpt: Option<String>,
    /// Whitespace-token count of the body text.
    pub word_count: usize,
    /// Configured marker classes present somewhere in the markup.
    pub markers: Vec<String>,
}

/// Options for metadata extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Maximum excerpt length in characters.
    pub excerpt_max_len: usize,
    /// CSS class names to detect.
    pub marker_classes: Vec<String>,
}

impl From<&ArchiveConfig> for ExtractOptions {
    fn from(config: &ArchiveConfig) -> Self {
        Self {
            excerpt_max_len: config.content.excerpt_max_len,
            marker_classes: config.content.marker_classes.clone(),
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from(&ArchiveConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract display metadata from article HTML.
pub fn extract(html: &str, opts: &ExtractOptions) -> Extracted {
    let doc = Html::parse_document(html);

    let title = first_text(&doc, "h1");
    let excerpt = first_text(&doc, "p").map(|text| truncate(&text, opts.excerpt_max_len));
    let word_count = body_word_count(&doc);
    let markers = detect_markers(&doc, &opts.marker_classes);

    Extracted {
        title,
        excerpt,
        word_count,
        markers,
    }
}

/// Derive a display title from a file name when the document has no heading
/// (`article_two.html` → "Article Two").
pub fn humanize_stem(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);

    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.collect::<String>())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Collapsed text of the first non-empty element matching the selector.
fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).expect("valid selector");

    doc.select(&sel)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

/// Count whitespace-separated tokens in the body text.
fn body_word_count(doc: &Html) -> usize {
    let sel = Selector::parse("body").expect("valid selector");

    doc.select(&sel)
        .next()
        .map(|body| body.text().collect::<String>().split_whitespace().count())
        .unwrap_or(0)
}

/// Report which configured marker classes appear in the document.
fn detect_markers(doc: &Html, classes: &[String]) -> Vec<String> {
    classes
        .iter()
        .filter(|cls| {
            match Selector::parse(&format!("[class~=\"{cls}\"]")) {
                Ok(sel) => doc.select(&sel).next().is_some(),
                Err(_) => {
                    warn!(class = %cls, "unusable marker class, ignoring");
                    false
                }
            }
        })
        .cloned()
        .collect()
}

/// Collapse internal whitespace runs and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `max` characters on a char boundary, appending an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_title_from_first_h1() {
        let html = "<html><body><h1>First Essay</h1><p>Opening.</p></body></html>";
        let result = extract(html, &ExtractOptions::default());
        assert_eq!(result.title.as_deref(), Some("First Essay"));
    }

    #[test]
    fn extract_title_collapses_nested_markup_and_whitespace() {
        let html = "<h1>  Spin   <em>Glass</em>\n  Notes </h1>";
        let result = extract(html, &ExtractOptions::default());
        assert_eq!(result.title.as_deref(), Some("Spin Glass Notes"));
    }

    #[test]
    fn extract_without_heading_yields_none() {
        let html = "<html><body><p>No heading here.</p></body></html>";
        let result = extract(html, &ExtractOptions::default());
        assert!(result.title.is_none());
    }

    #[test]
    fn extract_excerpt_from_first_paragraph() {
        let html = "<h1>T</h1><p>The opening paragraph.</p><p>Second.</p>";
        let result = extract(html, &ExtractOptions::default());
        assert_eq!(result.excerpt.as_deref(), Some("The opening paragraph."));
    }

    #[test]
    fn extract_excerpt_skips_empty_paragraphs() {
        let html = "<h1>T</h1><p>   </p><p>Real text.</p>";
        let result = extract(html, &ExtractOptions::default());
        assert_eq!(result.excerpt.as_deref(), Some("Real text."));
    }

    #[test]
    fn excerpt_truncated_on_char_boundary() {
        let long = "αβγδ".repeat(100);
        let html = format!("<p>{long}</p>");
        let opts = ExtractOptions {
            excerpt_max_len: 10,
            ..ExtractOptions::default()
        };

        let result = extract(&html, &opts);
        let excerpt = result.excerpt.unwrap();
        assert_eq!(excerpt.chars().count(), 11); // 10 chars + ellipsis
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn word_count_covers_body_text() {
        let html = "<body><h1>Two words</h1><p>and three more</p></body>";
        let result = extract(html, &ExtractOptions::default());
        assert_eq!(result.word_count, 5);
    }

    #[test]
    fn detect_configured_marker_classes() {
        let html = r#"<body><h1>T</h1><span class="glitch heavy">x</span></body>"#;
        let opts = ExtractOptions {
            marker_classes: vec!["glitch".into(), "math-corrupt".into()],
            ..ExtractOptions::default()
        };

        let result = extract(html, &opts);
        assert_eq!(result.markers, vec!["glitch".to_string()]);
    }

    #[test]
    fn no_markers_detected_by_default() {
        let html = r#"<span class="glitch">x</span>"#;
        let result = extract(html, &ExtractOptions::default());
        assert!(result.markers.is_empty());
    }

    #[test]
    fn extract_empty_document() {
        let result = extract("", &ExtractOptions::default());
        assert!(result.title.is_none());
        assert!(result.excerpt.is_none());
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn humanize_stem_examples() {
        assert_eq!(humanize_stem("article_two.html"), "Article Two");
        assert_eq!(humanize_stem("spin-glass-notes.html"), "Spin Glass Notes");
        assert_eq!(humanize_stem("essay.html"), "Essay");
        assert_eq!(humanize_stem("no_extension"), "No Extension");
    }
}
