//! Index page rendering.
//!
//! Produces one self-contained HTML document listing every article grouped
//! by phase folder. The output carries no generation timestamp: for a fixed
//! input tree the rendered bytes are identical across runs.

use arcindex_shared::{ArchiveConfig, ContentFile, PhaseGroup};

/// Options for index rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Title rendered at the top of the page.
    pub site_title: String,
    /// Render per-article last-modified timestamps.
    pub show_modified: bool,
}

impl From<&ArchiveConfig> for RenderOptions {
    fn from(config: &ArchiveConfig) -> Self {
        Self {
            site_title: config.index.site_title.clone(),
            show_modified: config.index.show_modified,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&ArchiveConfig::default())
    }
}

/// Render the full index page for the given phase groups.
///
/// Groups and files are emitted in the order given; ordering is the
/// scanner's responsibility. Folders with no articles are shown as empty
/// sections rather than omitted.
pub fn render_index(groups: &[PhaseGroup], opts: &RenderOptions) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&opts.site_title)));
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&opts.site_title)));

    if groups.is_empty() {
        out.push_str("<p class=\"empty\">No articles yet.</p>\n");
    }

    for group in groups {
        out.push_str(&format!(
            "<section>\n<h2>{}</h2>\n<ul>\n",
            escape_html(&group.name)
        ));
        for file in &group.files {
            render_entry(&mut out, file, opts);
        }
        out.push_str("</ul>\n</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

const STYLE: &str = "\
body { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; font-family: serif; }
h2 { border-bottom: 1px solid #999; }
.excerpt { margin: 0.25rem 0 0.75rem; color: #555; }
.badge { font-size: 0.75em; border: 1px solid #999; border-radius: 3px; padding: 0 0.3em; margin-left: 0.4em; }
.empty { color: #777; }
";

/// Render one article entry as a list item.
fn render_entry(out: &mut String, file: &ContentFile, opts: &RenderOptions) {
    out.push_str(&format!(
        "<li><a href=\"{}\">{}</a>",
        escape_html(&file.rel_path),
        escape_html(&file.title)
    ));

    for marker in &file.markers {
        out.push_str(&format!(
            "<span class=\"badge\">{}</span>",
            escape_html(marker)
        ));
    }

    if opts.show_modified {
        if let Some(modified) = &file.modified_at {
            out.push_str(&format!(
                "<time datetime=\"{}\"> — {}</time>",
                modified.to_rfc3339(),
                modified.format("%Y-%m-%d")
            ));
        }
    }

    if let Some(excerpt) = &file.excerpt {
        out.push_str(&format!(
            "\n<p class=\"excerpt\">{}</p>",
            escape_html(excerpt)
        ));
    }

    out.push_str("</li>\n");
}

/// Escape text for safe interpolation into HTML body and attribute values.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(title: &str, rel_path: &str) -> ContentFile {
        ContentFile {
            title: title.into(),
            rel_path: rel_path.into(),
            excerpt: None,
            word_count: 0,
            modified_at: None,
            content_hash: "hash".into(),
            markers: vec![],
        }
    }

    #[test]
    fn render_lists_entries_under_phase_headings() {
        let groups = vec![PhaseGroup {
            name: "phase1".into(),
            files: vec![
                file("First Essay", "phase1/article_one.html"),
                file("Article Two", "phase1/article_two.html"),
            ],
        }];

        let html = render_index(&groups, &RenderOptions::default());
        assert!(html.contains("<h2>phase1</h2>"));
        assert!(html.contains("<a href=\"phase1/article_one.html\">First Essay</a>"));
        assert!(html.contains("<a href=\"phase1/article_two.html\">Article Two</a>"));
    }

    #[test]
    fn render_escapes_titles_and_paths() {
        let groups = vec![PhaseGroup {
            name: "phase<1>".into(),
            files: vec![file("Essays & \"Notes\"", "phase<1>/a.html")],
        }];

        let html = render_index(&groups, &RenderOptions::default());
        assert!(html.contains("Essays &amp; &quot;Notes&quot;"));
        assert!(html.contains("<h2>phase&lt;1&gt;</h2>"));
        assert!(!html.contains("Essays & \"Notes\""));
    }

    #[test]
    fn render_empty_corpus_is_valid_page() {
        let html = render_index(&[], &RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No articles yet."));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn render_phase_with_no_files_shows_empty_section() {
        let groups = vec![PhaseGroup {
            name: "phase9".into(),
            files: vec![],
        }];

        let html = render_index(&groups, &RenderOptions::default());
        assert!(html.contains("<h2>phase9</h2>"));
    }

    #[test]
    fn render_includes_excerpt_and_markers() {
        let mut f = file("Essay", "phase1/essay.html");
        f.excerpt = Some("The opening line.".into());
        f.markers = vec!["glitch".into()];

        let html = render_index(
            &[PhaseGroup {
                name: "phase1".into(),
                files: vec![f],
            }],
            &RenderOptions::default(),
        );
        assert!(html.contains("<p class=\"excerpt\">The opening line.</p>"));
        assert!(html.contains("<span class=\"badge\">glitch</span>"));
    }

    #[test]
    fn render_omits_timestamps_by_default() {
        let mut f = file("Essay", "phase1/essay.html");
        f.modified_at = Some(chrono::Utc::now());

        let html = render_index(
            &[PhaseGroup {
                name: "phase1".into(),
                files: vec![f.clone()],
            }],
            &RenderOptions::default(),
        );
        assert!(!html.contains("<time"));

        let opts = RenderOptions {
            show_modified: true,
            ..RenderOptions::default()
        };
        let html = render_index(
            &[PhaseGroup {
                name: "phase1".into(),
                files: vec![f],
            }],
            &opts,
        );
        assert!(html.contains("<time datetime="));
    }

    #[test]
    fn render_uses_configured_site_title() {
        let opts = RenderOptions {
            site_title: "Essay Archive".into(),
            ..RenderOptions::default()
        };
        let html = render_index(&[], &opts);
        assert!(html.contains("<title>Essay Archive</title>"));
        assert!(html.contains("<h1>Essay Archive</h1>"));
    }

    #[test]
    fn render_is_deterministic() {
        let groups = vec![PhaseGroup {
            name: "phase1".into(),
            files: vec![file("Essay", "phase1/essay.html")],
        }];

        let a = render_index(&groups, &RenderOptions::default());
        let b = render_index(&groups, &RenderOptions::default());
        assert_eq!(a, b);
    }
}
